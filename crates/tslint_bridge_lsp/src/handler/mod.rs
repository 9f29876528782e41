//! LSP request/notification handlers.

mod commands;
mod documents;
mod files;
mod initialize;
mod mode;

pub use commands::handle_execute_command;
pub use documents::{handle_did_change, handle_did_close, handle_did_open, handle_did_save};
pub use files::handle_did_change_watched_files;
pub use initialize::{handle_initialize, handle_initialized, handle_shutdown};
pub use mode::{ModeChangedParams, handle_mode_changed};
