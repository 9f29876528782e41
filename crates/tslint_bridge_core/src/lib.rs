//! # tslint_bridge_core
//!
//! Core engine for tslint-bridge.
//!
//! This crate provides:
//! - Discovery of `tslint.json` / `tsconfig.json` in ancestor directories
//! - Linter invocation and parsing of its JSON output
//! - The `Reconciler`, which tracks published diagnostics per file
//! - The `LintSession` orchestrator driven by buffer events
//!
//! ## Example
//!
//! ```rust,ignore
//! use tslint_bridge_core::{BridgeSettings, BufferEvent, BufferEventKind, LintSession, ProcessRunner};
//!
//! let session = LintSession::new(BridgeSettings::default(), ProcessRunner::new(), sink)?;
//! session
//!     .handle(&BufferEvent::new(BufferEventKind::Entered, "/work/app/src/index.js"))
//!     .await?;
//! ```

mod diagnostic;
pub mod discovery;
mod error;
mod filter;
pub mod invocation;
pub mod output;
mod reconciler;
mod runner;
mod session;
mod settings;

pub use diagnostic::{Diagnostic, FileDiagnosticSet, Position, Range, Severity};
pub use error::BridgeError;
pub use filter::AdmissionFilter;
pub use invocation::{Invocation, LintTarget};
pub use reconciler::{COLOR_HINT, DiagnosticSink, Generation, ReconcileOutcome, Reconciler};
pub use runner::{LinterRunner, ProcessRunner};
pub use session::{BufferEvent, BufferEventKind, LintOutcome, LintSession};
pub use settings::{BridgeSettings, DEFAULT_DEBOUNCE_MS, DEFAULT_SOURCE_ID};
