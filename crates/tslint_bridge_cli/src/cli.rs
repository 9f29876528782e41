//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// tslint-bridge - tslint diagnostics for editors
#[derive(Parser)]
#[command(name = "tslint-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Bridge settings file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint the project containing a file, or just the file
    Lint {
        /// File to lint
        file: PathBuf,

        /// Let tslint fix what it can
        #[arg(long, conflicts_with = "single")]
        fix: bool,

        /// Lint only this file instead of its whole project
        #[arg(long)]
        single: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Start the LSP server
    Lsp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
