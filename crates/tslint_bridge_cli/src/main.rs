//! tslint-bridge CLI
//!
//! Runs tslint for editors: as an LSP server, or once from the command line.

mod cli;
mod commands;
mod output;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{run_lint, run_lsp};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the LSP transport.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_diagnostics) => {
            if has_diagnostics {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lint {
            file,
            fix,
            single,
            format,
        } => run_lint(&cli, file, *fix, *single, *format),
        Commands::Lsp => run_lsp().map(|_| false),
    }
}
