//! Lint command implementation

use std::path::Path;
use std::sync::Mutex;

use miette::{IntoDiagnostic, Result, miette};
use tracing::{info, warn};

use tslint_bridge_core::discovery::working_dir_for;
use tslint_bridge_core::{
    BridgeError, BridgeSettings, Diagnostic, DiagnosticSink, LintOutcome, LintSession,
    ProcessRunner,
};

use crate::cli::{Cli, OutputFormat};
use crate::output::{Published, output_results};
use crate::utils::create_tokio_runtime;

/// Collects publishes so they can be printed once the run ends.
#[derive(Default)]
struct CollectingSink {
    published: Mutex<Vec<Published>>,
}

impl CollectingSink {
    fn take(&self) -> Vec<Published> {
        self.published
            .lock()
            .map(|mut published| std::mem::take(&mut *published))
            .unwrap_or_default()
    }
}

impl DiagnosticSink for CollectingSink {
    async fn set_errors(
        &self,
        _source_id: &str,
        path: &Path,
        diagnostics: &[Diagnostic],
        _color_hint: &str,
    ) {
        if let Ok(mut published) = self.published.lock() {
            published.push(Published {
                path: path.to_path_buf(),
                diagnostics: diagnostics.to_vec(),
            });
        }
    }
}

pub fn run_lint(
    cli: &Cli,
    file: &Path,
    fix: bool,
    single: bool,
    format: OutputFormat,
) -> Result<bool> {
    let settings = load_settings(cli)?;
    let lint_config_file = settings.lint_config_file.clone();

    let file = std::path::absolute(file).into_diagnostic()?;
    if !file.is_file() {
        return Err(miette!("File not found: {}", file.display()));
    }

    let session = LintSession::new(settings, ProcessRunner::new(), CollectingSink::default())
        .into_diagnostic()?;

    let runtime = create_tokio_runtime()?;
    let outcome = runtime
        .block_on(async {
            if single {
                session.lint_file(Some(&file)).await
            } else {
                session.lint_project(Some(&file), fix).await
            }
        })
        .into_diagnostic()?;

    match outcome {
        LintOutcome::Skipped => {
            warn!(
                "{} is not linted with the current settings",
                file.display()
            );
            return Ok(false);
        }
        LintOutcome::NoConfig => {
            return Err(BridgeError::ConfigNotFound {
                file_name: lint_config_file,
                start: working_dir_for(&file),
            })
            .into_diagnostic();
        }
        LintOutcome::Published { .. } | LintOutcome::Stale => {}
    }

    let published = session.reconciler().sink().take();
    output_results(&published, format)
}

fn load_settings(cli: &Cli) -> Result<BridgeSettings> {
    if let Some(ref path) = cli.config {
        return BridgeSettings::from_file(path).into_diagnostic();
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    match BridgeSettings::discover(&cwd) {
        Some(path) => {
            info!("Using settings file: {}", path.display());
            BridgeSettings::from_file(&path).into_diagnostic()
        }
        None => Ok(BridgeSettings::default()),
    }
}
