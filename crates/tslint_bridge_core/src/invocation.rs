//! Linter command line construction.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::discovery::find_up;
use crate::error::BridgeError;

/// Locally installed linter, relative to a package root.
pub const LOCAL_LINTER: &str = "node_modules/.bin/tslint";

/// Linter looked up on `PATH` when nothing else is configured.
pub const FALLBACK_LINTER: &str = "tslint";

/// What a lint run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintTarget {
    /// A whole project, described by its project config.
    Project(PathBuf),
    /// A single file.
    File(PathBuf),
}

/// A fully resolved linter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
}

impl Invocation {
    /// Builds the argument list for one run.
    ///
    /// `[--fix] --force --format json --config <config> (--project <project> | <file>)`
    pub fn new(
        program: impl Into<PathBuf>,
        config_path: &Path,
        target: &LintTarget,
        working_dir: impl Into<PathBuf>,
        auto_fix: bool,
    ) -> Self {
        let mut args: Vec<OsString> = Vec::new();

        if auto_fix {
            args.push("--fix".into());
        }

        args.extend(["--force", "--format", "json"].map(OsString::from));
        args.push("--config".into());
        args.push(config_path.as_os_str().to_owned());

        match target {
            LintTarget::Project(project) => {
                args.push("--project".into());
                args.push(project.as_os_str().to_owned());
            }
            LintTarget::File(file) => args.push(file.as_os_str().to_owned()),
        }

        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
        }
    }

    /// Arguments as lossy strings, for logging and tests.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

/// Resolves the linter executable for a run starting in `working_dir`.
pub fn resolve_program(
    configured: Option<&str>,
    working_dir: &Path,
) -> Result<PathBuf, BridgeError> {
    if let Some(command) = configured {
        return Ok(PathBuf::from(command));
    }

    Ok(find_up(LOCAL_LINTER, working_dir)?.unwrap_or_else(|| PathBuf::from(FALLBACK_LINTER)))
}
