//! Lint session: turns buffer events into linter runs and publishes the results.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::diagnostic::{Diagnostic, FileDiagnosticSet};
use crate::discovery::{find_up, require_up, working_dir_for};
use crate::error::BridgeError;
use crate::filter::AdmissionFilter;
use crate::invocation::{Invocation, LintTarget, resolve_program};
use crate::output::{ParseOptions, normalize, parse_output};
use crate::reconciler::{DiagnosticSink, ReconcileOutcome, Reconciler};
use crate::runner::LinterRunner;
use crate::settings::BridgeSettings;

/// Editor buffer lifecycle events the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferEventKind {
    Entered,
    Saved,
    Changed,
    ModeChanged,
}

/// A buffer event. Buffers without a backing file carry no path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferEvent {
    pub kind: BufferEventKind,
    pub file_path: Option<PathBuf>,
}

impl BufferEvent {
    pub fn new(kind: BufferEventKind, file_path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            file_path: Some(file_path.into()),
        }
    }
}

/// What a lint operation ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintOutcome {
    /// No path, or the file is not admitted.
    Skipped,
    /// No lint config was found; nothing was published.
    NoConfig,
    /// Diagnostics were published.
    Published { files: usize, cleared: usize },
    /// A newer project run finished first; this result was dropped.
    Stale,
}

struct ActiveSettings {
    settings: BridgeSettings,
    filter: AdmissionFilter,
}

impl ActiveSettings {
    fn new(settings: BridgeSettings) -> Result<Self, BridgeError> {
        let filter = settings.admission_filter()?;
        Ok(Self { settings, filter })
    }
}

impl Default for ActiveSettings {
    fn default() -> Self {
        Self {
            settings: BridgeSettings::default(),
            filter: AdmissionFilter::default(),
        }
    }
}

/// Owns the reconciler, the runner and the last project-wide request.
pub struct LintSession<R, S> {
    active: RwLock<Arc<ActiveSettings>>,
    runner: R,
    reconciler: Reconciler<S>,
    last_project_file: Mutex<Option<PathBuf>>,
}

impl<R: LinterRunner, S: DiagnosticSink> LintSession<R, S> {
    pub fn new(settings: BridgeSettings, runner: R, sink: S) -> Result<Self, BridgeError> {
        let reconciler = Reconciler::new(sink, settings.source_id.clone());
        Ok(Self {
            active: RwLock::new(Arc::new(ActiveSettings::new(settings)?)),
            runner,
            reconciler,
            last_project_file: Mutex::new(None),
        })
    }

    /// Creates a session with default settings.
    pub fn with_default_settings(runner: R, sink: S) -> Self {
        let active = ActiveSettings::default();
        Self {
            reconciler: Reconciler::new(sink, active.settings.source_id.clone()),
            active: RwLock::new(Arc::new(active)),
            runner,
            last_project_file: Mutex::new(None),
        }
    }

    pub fn reconciler(&self) -> &Reconciler<S> {
        &self.reconciler
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Current settings.
    pub fn settings(&self) -> BridgeSettings {
        self.active.read().settings.clone()
    }

    /// Swaps in new settings. Published state is kept.
    pub fn update_settings(&self, settings: BridgeSettings) -> Result<(), BridgeError> {
        let next = Arc::new(ActiveSettings::new(settings)?);
        self.reconciler.set_source_id(next.settings.source_id.clone());
        *self.active.write() = next;
        info!("Bridge settings updated");
        Ok(())
    }

    /// Returns true if `path` passes the admission filter.
    pub fn admits(&self, path: &Path) -> bool {
        self.active.read().filter.admits(path)
    }

    /// File the last project-wide run was triggered for.
    pub fn last_project_file(&self) -> Option<PathBuf> {
        self.last_project_file.lock().clone()
    }

    /// Dispatches a buffer event.
    pub async fn handle(&self, event: &BufferEvent) -> Result<LintOutcome, BridgeError> {
        debug!("Buffer event {:?} for {:?}", event.kind, event.file_path);
        let path = event.file_path.as_deref();
        match event.kind {
            BufferEventKind::Entered => self.lint_project(path, false).await,
            BufferEventKind::Saved | BufferEventKind::Changed | BufferEventKind::ModeChanged => {
                self.lint_file(path).await
            }
        }
    }

    /// Re-runs the last project-wide lint with auto-fix enabled.
    pub async fn fix_last_project(&self) -> Result<LintOutcome, BridgeError> {
        match self.last_project_file() {
            Some(file) => self.lint_project(Some(&file), true).await,
            None => {
                debug!("No project lint has run yet; nothing to fix");
                Ok(LintOutcome::Skipped)
            }
        }
    }

    /// Lints the project containing `file` and reconciles the whole result.
    pub async fn lint_project(
        &self,
        file: Option<&Path>,
        auto_fix: bool,
    ) -> Result<LintOutcome, BridgeError> {
        let Some(file) = file else {
            return Ok(LintOutcome::Skipped);
        };

        let active = self.active.read().clone();
        if !active.filter.admits(file) {
            debug!("Not linting {}", file.display());
            return Ok(LintOutcome::Skipped);
        }

        *self.last_project_file.lock() = Some(file.to_path_buf());

        let working_dir = working_dir_for(file);
        let Some(lint_config) = lookup_lint_config(&active.settings, &working_dir)? else {
            return Ok(LintOutcome::NoConfig);
        };

        let generation = self.reconciler.begin_run();

        let project = find_up(&active.settings.project_config_file, &working_dir)
            .inspect_err(|e| warn!("{}", e))?;
        let target = match project {
            Some(project) => LintTarget::Project(project),
            None => LintTarget::File(file.to_path_buf()),
        };

        let set = self
            .run_linter(&active.settings, &lint_config, &target, &working_dir, auto_fix)
            .await?;

        match self.reconciler.reconcile_run(generation, set).await {
            ReconcileOutcome::Applied { published, cleared } => {
                info!(
                    "Project lint for {}: {} files reported, {} cleared",
                    file.display(),
                    published,
                    cleared
                );
                Ok(LintOutcome::Published {
                    files: published,
                    cleared,
                })
            }
            ReconcileOutcome::Stale { .. } => Ok(LintOutcome::Stale),
        }
    }

    /// Lints one file and publishes diagnostics for it alone.
    pub async fn lint_file(&self, file: Option<&Path>) -> Result<LintOutcome, BridgeError> {
        let Some(file) = file else {
            return Ok(LintOutcome::Skipped);
        };

        let active = self.active.read().clone();
        if !active.filter.admits(file) {
            debug!("Not linting {}", file.display());
            return Ok(LintOutcome::Skipped);
        }

        let working_dir = working_dir_for(file);
        let Some(lint_config) = lookup_lint_config(&active.settings, &working_dir)? else {
            return Ok(LintOutcome::NoConfig);
        };

        let target = LintTarget::File(file.to_path_buf());
        let set = self
            .run_linter(&active.settings, &lint_config, &target, &working_dir, false)
            .await?;

        let diagnostics = take_file_diagnostics(set, file, &working_dir);
        self.reconciler
            .reconcile_single_file(file, &diagnostics)
            .await;

        Ok(LintOutcome::Published {
            files: 1,
            cleared: 0,
        })
    }

    async fn run_linter(
        &self,
        settings: &BridgeSettings,
        lint_config: &Path,
        target: &LintTarget,
        working_dir: &Path,
        auto_fix: bool,
    ) -> Result<FileDiagnosticSet, BridgeError> {
        let program = resolve_program(settings.linter_command.as_deref(), working_dir)
            .inspect_err(|e| warn!("{}", e))?;
        let invocation = Invocation::new(program, lint_config, target, working_dir, auto_fix);

        let stdout = self
            .runner
            .run(&invocation)
            .await
            .inspect_err(|e| error!("Lint run failed: {}", e))?;

        parse_output(
            &stdout,
            ParseOptions {
                working_dir: Some(working_dir),
                use_rule_severity: settings.use_rule_severity,
            },
        )
        .inspect_err(|e| error!("{}", e))
    }
}

/// Finds the lint config, logging a warning when there is none.
fn lookup_lint_config(
    settings: &BridgeSettings,
    working_dir: &Path,
) -> Result<Option<PathBuf>, BridgeError> {
    match require_up(&settings.lint_config_file, working_dir) {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.is_config_not_found() => {
            warn!("{}; not running tslint.", e);
            Ok(None)
        }
        Err(e) => {
            warn!("No {} found; not running tslint. {}", settings.lint_config_file, e);
            Err(e)
        }
    }
}

/// Picks the diagnostics for `file` out of a single-file run's result.
///
/// Falls back to matching by file name, since some linter versions only
/// report the name for single-file runs.
fn take_file_diagnostics(
    mut set: FileDiagnosticSet,
    file: &Path,
    working_dir: &Path,
) -> Vec<Diagnostic> {
    let key = if file.is_relative() {
        normalize(&working_dir.join(file))
    } else {
        normalize(file)
    };

    if let Some(diagnostics) = set.remove(&key) {
        return diagnostics;
    }

    let Some(name) = file.file_name() else {
        return Vec::new();
    };
    let matching = set
        .keys()
        .find(|path| path.file_name() == Some(name))
        .cloned();

    matching
        .and_then(|path| set.remove(&path))
        .unwrap_or_default()
}
