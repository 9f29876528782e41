//! Incremental reconciliation of published diagnostics.
//!
//! The reconciler remembers what was last sent to the editor for each file.
//! A project-wide run publishes every file it reports and clears every file
//! that had errors before and is missing now. A single-file run only touches
//! its own file.
//!
//! Project-wide runs are ordered by a generation ticket taken before the
//! linter starts. A run that finishes after a newer run has already been
//! reconciled is dropped instead of overwriting fresher results.

use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::debug;

use crate::diagnostic::{Diagnostic, FileDiagnosticSet};

/// Colour hint passed along with every publish.
pub const COLOR_HINT: &str = "yellow";

/// The editor's diagnostics surface.
pub trait DiagnosticSink: Send + Sync + 'static {
    /// Replaces the diagnostics shown for `path`. An empty slice clears them.
    fn set_errors(
        &self,
        source_id: &str,
        path: &Path,
        diagnostics: &[Diagnostic],
        color_hint: &str,
    ) -> impl Future<Output = ()> + Send;
}

/// Ordering ticket for a project-wide run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Result of a project-wide reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Diagnostics were published and the state replaced.
    Applied { published: usize, cleared: usize },
    /// A newer run was already reconciled; nothing was published.
    Stale {
        generation: Generation,
        current: Generation,
    },
}

#[derive(Debug, Default)]
struct ReconcilerState {
    published: FileDiagnosticSet,
    generation: Generation,
}

/// Owns the last published diagnostics and the sink they go to.
pub struct Reconciler<S> {
    sink: S,
    source_id: RwLock<String>,
    next_generation: AtomicU64,
    state: Mutex<ReconcilerState>,
}

impl<S: DiagnosticSink> Reconciler<S> {
    pub fn new(sink: S, source_id: impl Into<String>) -> Self {
        Self {
            sink,
            source_id: RwLock::new(source_id.into()),
            next_generation: AtomicU64::new(0),
            state: Mutex::new(ReconcilerState::default()),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn source_id(&self) -> String {
        self.source_id.read().clone()
    }

    /// Changes the source id used for subsequent publishes.
    pub fn set_source_id(&self, source_id: impl Into<String>) {
        *self.source_id.write() = source_id.into();
    }

    /// Takes the ticket for a new project-wide run.
    pub fn begin_run(&self) -> Generation {
        Generation(self.next_generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Reconciles a fresh project-wide result as the newest run.
    pub async fn reconcile(&self, new_set: FileDiagnosticSet) -> ReconcileOutcome {
        let generation = self.begin_run();
        self.reconcile_run(generation, new_set).await
    }

    /// Reconciles the result of the run holding `generation`.
    pub async fn reconcile_run(
        &self,
        generation: Generation,
        new_set: FileDiagnosticSet,
    ) -> ReconcileOutcome {
        let mut state = self.state.lock().await;

        if generation < state.generation {
            debug!(
                "Dropping stale lint result (run {} < current {})",
                generation.0, state.generation.0
            );
            return ReconcileOutcome::Stale {
                generation,
                current: state.generation,
            };
        }

        for (path, diagnostics) in &new_set {
            self.publish(path, diagnostics).await;
        }

        let mut cleared = 0;
        for (path, prior) in &state.published {
            if !prior.is_empty() && !new_set.contains_key(path) {
                self.publish(path, &[]).await;
                cleared += 1;
            }
        }

        let published = new_set.len();
        state.published = new_set;
        state.generation = generation;

        debug!(
            "Reconciled run {}: {} published, {} cleared",
            generation.0, published, cleared
        );
        ReconcileOutcome::Applied { published, cleared }
    }

    /// Publishes a single file's fresh diagnostics.
    ///
    /// The file's entry is updated to what was just sent: an empty result
    /// marks a known file as cleared, a non-empty one is recorded so the next
    /// project-wide run can clear it. Other files are untouched.
    pub async fn reconcile_single_file(&self, path: &Path, diagnostics: &[Diagnostic]) {
        let mut state = self.state.lock().await;

        self.publish(path, diagnostics).await;

        if diagnostics.is_empty() {
            if let Some(prior) = state.published.get_mut(path) {
                prior.clear();
            }
        } else {
            state
                .published
                .insert(path.to_path_buf(), diagnostics.to_vec());
        }
    }

    /// Copy of the last published set.
    pub async fn snapshot(&self) -> FileDiagnosticSet {
        self.state.lock().await.published.clone()
    }

    /// Generation of the last applied project-wide run.
    pub async fn current_generation(&self) -> Generation {
        self.state.lock().await.generation
    }

    async fn publish(&self, path: &Path, diagnostics: &[Diagnostic]) {
        let source_id = self.source_id();
        self.sink
            .set_errors(&source_id, path, diagnostics, COLOR_HINT)
            .await;
    }
}
