use std::sync::{Arc, PoisonError, RwLock};

use probe_model::ScriptSpec;
use tracing::info;

/// Immutable view of the loaded configuration.
///
/// Requests hold on to a snapshot for their whole lifetime; a reload never touches it.
#[derive(Debug, Default)]
pub struct Snapshot {
    scripts: Vec<Arc<ScriptSpec>>,
    canonical: String,
}

impl Snapshot {
    pub fn new(scripts: Vec<Arc<ScriptSpec>>, canonical: String) -> Self {
        Self { scripts, canonical }
    }

    /// Scripts in merge order.
    pub fn scripts(&self) -> &[Arc<ScriptSpec>] {
        &self.scripts
    }

    /// Canonical YAML the scripts were parsed from.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

/// Live script store with snapshot-replace semantics.
///
/// Readers clone the current `Arc<Snapshot>` under a short read lock; `replace` swaps
/// the whole snapshot under a short write lock. No lock is held while scripts run.
#[derive(Clone, Default)]
pub struct ScriptStore {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl ScriptStore {
    /// Create a store serving `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Publish a new snapshot, returning the one it replaced.
    pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let next = Arc::new(snapshot);
        let scripts = next.len();

        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let prev = std::mem::replace(&mut *guard, next);
        drop(guard);

        info!(target: "probe.core.store", scripts, previous = prev.len(), "script store replaced");
        prev
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
