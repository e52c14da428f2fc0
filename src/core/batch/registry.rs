//! In-memory registry of batch operations

use super::types::{BatchKind, BatchOperation, BatchProgress, BatchStatus, FailedItem};
use chrono::{Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, warn};

/// How long terminal operations stay queryable after `started_at`
const RETENTION: Duration = Duration::hours(1);

/// Process-wide store of batch operations, keyed by generated id.
///
/// The registry observes; it never drives control flow. Mutators are silent
/// no-ops on unknown ids (a lookup race with the sweeper must not break a
/// running batch) but return `false` so callers and tests can detect the
/// miss. Safe for concurrent writers; share it via `Arc`.
///
/// Entries stuck in `running` are never evicted, so a crashed pipeline
/// leaks its entry until process restart. Accepted: sweeping a live batch
/// would be worse, and pipelines always complete their operations on every
/// exit path.
pub struct OperationRegistry {
    operations: DashMap<String, BatchOperation>,
    retention: Duration,
}

impl OperationRegistry {
    /// Create a registry with the standard one-hour retention
    pub fn new() -> Self {
        Self::with_retention(RETENTION)
    }

    /// Create a registry with a custom retention window
    pub fn with_retention(retention: Duration) -> Self {
        Self {
            operations: DashMap::new(),
            retention,
        }
    }

    /// Register a new running operation sized to `total_items` and return
    /// a snapshot of it. Never fails.
    pub fn create(&self, kind: BatchKind, total_items: usize) -> BatchOperation {
        let op = BatchOperation::new(kind, total_items);
        debug!(id = %op.id, %kind, total_items, "registered batch operation");
        self.operations.insert(op.id.clone(), op.clone());
        op
    }

    /// Overwrite the completed count and recompute the percent
    pub fn update_progress(&self, id: &str, completed: usize) -> bool {
        match self.operations.get_mut(id) {
            Some(mut entry) => {
                entry.progress.completed = completed;
                entry.progress.percent =
                    BatchProgress::percent_of(completed, entry.progress.total);
                true
            }
            None => {
                warn!(id, "progress update for unknown batch operation");
                false
            }
        }
    }

    /// Append a successful item id
    pub fn add_success(&self, id: &str, item_id: impl Into<String>) -> bool {
        match self.operations.get_mut(id) {
            Some(mut entry) => {
                entry.successful_ids.push(item_id.into());
                true
            }
            None => {
                warn!(id, "success recorded for unknown batch operation");
                false
            }
        }
    }

    /// Append a failed item
    pub fn add_failure(&self, id: &str, item: FailedItem) -> bool {
        match self.operations.get_mut(id) {
            Some(mut entry) => {
                entry.failed_items.push(item);
                true
            }
            None => {
                warn!(id, "failure recorded for unknown batch operation");
                false
            }
        }
    }

    /// Move an operation to a terminal state and stamp its timing fields.
    ///
    /// The first terminal transition wins; repeat calls return `false` and
    /// leave `completed_at` and `execution_time_ms` untouched. Passing
    /// `running` is rejected.
    pub fn complete(&self, id: &str, status: BatchStatus) -> bool {
        if !status.is_terminal() {
            warn!(id, "complete() called with a non-terminal status");
            return false;
        }

        match self.operations.get_mut(id) {
            Some(mut entry) => {
                if entry.status.is_terminal() {
                    return false;
                }
                let now = Utc::now();
                entry.status = status;
                entry.completed_at = Some(now);
                entry.execution_time_ms =
                    Some((now - entry.started_at).num_milliseconds().max(0) as u64);
                debug!(id, %status, "batch operation finished");
                true
            }
            None => {
                warn!(id, "completion for unknown batch operation");
                false
            }
        }
    }

    /// Snapshot an operation by id
    pub fn get(&self, id: &str) -> Option<BatchOperation> {
        self.operations.get(id).map(|entry| entry.clone())
    }

    /// Evict terminal operations older than the retention window and
    /// return how many were removed. Running operations survive regardless
    /// of age; an external scheduler is expected to call this
    /// periodically.
    pub fn sweep(&self) -> usize {
        let cutoff = Utc::now() - self.retention;
        let before = self.operations.len();

        self.operations
            .retain(|_, op| op.status == BatchStatus::Running || op.started_at > cutoff);

        let evicted = before - self.operations.len();
        if evicted > 0 {
            debug!(evicted, "swept expired batch operations");
        }
        evicted
    }

    /// Number of tracked operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
