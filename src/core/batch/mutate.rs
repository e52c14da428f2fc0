//! Bulk update and delete pipelines
//!
//! Simpler cousins of the import pipeline: the item list arrives as task
//! ids instead of CSV rows, so there is no parse or reference phase. Ids
//! are trimmed and deduplicated up front and the deduplicated count is
//! what the report and the registry record are sized to.

use super::executor::{BatchExecutor, ExecutorConfig, ItemStatus};
use super::registry::OperationRegistry;
use super::types::{BatchKind, BatchStatus, FailedItem, MutationReport};
use super::{DEFAULT_CONCURRENCY, MAX_BATCH_ITEMS, validate_concurrency};
use crate::core::models::TaskChanges;
use crate::core::workspace::{ApiError, TaskRemote};
use crate::utils::error::{Result, TasklaneError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{info, warn};

/// Apply one set of field changes to many tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUpdateRequest {
    /// Ids of the tasks to modify
    pub task_ids: Vec<String>,
    /// Changes applied uniformly to every task
    pub changes: TaskChanges,
    /// When true (the default), report what would change without calling out
    #[serde(default = "default_true")]
    pub dry_run: bool,
    /// Concurrent requests in flight, 1 to 20
    #[serde(default)]
    pub concurrency: Option<usize>,
    /// Keep going after individual failures (the default) or halt
    #[serde(default = "default_true")]
    pub continue_on_error: bool,
}

impl Default for BulkUpdateRequest {
    fn default() -> Self {
        Self {
            task_ids: Vec::new(),
            changes: TaskChanges::default(),
            dry_run: true,
            concurrency: None,
            continue_on_error: true,
        }
    }
}

/// Delete many tasks by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// Ids of the tasks to delete
    pub task_ids: Vec<String>,
    /// When true (the default), report what would be deleted without calling out
    #[serde(default = "default_true")]
    pub dry_run: bool,
    /// Concurrent requests in flight, 1 to 20
    #[serde(default)]
    pub concurrency: Option<usize>,
    /// Keep going after individual failures (the default) or halt
    #[serde(default = "default_true")]
    pub continue_on_error: bool,
}

impl Default for BulkDeleteRequest {
    fn default() -> Self {
        Self {
            task_ids: Vec::new(),
            dry_run: true,
            concurrency: None,
            continue_on_error: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Orchestrates bulk updates and deletes against the workspace
pub struct MutationPipeline {
    remote: Arc<dyn TaskRemote>,
    registry: Arc<OperationRegistry>,
}

impl MutationPipeline {
    /// Create a pipeline over the given remote and registry
    pub fn new(remote: Arc<dyn TaskRemote>, registry: Arc<OperationRegistry>) -> Self {
        Self { remote, registry }
    }

    /// Apply the same changes to every listed task
    pub async fn update(&self, request: BulkUpdateRequest) -> Result<MutationReport> {
        let started = Instant::now();

        if request.changes.is_empty() {
            return Err(TasklaneError::validation(
                "changes",
                "at least one field change is required",
            ));
        }
        let ids = dedup_ids(&request.task_ids)?;
        let concurrency =
            validate_concurrency(request.concurrency.unwrap_or(DEFAULT_CONCURRENCY))?;

        if request.dry_run {
            return Ok(self.dry_run_report(BatchKind::Update, ids.len(), started));
        }

        let op = self.registry.create(BatchKind::Update, ids.len());
        info!(
            operation = %op.id,
            tasks = ids.len(),
            concurrency,
            "starting bulk update"
        );

        let changes = Arc::new(request.changes);
        let remote = Arc::clone(&self.remote);
        let run = self
            .execute(
                &op.id,
                ids,
                concurrency,
                request.continue_on_error,
                move |id: String| {
                    let remote = Arc::clone(&remote);
                    let changes = Arc::clone(&changes);
                    async move { remote.update_task(&id, &changes).await.map(|_| ()) }
                },
            )
            .await;

        self.finish(BatchKind::Update, op.id, run, started)
    }

    /// Delete every listed task
    pub async fn delete(&self, request: BulkDeleteRequest) -> Result<MutationReport> {
        let started = Instant::now();

        let ids = dedup_ids(&request.task_ids)?;
        let concurrency =
            validate_concurrency(request.concurrency.unwrap_or(DEFAULT_CONCURRENCY))?;

        if request.dry_run {
            return Ok(self.dry_run_report(BatchKind::Delete, ids.len(), started));
        }

        let op = self.registry.create(BatchKind::Delete, ids.len());
        info!(
            operation = %op.id,
            tasks = ids.len(),
            concurrency,
            "starting bulk delete"
        );

        let remote = Arc::clone(&self.remote);
        let run = self
            .execute(
                &op.id,
                ids,
                concurrency,
                request.continue_on_error,
                move |id: String| {
                    let remote = Arc::clone(&remote);
                    async move { remote.delete_task(&id).await }
                },
            )
            .await;

        self.finish(BatchKind::Delete, op.id, run, started)
    }

    fn dry_run_report(
        &self,
        kind: BatchKind,
        requested: usize,
        started: Instant,
    ) -> MutationReport {
        let op = self.registry.create(kind, requested);
        self.registry.complete(&op.id, BatchStatus::Completed);
        info!(operation = %op.id, requested, "dry run, no tasks touched");

        MutationReport {
            batch_operation_id: op.id,
            requested,
            mutated: 0,
            failed: 0,
            failed_items: Vec::new(),
            execution_time_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Drive the executor with live registry bookkeeping per settled item
    async fn execute<F, Fut>(
        &self,
        operation_id: &str,
        ids: Vec<String>,
        concurrency: usize,
        continue_on_error: bool,
        call: F,
    ) -> super::executor::BatchRun<String, ()>
    where
        F: Fn(String) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = std::result::Result<(), ApiError>> + Send,
    {
        let executor = BatchExecutor::new(
            ExecutorConfig::new()
                .with_concurrency(concurrency)
                .with_continue_on_error(continue_on_error),
        );

        let items: Vec<(String, String)> = ids.into_iter().map(|id| (id.clone(), id)).collect();

        let settled = Arc::new(AtomicUsize::new(0));
        let registry = Arc::clone(&self.registry);
        let operation_id = operation_id.to_string();

        let action = move |key: String, id: String| {
            let call = call.clone();
            let registry = Arc::clone(&registry);
            let operation_id = operation_id.clone();
            let settled = Arc::clone(&settled);

            async move {
                let result = call(id).await;
                match &result {
                    Ok(()) => {
                        registry.add_success(&operation_id, key.clone());
                    }
                    Err(err) => {
                        registry.add_failure(
                            &operation_id,
                            FailedItem::for_task(key.clone(), err.to_string()),
                        );
                    }
                }
                let done = settled.fetch_add(1, Ordering::SeqCst) + 1;
                registry.update_progress(&operation_id, done);
                result
            }
        };

        executor.execute(items, action).await
    }

    fn finish(
        &self,
        kind: BatchKind,
        operation_id: String,
        run: super::executor::BatchRun<String, ()>,
        started: Instant,
    ) -> Result<MutationReport> {
        let mutated = run.succeeded();
        let failed_items: Vec<FailedItem> = run
            .outcomes
            .iter()
            .filter_map(|outcome| match &outcome.status {
                ItemStatus::Failed(err) => {
                    Some(FailedItem::for_task(outcome.key.clone(), err.to_string()))
                }
                _ => None,
            })
            .collect();

        let status = if failed_items.is_empty() && !run.halted {
            BatchStatus::Completed
        } else {
            BatchStatus::Failed
        };
        self.registry.complete(&operation_id, status);

        if run.halted {
            let message = run
                .first_error
                .map(|err| err.to_string())
                .unwrap_or_else(|| format!("bulk {} halted on first failure", kind));
            warn!(operation = %operation_id, %message, "bulk mutation aborted");
            return Err(TasklaneError::BatchAborted {
                operation_id,
                message,
            });
        }

        info!(
            operation = %operation_id,
            kind = %kind,
            mutated,
            failed = failed_items.len(),
            "bulk mutation finished"
        );

        Ok(MutationReport {
            batch_operation_id: operation_id,
            requested: run.outcomes.len(),
            mutated,
            failed: failed_items.len(),
            failed_items,
            execution_time_ms: started.elapsed().as_millis() as u64,
        })
    }
}

/// Trim, drop empties, and deduplicate while preserving first-seen order
///
/// The batch ceiling applies to the deduplicated count, so a list with
/// repeats can exceed it as long as the unique ids fit.
fn dedup_ids(ids: &[String]) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for id in ids {
        let id = id.trim();
        if id.is_empty() {
            continue;
        }
        if seen.insert(id.to_string()) {
            out.push(id.to_string());
        }
    }

    if out.is_empty() {
        return Err(TasklaneError::validation(
            "task_ids",
            "at least one task id is required",
        ));
    }
    if out.len() > MAX_BATCH_ITEMS {
        return Err(TasklaneError::validation(
            "task_ids",
            format!(
                "{} unique ids exceeds the {} id limit",
                out.len(),
                MAX_BATCH_ITEMS
            ),
        ));
    }
    Ok(out)
}
