//! CSV import pipeline
//!
//! Nine phases, strictly ordered: intake validation, parse, row-count
//! guard, reference fetch, full validation pass, preview or execute,
//! aggregation with the rollback advisory, result assembly. Validation is
//! all-rows-first so one call reports every problem; nothing touches the
//! network before the reference fetch phase.

use super::executor::{BatchExecutor, ExecutorConfig, ItemStatus};
use super::registry::OperationRegistry;
use super::types::{BatchKind, BatchStatus, FailedItem, ImportReport, ImportRequest};
use super::{
    DEFAULT_CONCURRENCY, MAX_BATCH_ITEMS, PREVIEW_ROW_LIMIT, ROLLBACK_ADVISORY_THRESHOLD,
    validate_concurrency,
};
use crate::core::models::{ResolvedRow, TaskPayload, TaskPreview};
use crate::core::rows::{find_named, parse_rows, resolve_row, suggest, validate_row};
use crate::core::workspace::{ReferenceCache, TaskRemote};
use crate::utils::error::{Result, TasklaneError};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Orchestrates CSV imports against the workspace
pub struct ImportPipeline {
    remote: Arc<dyn TaskRemote>,
    registry: Arc<OperationRegistry>,
    cache: Arc<ReferenceCache>,
}

impl ImportPipeline {
    /// Create a pipeline over the given remote, registry, and cache
    pub fn new(
        remote: Arc<dyn TaskRemote>,
        registry: Arc<OperationRegistry>,
        cache: Arc<ReferenceCache>,
    ) -> Self {
        Self {
            remote,
            registry,
            cache,
        }
    }

    /// Run one import request end to end
    pub async fn run(&self, request: ImportRequest) -> Result<ImportReport> {
        let started = Instant::now();

        // Intake: cheap structural checks before any I/O
        let board_name = request.board.trim().to_string();
        if board_name.is_empty() {
            return Err(TasklaneError::validation("board", "target board is required"));
        }
        let concurrency =
            validate_concurrency(request.concurrency.unwrap_or(DEFAULT_CONCURRENCY))?;
        let source = self.load_source(&request).await?;

        // Parse; structural errors are fatal as a group
        let parsed = parse_rows(&source, request.column_mapping.as_ref(), MAX_BATCH_ITEMS);
        if !parsed.errors.is_empty() {
            return Err(TasklaneError::Parse {
                errors: parsed.errors,
            });
        }

        // Row-count guard, ahead of any network activity
        if parsed.rows.is_empty() {
            return Err(TasklaneError::validation("csv_data", "no data rows found"));
        }
        if parsed.rows.len() > MAX_BATCH_ITEMS {
            return Err(TasklaneError::validation(
                "csv_data",
                format!("import exceeds the {} row limit", MAX_BATCH_ITEMS),
            ));
        }

        // Reference fetch and job-level board resolution
        let config = self.cache.fetch(request.cache_bust).await?;
        let board = match find_named(&config.boards, &board_name) {
            Some(board) => board.clone(),
            None => {
                let mut message = format!("unknown board \"{}\"", board_name);
                if let Some(suggestion) =
                    suggest(config.boards.iter().map(|b| b.name.as_str()), &board_name)
                {
                    message.push_str(&format!(" (did you mean \"{}\"?)", suggestion));
                }
                return Err(TasklaneError::validation("board", message));
            }
        };

        // Full validation pass: every row, every error
        let total_rows = parsed.rows.len();
        let mut validation_errors = Vec::new();
        let mut resolved: Vec<ResolvedRow> = Vec::new();

        for row in &parsed.rows {
            let mut errors = validate_row(row);
            let (mut payload, resolve_errors) = resolve_row(row, &config);
            errors.extend(resolve_errors);

            if errors.is_empty() {
                // Job-level targeting wins over any per-row board value
                payload.board_id = board.id.clone();
                resolved.push(ResolvedRow {
                    row_number: row.row_number,
                    task: payload,
                });
            } else {
                validation_errors.extend(errors);
            }
        }

        let valid_rows = resolved.len();
        let invalid_rows = total_rows - valid_rows;

        if request.validate_only {
            let op = self.registry.create(BatchKind::Import, valid_rows);
            let status = if validation_errors.is_empty() {
                BatchStatus::Completed
            } else {
                BatchStatus::Failed
            };
            self.registry.complete(&op.id, status);
            info!(
                operation = %op.id,
                total_rows, valid_rows, invalid_rows,
                "import preview complete"
            );

            let preview: Vec<TaskPreview> = resolved
                .iter()
                .take(PREVIEW_ROW_LIMIT)
                .map(TaskPreview::from)
                .collect();

            return Ok(ImportReport {
                batch_operation_id: op.id,
                total_rows,
                valid_rows,
                invalid_rows,
                validation_errors,
                preview: Some(preview),
                created_tasks: 0,
                failed_tasks: 0,
                created_ids: Vec::new(),
                failed_items: Vec::new(),
                execution_time_ms: started.elapsed().as_millis() as u64,
            });
        }

        // Fast fail: invalid rows with no tolerance for error. Valid rows
        // are never attempted and appear in neither result list.
        if invalid_rows > 0 && !request.continue_on_error {
            let op = self.registry.create(BatchKind::Import, valid_rows);
            self.registry.complete(&op.id, BatchStatus::Failed);
            warn!(
                operation = %op.id,
                invalid_rows,
                "import rejected before execution"
            );

            return Ok(ImportReport {
                batch_operation_id: op.id,
                total_rows,
                valid_rows,
                invalid_rows,
                validation_errors,
                preview: None,
                created_tasks: 0,
                failed_tasks: 0,
                created_ids: Vec::new(),
                failed_items: Vec::new(),
                execution_time_ms: started.elapsed().as_millis() as u64,
            });
        }

        // Execute
        let op = self.registry.create(BatchKind::Import, valid_rows);
        info!(
            operation = %op.id,
            rows = valid_rows,
            concurrency,
            "starting task import"
        );

        let executor = BatchExecutor::new(
            ExecutorConfig::new()
                .with_concurrency(concurrency)
                .with_continue_on_error(request.continue_on_error),
        );

        let items: Vec<(u32, TaskPayload)> = resolved
            .into_iter()
            .map(|row| (row.row_number, row.task))
            .collect();

        let settled = Arc::new(AtomicUsize::new(0));
        let action = {
            let remote = Arc::clone(&self.remote);
            let registry = Arc::clone(&self.registry);
            let operation_id = op.id.clone();
            let settled = Arc::clone(&settled);

            move |row_number: u32, payload: TaskPayload| {
                let remote = Arc::clone(&remote);
                let registry = Arc::clone(&registry);
                let operation_id = operation_id.clone();
                let settled = Arc::clone(&settled);

                async move {
                    let result = remote.create_task(&payload).await;
                    match &result {
                        Ok(task) => {
                            registry.add_success(&operation_id, task.id.clone());
                        }
                        Err(err) => {
                            registry.add_failure(
                                &operation_id,
                                FailedItem::for_row(row_number, err.to_string()),
                            );
                        }
                    }
                    let done = settled.fetch_add(1, Ordering::SeqCst) + 1;
                    registry.update_progress(&operation_id, done);
                    result.map(|task| task.id)
                }
            }
        };

        let run = executor.execute(items, action).await;

        let created_ids: Vec<String> = run
            .outcomes
            .iter()
            .filter_map(|outcome| match &outcome.status {
                ItemStatus::Succeeded(id) => Some(id.clone()),
                _ => None,
            })
            .collect();

        let mut failed_items: Vec<FailedItem> = run
            .outcomes
            .iter()
            .filter_map(|outcome| match &outcome.status {
                ItemStatus::Failed(err) => {
                    Some(FailedItem::for_row(outcome.key, err.to_string()))
                }
                _ => None,
            })
            .collect();

        let status = if failed_items.is_empty() && !run.halted {
            BatchStatus::Completed
        } else {
            BatchStatus::Failed
        };
        self.registry.complete(&op.id, status);

        if run.halted {
            let message = run
                .first_error
                .map(|err| err.to_string())
                .unwrap_or_else(|| "import halted on first failure".to_string());
            warn!(operation = %op.id, %message, "import aborted");
            return Err(TasklaneError::BatchAborted {
                operation_id: op.id,
                message,
            });
        }

        // Rollback advisory: strictly more than half the attempted rows
        // failing flags the batch as suspect. Appended to the first
        // failure's error text, not a separate field.
        let failure_rate = if valid_rows == 0 {
            0.0
        } else {
            failed_items.len() as f64 / valid_rows as f64
        };
        if failure_rate > ROLLBACK_ADVISORY_THRESHOLD && !created_ids.is_empty() {
            if let Some(first) = failed_items.first_mut() {
                first.error.push_str(&format!(
                    "; {:.0}% of attempted rows failed, consider deleting the {} created task(s): {}",
                    failure_rate * 100.0,
                    created_ids.len(),
                    created_ids.join(", ")
                ));
            }
        }

        info!(
            operation = %op.id,
            created = created_ids.len(),
            failed = failed_items.len(),
            "import finished"
        );

        Ok(ImportReport {
            batch_operation_id: op.id,
            total_rows,
            valid_rows,
            invalid_rows,
            validation_errors,
            preview: None,
            created_tasks: created_ids.len(),
            failed_tasks: failed_items.len(),
            created_ids,
            failed_items,
            execution_time_ms: started.elapsed().as_millis() as u64,
        })
    }

    async fn load_source(&self, request: &ImportRequest) -> Result<String> {
        if let Some(data) = &request.csv_data {
            if request.csv_path.is_some() {
                debug!("both csv_data and csv_path supplied; using inline data");
            }
            return Ok(data.clone());
        }

        match &request.csv_path {
            Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                TasklaneError::validation(
                    "csv_path",
                    format!("failed to read {}: {}", path.display(), e),
                )
            }),
            None => Err(TasklaneError::validation(
                "csv_data",
                "either csv_data or csv_path must be provided",
            )),
        }
    }
}
