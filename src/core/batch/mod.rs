//! Batch operation engine
//!
//! Takes a bulk job (CSV import, id-driven update or delete), validates it
//! in full before touching the network, executes it with bounded
//! parallelism against a remote that can fail per-item, and reports a
//! consistent result. The [`OperationRegistry`] tracks every job for later
//! status lookups.

mod executor;
mod import;
mod mutate;
mod registry;
mod types;


pub use executor::{BatchExecutor, BatchRun, ExecutorConfig, ItemOutcome, ItemStatus};
pub use import::ImportPipeline;
pub use mutate::{BulkDeleteRequest, BulkUpdateRequest, MutationPipeline};
pub use registry::OperationRegistry;
pub use types::{
    BatchKind, BatchOperation, BatchProgress, BatchStatus, FailedItem, ImportReport,
    ImportRequest, MutationReport,
};

use crate::utils::error::{Result, TasklaneError};

/// Concurrency used when a request does not specify one
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Upper bound on requested concurrency
pub const MAX_CONCURRENCY: usize = 20;

/// Ceiling on rows per import and ids per bulk mutation
pub const MAX_BATCH_ITEMS: usize = 10_000;

/// Resolved rows shown in a validate-only report
pub const PREVIEW_ROW_LIMIT: usize = 10;

/// Failure rate above which the rollback advisory is emitted (strict)
pub const ROLLBACK_ADVISORY_THRESHOLD: f64 = 0.5;

/// Validate a requested concurrency against the allowed range.
pub(crate) fn validate_concurrency(value: usize) -> Result<usize> {
    if !(1..=MAX_CONCURRENCY).contains(&value) {
        return Err(TasklaneError::validation(
            "concurrency",
            format!("concurrency must be between 1 and {}", MAX_CONCURRENCY),
        ));
    }
    Ok(value)
}
