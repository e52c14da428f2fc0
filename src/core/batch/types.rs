//! Batch operation types and request/report shapes

use crate::core::models::{RowError, TaskPreview};
use crate::utils::ids::operation_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Kinds of batch operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchKind {
    /// CSV import creating tasks
    Import,
    /// Bulk update over matched ids
    Update,
    /// Bulk delete over matched ids
    Delete,
}

impl BatchKind {
    /// Canonical lowercase name, used in operation ids
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for BatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle states of a batch operation
///
/// Transitions are monotonic: `running` moves to exactly one terminal
/// state and never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// Work is in flight
    Running,
    /// Terminal: every attempted item succeeded
    Completed,
    /// Terminal: at least one item failed, or the run never executed
    Failed,
}

impl BatchStatus {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Whether this is a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress counters for a batch operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    /// Items settled so far
    pub completed: usize,
    /// Items the operation was sized to
    pub total: usize,
    /// `round(100 * completed / total)`; 0 when total is 0. Deliberately
    /// not clamped, so an inconsistent caller-supplied count shows up as a
    /// percent above 100 instead of being masked.
    pub percent: u32,
}

impl BatchProgress {
    /// Fresh progress for a new operation
    pub fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
            percent: Self::percent_of(0, total),
        }
    }

    /// Percent rule shared by every progress update
    pub fn percent_of(completed: usize, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        ((completed as f64 / total as f64) * 100.0).round() as u32
    }
}

/// One failed item in a batch
///
/// Exactly one of `id` / `row_number` is populated: imports identify
/// failures by source row, updates and deletes by remote task id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedItem {
    /// Remote task id, for update/delete failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Source row number, for import failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<u32>,
    /// What went wrong
    pub error: String,
}

impl FailedItem {
    /// Failure attributed to a source row
    pub fn for_row(row_number: u32, error: impl Into<String>) -> Self {
        Self {
            id: None,
            row_number: Some(row_number),
            error: error.into(),
        }
    }

    /// Failure attributed to a remote task
    pub fn for_task(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            row_number: None,
            error: error.into(),
        }
    }
}

/// The unit of observability for one bulk job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOperation {
    /// Generated id: `batch_<kind>_<unix-millis>_<suffix>`
    pub id: String,
    /// What kind of job this tracks
    pub kind: BatchKind,
    /// Lifecycle state
    pub status: BatchStatus,
    /// Progress counters
    pub progress: BatchProgress,
    /// Ids of successfully mutated tasks, in completion order
    pub successful_ids: Vec<String>,
    /// Failed items, in completion order
    pub failed_items: Vec<FailedItem>,
    /// When the operation was registered
    pub started_at: DateTime<Utc>,
    /// When the operation reached a terminal state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Wall-clock duration, computed once at the terminal transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl BatchOperation {
    /// Create a fresh running operation sized to `total_items`
    pub fn new(kind: BatchKind, total_items: usize) -> Self {
        Self {
            id: operation_id(kind.as_str()),
            kind,
            status: BatchStatus::Running,
            progress: BatchProgress::new(total_items),
            successful_ids: Vec::new(),
            failed_items: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
            execution_time_ms: None,
        }
    }

    /// Whether the operation has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Request for a CSV task import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Target board name; resolved once and force-applied to every row
    pub board: String,
    /// Inline CSV text. Wins over `csv_path` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_data: Option<String>,
    /// Path to a CSV file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<PathBuf>,
    /// Optional CSV-header to canonical-field renames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_mapping: Option<HashMap<String, String>>,
    /// Preview without creating anything. Defaults to true so the safe
    /// path is the implicit one.
    #[serde(default = "default_true")]
    pub validate_only: bool,
    /// Parallel remote calls, 1 to 20; `None` takes the service default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    /// Keep going when individual creations fail
    #[serde(default = "default_true")]
    pub continue_on_error: bool,
    /// Skip the reference-config cache for this call
    #[serde(default)]
    pub cache_bust: bool,
}

impl Default for ImportRequest {
    fn default() -> Self {
        Self {
            board: String::new(),
            csv_data: None,
            csv_path: None,
            column_mapping: None,
            validate_only: true,
            concurrency: None,
            continue_on_error: true,
            cache_bust: false,
        }
    }
}

/// Result payload of an import call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    /// Registry id for later status lookups
    pub batch_operation_id: String,
    /// Data rows parsed
    pub total_rows: usize,
    /// Rows that passed validation and resolution
    pub valid_rows: usize,
    /// Rows diverted into `validation_errors`
    pub invalid_rows: usize,
    /// Every per-row error found during the full validation pass
    pub validation_errors: Vec<RowError>,
    /// First resolved rows, present only on validate-only calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Vec<TaskPreview>>,
    /// Tasks created remotely
    pub created_tasks: usize,
    /// Creation attempts that failed
    pub failed_tasks: usize,
    /// Ids of created tasks, in completion order
    pub created_ids: Vec<String>,
    /// Failed creations with row context. When the failure rate exceeds
    /// 50%, the rollback advisory is appended to the first entry's error
    /// text.
    pub failed_items: Vec<FailedItem>,
    /// End-to-end duration of the call
    pub execution_time_ms: u64,
}

/// Result payload of a bulk update or delete call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationReport {
    /// Registry id for later status lookups
    pub batch_operation_id: String,
    /// Distinct ids accepted at intake
    pub requested: usize,
    /// Tasks successfully mutated
    pub mutated: usize,
    /// Attempts that failed
    pub failed: usize,
    /// Failed items with task-id context
    pub failed_items: Vec<FailedItem>,
    /// End-to-end duration of the call
    pub execution_time_ms: u64,
}

fn default_true() -> bool {
    true
}
