//! Row-level types produced by validation and resolution
//!
//! Row numbers are 1-based over the physical file: the header is row 1 and
//! the first data row is row 2. Every error and failure record reported to
//! callers uses this numbering so rows can be found in the original file.

use super::task::{Priority, TaskPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validation or resolution error for one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Physical row number (header is row 1)
    pub row_number: u32,
    /// Offending field
    pub field: String,
    /// Human-readable message, with a near-match suggestion appended when
    /// one exists
    pub message: String,
}

impl RowError {
    /// Convenience constructor
    pub fn new(row_number: u32, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row_number,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// An input row whose references have all been resolved to ids
///
/// Ephemeral; lives only for the duration of one import call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedRow {
    /// Physical row number the payload came from
    pub row_number: u32,
    /// The creation payload
    pub task: TaskPayload,
}

/// Minimal projection of a resolved row shown in validate-only reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPreview {
    /// Physical row number
    pub row_number: u32,
    /// Task title
    pub title: String,
    /// Resolved status id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<String>,
    /// Priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Resolved tag ids
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<String>,
    /// Resolved assignee id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Due timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
}

impl From<&ResolvedRow> for TaskPreview {
    fn from(row: &ResolvedRow) -> Self {
        Self {
            row_number: row.row_number,
            title: row.task.title.clone(),
            status_id: row.task.status_id.clone(),
            priority: row.task.priority,
            tag_ids: row.task.tag_ids.clone(),
            assignee_id: row.task.assignee_id.clone(),
            due_at: row.task.due_at,
        }
    }
}
