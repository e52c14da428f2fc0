//! Task records and mutation payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority vocabulary
///
/// Priorities are a fixed set, not workspace configuration, so they are
/// validated structurally rather than resolved against the reference config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Highest urgency
    Critical,
    /// High urgency
    High,
    /// Default urgency
    Medium,
    /// Low urgency
    Low,
}

impl Priority {
    /// Parse a priority from user input, case-insensitively
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for creating a task
///
/// All references are already resolved to stable ids; `board_id` is set by
/// the import pipeline from the job-level target, overriding any per-row
/// value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPayload {
    /// Task title (required)
    pub title: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target board id
    pub board_id: String,
    /// Workflow status id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<String>,
    /// Priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Tag ids
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<String>,
    /// Assignee id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Due timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
}

impl TaskPayload {
    /// Create a minimal payload with only a title and board
    pub fn new(title: impl Into<String>, board_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            board_id: board_id.into(),
            status_id: None,
            priority: None,
            tag_ids: Vec::new(),
            assignee_id: None,
            due_at: None,
        }
    }
}

/// A task record as returned by the workspace API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Remote task id
    pub id: String,
    /// Task title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Board the task lives on
    pub board_id: String,
    /// Workflow status id
    #[serde(default)]
    pub status_id: Option<String>,
    /// Priority
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Tag ids
    #[serde(default)]
    pub tag_ids: Vec<String>,
    /// Assignee id
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// Due timestamp
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Partial change set for updating tasks
///
/// `None` fields are left untouched by the remote. An all-`None` change set
/// is rejected at bulk-update intake.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskChanges {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New board id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    /// New status id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<String>,
    /// New priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Replacement tag ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<String>>,
    /// New assignee id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// New due timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
}

impl TaskChanges {
    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.board_id.is_none()
            && self.status_id.is_none()
            && self.priority.is_none()
            && self.tag_ids.is_none()
            && self.assignee_id.is_none()
            && self.due_at.is_none()
    }
}
