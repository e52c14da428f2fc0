//! Workspace reference configuration
//!
//! The reference configuration is the lookup universe for resolving
//! human-readable names (board, status, tag, assignee) to stable ids.
//! It is fetched from the workspace API and cached with a short TTL; each
//! pipeline invocation works against one immutable snapshot.

use serde::{Deserialize, Serialize};

/// An id/name pair for boards, statuses, and tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    /// Stable identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
}

impl NamedRef {
    /// Convenience constructor
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A workspace member tasks can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address, matchable as an alternative to the name
    pub email: String,
}

/// Snapshot of the workspace's resolvable references
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Boards tasks can target
    #[serde(default)]
    pub boards: Vec<NamedRef>,
    /// Workflow statuses
    #[serde(default)]
    pub statuses: Vec<NamedRef>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<NamedRef>,
    /// Assignable members
    #[serde(default)]
    pub assignees: Vec<Assignee>,
}
