//! The remote mutation seam

use super::error::ApiError;
use crate::core::models::{ReferenceConfig, Task, TaskChanges, TaskPayload};
use async_trait::async_trait;

/// Remote workspace operations the pipelines depend on.
///
/// Production code uses [`super::WorkspaceClient`]; tests plug in doubles.
/// Every method maps to a single remote call with no retry logic of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRemote: Send + Sync {
    /// Create one task
    async fn create_task(&self, payload: &TaskPayload) -> Result<Task, ApiError>;

    /// Apply a partial update to one task
    async fn update_task(&self, id: &str, changes: &TaskChanges) -> Result<Task, ApiError>;

    /// Delete one task
    async fn delete_task(&self, id: &str) -> Result<(), ApiError>;

    /// Fetch one task
    async fn fetch_task(&self, id: &str) -> Result<Task, ApiError>;

    /// Fetch the workspace reference configuration
    async fn fetch_reference_config(&self) -> Result<ReferenceConfig, ApiError>;
}
