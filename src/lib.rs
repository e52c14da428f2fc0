//! # tasklane-rs
//!
//! Bulk task operations for remote task workspaces: validated CSV imports,
//! id-driven bulk updates and deletes, and in-memory tracking of every
//! batch operation.
//!
//! ## Features
//!
//! - **Validate Everything First**: imports parse and check the whole file
//!   before a single network call, and report every problem at once
//! - **Preview By Default**: imports and bulk mutations are dry runs unless
//!   explicitly told to execute
//! - **Bounded Concurrency**: 1 to 20 requests in flight, with
//!   halt-on-first-failure as an option
//! - **Operation Tracking**: every batch run gets a registry record with
//!   live progress, per-item failures, and timing
//! - **Reference Caching**: boards, statuses, tags, and assignees are
//!   fetched once and reused for five minutes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tasklane_rs::{Config, ImportRequest, TaskService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let service = TaskService::from_config(&config)?;
//!
//!     // Preview first: parse and validate without creating anything
//!     let preview = service
//!         .import_tasks(ImportRequest {
//!             board: "Sprint 12".to_string(),
//!             csv_path: Some("tasks.csv".into()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{} of {} rows valid", preview.valid_rows, preview.total_rows);
//!
//!     // Then execute
//!     let report = service
//!         .import_tasks(ImportRequest {
//!             board: "Sprint 12".to_string(),
//!             csv_path: Some("tasks.csv".into()),
//!             validate_only: false,
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("created {} of {} tasks", report.created_tasks, report.valid_rows);
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

// Public module exports
pub mod config;
pub mod core;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use services::TaskService;
pub use utils::error::{Result, TasklaneError};

// Export batch functionality
pub use core::batch::{
    BatchKind, BatchOperation, BatchProgress, BatchStatus, BulkDeleteRequest, BulkUpdateRequest,
    FailedItem, ImportReport, ImportRequest, MutationReport,
};

// Export the task data model
pub use core::models::{
    Assignee, NamedRef, Priority, ReferenceConfig, RowError, Task, TaskChanges, TaskPayload,
    TaskPreview,
};

// Export workspace API plumbing
pub use core::workspace::{ApiError, TaskRemote, WorkspaceClient};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
