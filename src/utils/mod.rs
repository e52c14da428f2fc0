//! Utility modules for tasklane
//!
//! ## Module Organization
//!
//! - **error**: Error handling and the crate-wide `Result` alias
//! - **ids**: Batch operation identifier generation
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod ids;
pub mod logging;

// Re-export commonly used types for convenience
pub use error::{Result, TasklaneError};
pub use ids::operation_id;
pub use logging::init_tracing;
