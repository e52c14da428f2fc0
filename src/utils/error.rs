//! Error handling for tasklane
//!
//! This module defines the crate-wide error type and `Result` alias.
//! Remote-boundary errors live in [`crate::core::workspace::ApiError`] and
//! convert into [`TasklaneError::Api`] when they cross into caller-facing
//! results.

use crate::core::workspace::ApiError;
use thiserror::Error;

/// Result type alias for tasklane
pub type Result<T> = std::result::Result<T, TasklaneError>;

/// Main error type for tasklane
#[derive(Error, Debug)]
pub enum TasklaneError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request validation errors, carrying the offending field
    #[error("Validation error on `{field}`: {message}")]
    Validation {
        /// Name of the request field that failed validation
        field: String,
        /// Human-readable explanation
        message: String,
    },

    /// CSV structural errors; the whole parse fails as a group
    #[error("CSV parse failed: {}", .errors.join("; "))]
    Parse {
        /// Every structural error found in the input
        errors: Vec<String>,
    },

    /// Workspace API errors
    #[error("Workspace API error: {0}")]
    Api(#[from] ApiError),

    /// A batch run stopped early because `continue_on_error` was false.
    /// Partial state remains readable under `operation_id` in the registry.
    #[error("Batch operation {operation_id} aborted: {message}")]
    BatchAborted {
        /// Registry id of the aborted operation
        operation_id: String,
        /// The failure that triggered the halt
        message: String,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TasklaneError {
    /// Create a validation error for a named request field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error wraps a remote 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_not_found())
    }

    /// The request field carried by a validation error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
