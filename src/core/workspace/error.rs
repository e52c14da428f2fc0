//! Remote API error taxonomy
//!
//! HTTP status mapping:
//!
//! | Status    | Variant          |
//! |-----------|------------------|
//! | 401, 403  | `Authentication` |
//! | 404       | `NotFound`       |
//! | 429       | `RateLimit`      |
//! | 400, 422  | `InvalidRequest` |
//! | other     | `Upstream`       |
//!
//! Variants carry string context only so errors stay `Clone` and can be
//! attributed to individual batch items after an unordered run.

use thiserror::Error;

/// Error returned by workspace API calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Credential rejected (401/403)
    #[error("authentication failed: {message}")]
    Authentication {
        /// Remote error message
        message: String,
    },

    /// Resource does not exist (404); distinguished so single-item
    /// operations can report it precisely. Batch pipelines treat it like
    /// any other item failure.
    #[error("not found: {resource}")]
    NotFound {
        /// What was looked up
        resource: String,
    },

    /// Rate limited (429)
    #[error("rate limited: {message}")]
    RateLimit {
        /// Remote error message
        message: String,
        /// Seconds from the Retry-After header, when present
        retry_after: Option<u64>,
    },

    /// The remote rejected the request body (400/422)
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Remote error message
        message: String,
    },

    /// Any other non-success status
    #[error("upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Remote error message
        message: String,
    },

    /// Connection-level failure
    #[error("network error: {message}")]
    Network {
        /// Underlying error text
        message: String,
    },

    /// The request timed out client-side
    #[error("request timed out: {message}")]
    Timeout {
        /// Underlying error text
        message: String,
    },

    /// The response body could not be decoded
    #[error("invalid response payload: {message}")]
    Payload {
        /// Underlying error text
        message: String,
    },
}

impl ApiError {
    /// HTTP status associated with this error, when one exists
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RateLimit { .. } => Some(429),
            Self::InvalidRequest { .. } => Some(400),
            Self::Upstream { status, .. } => Some(*status),
            Self::Network { .. } | Self::Timeout { .. } | Self::Payload { .. } => None,
        }
    }

    /// Whether retrying the same request could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit { .. } | Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Upstream { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether this is a 404-class error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Map a transport-level reqwest error
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}
