//! Workspace API boundary
//!
//! Everything that talks to the remote workspace lives here: the
//! [`TaskRemote`] trait the pipelines depend on, the reqwest-backed
//! [`WorkspaceClient`], the [`ReferenceCache`] in front of the reference
//! configuration endpoint, and the [`ApiError`] taxonomy for remote
//! failures.

mod cache;
mod client;
mod error;
mod remote;

pub use cache::{REFERENCE_CACHE_TTL, ReferenceCache};
pub use client::WorkspaceClient;
pub use error::ApiError;
pub use remote::TaskRemote;

#[cfg(test)]
pub use remote::MockTaskRemote;
