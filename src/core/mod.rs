//! Core functionality
//!
//! Batch semantics, row handling, and the workspace API live here. The
//! service layer in [`crate::services`] wires these together.

pub mod batch;
pub mod models;
pub mod rows;
pub mod workspace;
