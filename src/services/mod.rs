//! Services module
//!
//! Business logic over the workspace API. [`TaskService`] is the facade
//! most callers want.

pub mod tasks;

pub use tasks::TaskService;
