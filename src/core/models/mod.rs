//! Domain models shared across pipelines, the workspace client, and reports

mod reference;
mod row;
mod task;

pub use reference::{Assignee, NamedRef, ReferenceConfig};
pub use row::{ResolvedRow, RowError, TaskPreview};
pub use task::{Priority, Task, TaskChanges, TaskPayload};
