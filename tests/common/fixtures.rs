//! Test fixtures and data factories
//!
//! CSV samples and reference data with stable, predictable ids so tests
//! can assert on resolution results.

use tasklane_rs::core::models::Assignee;
use tasklane_rs::{ImportRequest, NamedRef, ReferenceConfig};

/// A workspace with two boards, three statuses, three tags, and two members
pub fn reference_config() -> ReferenceConfig {
    ReferenceConfig {
        boards: vec![
            NamedRef::new("board-1", "Sprint 1"),
            NamedRef::new("board-2", "Backlog"),
        ],
        statuses: vec![
            NamedRef::new("status-1", "To Do"),
            NamedRef::new("status-2", "In Progress"),
            NamedRef::new("status-3", "Done"),
        ],
        tags: vec![
            NamedRef::new("tag-1", "bug"),
            NamedRef::new("tag-2", "urgent"),
            NamedRef::new("tag-3", "backend"),
        ],
        assignees: vec![
            Assignee {
                id: "user-1".to_string(),
                name: "Ada Park".to_string(),
                email: "ada@example.com".to_string(),
            },
            Assignee {
                id: "user-2".to_string(),
                name: "Riley Chen".to_string(),
                email: "riley@example.com".to_string(),
            },
        ],
    }
}

/// Five data rows: three valid, one missing its title (row 4), one with a
/// bad priority (row 5)
pub fn sample_csv() -> String {
    [
        "title,description,status,priority,tags,assignee,due_date",
        "Fix login bug,Broken on Safari,To Do,high,\"bug,urgent\",Ada Park,2026-09-01",
        "Write release notes,,In Progress,medium,,riley@example.com,",
        ",No title on this one,To Do,high,,,",
        "Update dependencies,,To Do,someday,,,",
        "Polish docs,,Done,low,backend,,2026-09-15",
    ]
    .join("\n")
}

/// A header plus `rows` minimal valid data rows
pub fn csv_of_size(rows: usize) -> String {
    let mut csv = String::with_capacity(32 + rows * 16);
    csv.push_str("title,priority\n");
    for i in 1..=rows {
        csv.push_str(&format!("Task {},medium\n", i));
    }
    csv
}

/// Preview import of the given CSV into Sprint 1
pub fn preview_request(csv: impl Into<String>) -> ImportRequest {
    ImportRequest {
        board: "Sprint 1".to_string(),
        csv_data: Some(csv.into()),
        ..Default::default()
    }
}

/// Executing import of the given CSV into Sprint 1
pub fn execute_request(csv: impl Into<String>) -> ImportRequest {
    ImportRequest {
        board: "Sprint 1".to_string(),
        csv_data: Some(csv.into()),
        validate_only: false,
        ..Default::default()
    }
}
