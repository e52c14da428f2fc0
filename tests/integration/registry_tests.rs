//! Operation registry lifecycle tests

use std::sync::Arc;
use tasklane_rs::core::batch::OperationRegistry;
use tasklane_rs::{BatchKind, BatchStatus, FailedItem};

#[test]
fn full_lifecycle_is_reflected_in_snapshots() {
    let registry = OperationRegistry::new();
    let op = registry.create(BatchKind::Import, 4);

    assert_eq!(op.status, BatchStatus::Running);
    assert_eq!(op.progress.total, 4);
    assert_eq!(op.progress.percent, 0);

    assert!(registry.add_success(&op.id, "task-1".to_string()));
    assert!(registry.update_progress(&op.id, 1));
    assert!(registry.add_failure(&op.id, FailedItem::for_row(3, "boom".to_string())));
    assert!(registry.update_progress(&op.id, 2));

    let snapshot = registry.get(&op.id).unwrap();
    assert_eq!(snapshot.successful_ids, vec!["task-1"]);
    assert_eq!(snapshot.failed_items.len(), 1);
    assert_eq!(snapshot.progress.completed, 2);
    assert_eq!(snapshot.progress.percent, 50);
    assert!(snapshot.completed_at.is_none());

    assert!(registry.complete(&op.id, BatchStatus::Completed));
    let done = registry.get(&op.id).unwrap();
    assert!(done.is_terminal());
    assert!(done.completed_at.is_some());
    assert!(done.execution_time_ms.is_some());
}

#[test]
fn terminal_state_is_first_writer_wins() {
    let registry = OperationRegistry::new();
    let op = registry.create(BatchKind::Delete, 1);

    assert!(registry.complete(&op.id, BatchStatus::Failed));
    let first = registry.get(&op.id).unwrap();

    // A second completion changes nothing
    assert!(!registry.complete(&op.id, BatchStatus::Completed));
    let second = registry.get(&op.id).unwrap();
    assert_eq!(second.status, BatchStatus::Failed);
    assert_eq!(second.completed_at, first.completed_at);
    assert_eq!(second.execution_time_ms, first.execution_time_ms);
}

#[test]
fn unknown_operation_ids_are_ignored() {
    let registry = OperationRegistry::new();

    assert!(registry.get("batch_import_0_zzzzzz").is_none());
    assert!(!registry.update_progress("nope", 1));
    assert!(!registry.add_success("nope", "task-1".to_string()));
    assert!(!registry.complete("nope", BatchStatus::Completed));
}

#[test]
fn sweep_evicts_expired_terminal_operations_only() {
    let registry = OperationRegistry::with_retention(chrono::Duration::zero());

    let done = registry.create(BatchKind::Import, 1);
    registry.complete(&done.id, BatchStatus::Completed);
    let running = registry.create(BatchKind::Update, 1);

    let evicted = registry.sweep();

    assert_eq!(evicted, 1);
    assert!(registry.get(&done.id).is_none());
    assert!(
        registry.get(&running.id).is_some(),
        "running operations survive regardless of age"
    );
}

#[tokio::test]
async fn concurrent_writers_do_not_lose_updates() {
    let registry = Arc::new(OperationRegistry::new());
    let op = registry.create(BatchKind::Import, 32);

    let mut handles = Vec::new();
    for i in 0..32 {
        let registry = Arc::clone(&registry);
        let id = op.id.clone();
        handles.push(tokio::spawn(async move {
            registry.add_success(&id, format!("task-{}", i));
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let snapshot = registry.get(&op.id).unwrap();
    assert_eq!(snapshot.successful_ids.len(), 32);
}
