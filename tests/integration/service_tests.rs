//! Task service facade tests

use crate::common::{FakeRemote, csv_of_size};
use crate::common::fixtures::execute_request;
use std::sync::Arc;
use std::time::Duration;
use tasklane_rs::{Config, TaskChanges, TaskPayload, TaskService, TasklaneError};

#[tokio::test]
async fn single_task_calls_pass_through() {
    let remote = Arc::new(FakeRemote::new());
    let service = TaskService::new(Arc::clone(&remote));

    let created = service
        .create_task(&TaskPayload::new("One-off chore", "board-1"))
        .await
        .unwrap();
    assert_eq!(created.title, "One-off chore");

    let fetched = service.get_task(&created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);

    let changes = TaskChanges {
        title: Some("Renamed chore".to_string()),
        ..Default::default()
    };
    let updated = service.update_task(&created.id, &changes).await.unwrap();
    assert_eq!(updated.title, "Renamed chore");

    service.delete_task(&created.id).await.unwrap();
    assert_eq!(remote.deleted_ids(), vec![created.id]);
}

#[tokio::test]
async fn missing_task_surfaces_as_not_found() {
    let service = TaskService::new(Arc::new(FakeRemote::new().fail_id("ghost")));

    let err = service.get_task("ghost").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, TasklaneError::Api(_)));
}

#[tokio::test]
async fn reference_config_is_cached_until_busted() {
    let remote = Arc::new(FakeRemote::new());
    let service = TaskService::new(Arc::clone(&remote));

    let first = service.reference_config(false).await.unwrap();
    let second = service.reference_config(false).await.unwrap();
    assert_eq!(first.boards.len(), second.boards.len());
    assert_eq!(remote.reference_calls(), 1);

    service.reference_config(true).await.unwrap();
    assert_eq!(remote.reference_calls(), 2);
}

#[tokio::test]
async fn unknown_operations_have_no_status() {
    let service = TaskService::new(Arc::new(FakeRemote::new()));
    assert!(service.batch_status("batch_import_0_aaaaaa").is_none());
}

#[tokio::test]
async fn each_batch_run_is_tracked_in_the_registry() {
    let service = TaskService::new(Arc::new(FakeRemote::new()));
    assert!(service.registry().is_empty());

    service
        .import_tasks(execute_request(csv_of_size(2)))
        .await
        .unwrap();
    service
        .import_tasks(execute_request(csv_of_size(2)))
        .await
        .unwrap();

    assert_eq!(service.registry().len(), 2);
}

#[tokio::test]
async fn sweeper_runs_until_aborted() {
    let service = TaskService::new(Arc::new(FakeRemote::new()));

    let handle = service.spawn_sweeper(Duration::from_millis(5));
    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.abort();

    let join = handle.await;
    assert!(join.unwrap_err().is_cancelled());
}

#[tokio::test]
async fn from_config_builds_a_connected_service() {
    let mut config = Config::default();
    config.workspace.api_token = "tl_test".to_string();

    let service = TaskService::from_config(&config).unwrap();
    assert!(service.registry().is_empty());
}
