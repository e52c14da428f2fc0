//! In-memory workspace double
//!
//! Implements `TaskRemote` against fixture data, with per-title and per-id
//! failure scripting, call counters, and an in-flight high-water mark for
//! concurrency assertions. All factories create real objects, not mocks.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tasklane_rs::core::models::{ReferenceConfig, Task, TaskChanges, TaskPayload};
use tasklane_rs::core::workspace::TaskRemote;
use tasklane_rs::ApiError;

/// Scriptable in-memory workspace
pub struct FakeRemote {
    reference: ReferenceConfig,
    fail_titles: HashSet<String>,
    fail_ids: HashSet<String>,
    latency: Option<Duration>,
    seq: AtomicUsize,
    created: Mutex<Vec<Task>>,
    updated: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    reference_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeRemote {
    /// A remote over the standard fixture reference data
    pub fn new() -> Self {
        Self {
            reference: super::fixtures::reference_config(),
            fail_titles: HashSet::new(),
            fail_ids: HashSet::new(),
            latency: None,
            seq: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            reference_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Swap in different reference data
    pub fn with_reference(mut self, reference: ReferenceConfig) -> Self {
        self.reference = reference;
        self
    }

    /// Reject any create whose payload carries this title
    pub fn fail_title(mut self, title: impl Into<String>) -> Self {
        self.fail_titles.insert(title.into());
        self
    }

    /// Reject any update, delete, or fetch for this task id
    pub fn fail_id(mut self, id: impl Into<String>) -> Self {
        self.fail_ids.insert(id.into());
        self
    }

    /// Sleep this long inside every call, to force overlap
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    // ==================== Observation ====================

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn reference_calls(&self) -> usize {
        self.reference_calls.load(Ordering::SeqCst)
    }

    /// Titles of every successfully created task, in creation order
    pub fn created_titles(&self) -> Vec<String> {
        self.created.lock().iter().map(|t| t.title.clone()).collect()
    }

    /// Ids of every successfully deleted task
    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().clone()
    }

    /// Ids of every successfully updated task
    pub fn updated_ids(&self) -> Vec<String> {
        self.updated.lock().clone()
    }

    /// Highest number of calls ever in flight at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn task_from_payload(&self, payload: &TaskPayload) -> Task {
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        Task {
            id: format!("task-{}", n),
            title: payload.title.clone(),
            description: payload.description.clone(),
            board_id: payload.board_id.clone(),
            status_id: payload.status_id.clone(),
            priority: payload.priority,
            tag_ids: payload.tag_ids.clone(),
            assignee_id: payload.assignee_id.clone(),
            due_at: payload.due_at,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for FakeRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRemote for FakeRemote {
    async fn create_task(&self, payload: &TaskPayload) -> Result<Task, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.enter();
        self.pause().await;

        let result = if self.fail_titles.contains(&payload.title) {
            Err(ApiError::InvalidRequest {
                message: format!("create rejected for \"{}\"", payload.title),
            })
        } else {
            let task = self.task_from_payload(payload);
            self.created.lock().push(task.clone());
            Ok(task)
        };

        self.exit();
        result
    }

    async fn update_task(&self, id: &str, changes: &TaskChanges) -> Result<Task, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.enter();
        self.pause().await;

        let result = if self.fail_ids.contains(id) {
            Err(ApiError::NotFound {
                resource: format!("task {}", id),
            })
        } else {
            self.updated.lock().push(id.to_string());
            let now = Utc::now();
            Ok(Task {
                id: id.to_string(),
                title: changes
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Task {}", id)),
                description: changes.description.clone(),
                board_id: changes
                    .board_id
                    .clone()
                    .unwrap_or_else(|| "board-1".to_string()),
                status_id: changes.status_id.clone(),
                priority: changes.priority,
                tag_ids: changes.tag_ids.clone().unwrap_or_default(),
                assignee_id: changes.assignee_id.clone(),
                due_at: changes.due_at,
                created_at: now,
                updated_at: now,
            })
        };

        self.exit();
        result
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.enter();
        self.pause().await;

        let result = if self.fail_ids.contains(id) {
            Err(ApiError::NotFound {
                resource: format!("task {}", id),
            })
        } else {
            self.deleted.lock().push(id.to_string());
            Ok(())
        };

        self.exit();
        result
    }

    async fn fetch_task(&self, id: &str) -> Result<Task, ApiError> {
        self.enter();
        self.pause().await;

        let result = if self.fail_ids.contains(id) {
            Err(ApiError::NotFound {
                resource: format!("task {}", id),
            })
        } else {
            self.created
                .lock()
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound {
                    resource: format!("task {}", id),
                })
        };

        self.exit();
        result
    }

    async fn fetch_reference_config(&self) -> Result<ReferenceConfig, ApiError> {
        self.reference_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reference.clone())
    }
}
