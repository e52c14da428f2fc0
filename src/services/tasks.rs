//! Task service implementation

use crate::config::Config;
use crate::core::batch::{
    BatchOperation, BulkDeleteRequest, BulkUpdateRequest, DEFAULT_CONCURRENCY, ImportPipeline,
    ImportReport, ImportRequest, MutationPipeline, MutationReport, OperationRegistry,
};
use crate::core::models::{ReferenceConfig, Task, TaskChanges, TaskPayload};
use crate::core::workspace::{REFERENCE_CACHE_TTL, ReferenceCache, TaskRemote, WorkspaceClient};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Facade over batch pipelines, single-task calls, and operation tracking
pub struct TaskService {
    remote: Arc<dyn TaskRemote>,
    registry: Arc<OperationRegistry>,
    cache: Arc<ReferenceCache>,
    import: ImportPipeline,
    mutate: MutationPipeline,
    default_concurrency: usize,
}

impl TaskService {
    /// Create a service over any remote with stock settings
    pub fn new(remote: Arc<dyn TaskRemote>) -> Self {
        Self::with_parts(remote, REFERENCE_CACHE_TTL, DEFAULT_CONCURRENCY)
    }

    /// Create a service connected per the given configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = WorkspaceClient::new(&config.workspace)?;
        let remote: Arc<dyn TaskRemote> = Arc::new(client);

        Ok(Self::with_parts(
            remote,
            Duration::from_secs(config.cache.reference_ttl_secs),
            config.batch.default_concurrency,
        ))
    }

    fn with_parts(
        remote: Arc<dyn TaskRemote>,
        reference_ttl: Duration,
        default_concurrency: usize,
    ) -> Self {
        let registry = Arc::new(OperationRegistry::new());
        let cache = Arc::new(ReferenceCache::with_ttl(Arc::clone(&remote), reference_ttl));
        let import = ImportPipeline::new(
            Arc::clone(&remote),
            Arc::clone(&registry),
            Arc::clone(&cache),
        );
        let mutate = MutationPipeline::new(Arc::clone(&remote), Arc::clone(&registry));

        info!(default_concurrency, "task service initialized");

        Self {
            remote,
            registry,
            cache,
            import,
            mutate,
            default_concurrency,
        }
    }

    // ==================== Batch Operations ====================

    /// Import tasks from CSV, preview or for real
    pub async fn import_tasks(&self, mut request: ImportRequest) -> Result<ImportReport> {
        if request.concurrency.is_none() {
            request.concurrency = Some(self.default_concurrency);
        }
        self.import.run(request).await
    }

    /// Apply one set of changes to many tasks
    pub async fn bulk_update_tasks(
        &self,
        mut request: BulkUpdateRequest,
    ) -> Result<MutationReport> {
        if request.concurrency.is_none() {
            request.concurrency = Some(self.default_concurrency);
        }
        self.mutate.update(request).await
    }

    /// Delete many tasks by id
    pub async fn bulk_delete_tasks(
        &self,
        mut request: BulkDeleteRequest,
    ) -> Result<MutationReport> {
        if request.concurrency.is_none() {
            request.concurrency = Some(self.default_concurrency);
        }
        self.mutate.delete(request).await
    }

    /// Snapshot of a tracked batch operation, if it exists
    pub fn batch_status(&self, operation_id: &str) -> Option<BatchOperation> {
        self.registry.get(operation_id)
    }

    /// The shared operation registry
    pub fn registry(&self) -> &Arc<OperationRegistry> {
        &self.registry
    }

    /// Evict expired terminal operations on a timer
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let evicted = registry.sweep();
                if evicted > 0 {
                    debug!(evicted, "swept expired batch operations");
                }
            }
        })
    }

    // ==================== Reference Data ====================

    /// Workspace reference data, cached unless busted
    pub async fn reference_config(&self, cache_bust: bool) -> Result<Arc<ReferenceConfig>> {
        Ok(self.cache.fetch(cache_bust).await?)
    }

    // ==================== Single Task Operations ====================

    /// Create one task
    pub async fn create_task(&self, payload: &TaskPayload) -> Result<Task> {
        Ok(self.remote.create_task(payload).await?)
    }

    /// Update one task
    pub async fn update_task(&self, id: &str, changes: &TaskChanges) -> Result<Task> {
        Ok(self.remote.update_task(id, changes).await?)
    }

    /// Delete one task
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        Ok(self.remote.delete_task(id).await?)
    }

    /// Fetch one task
    pub async fn get_task(&self, id: &str) -> Result<Task> {
        Ok(self.remote.fetch_task(id).await?)
    }
}
