//! Concurrency-bounded batch executor

use super::DEFAULT_CONCURRENCY;
use crate::core::workspace::ApiError;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Configuration for a bounded-parallel run
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum actions in flight at once
    pub concurrency: usize,
    /// Keep going after individual failures (default: true). When false,
    /// the first failure halts the run: actions not yet started are
    /// skipped without performing any work.
    pub continue_on_error: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            continue_on_error: true,
        }
    }
}

impl ExecutorConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set whether to continue on individual errors
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }
}

/// How one item ended
#[derive(Debug, Clone)]
pub enum ItemStatus<R> {
    /// The action returned `Ok`
    Succeeded(R),
    /// The action returned `Err`
    Failed(ApiError),
    /// Never started because an earlier failure halted the run
    Skipped,
}

/// Outcome of one item, attributed by the identity key it was submitted
/// with. Settle order carries no meaning.
#[derive(Debug, Clone)]
pub struct ItemOutcome<K, R> {
    /// Caller-supplied identity (row number, task id)
    pub key: K,
    /// How the item ended
    pub status: ItemStatus<R>,
    /// Time spent on this item
    pub duration: Duration,
}

impl<K, R> ItemOutcome<K, R> {
    /// Whether the item succeeded
    pub fn is_success(&self) -> bool {
        matches!(self.status, ItemStatus::Succeeded(_))
    }
}

/// Result of a bounded-parallel run
#[derive(Debug)]
pub struct BatchRun<K, R> {
    /// Per-item outcomes in settle order
    pub outcomes: Vec<ItemOutcome<K, R>>,
    /// Whether the run halted before attempting every item
    pub halted: bool,
    /// The failure that triggered the halt, when `halted` is true. With
    /// `continue_on_error` in-flight siblings may fail too; this is the
    /// first failure observed.
    pub first_error: Option<ApiError>,
}

impl<K, R> BatchRun<K, R> {
    /// Items that succeeded
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Items that failed
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ItemStatus::Failed(_)))
            .count()
    }

    /// Items never started
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ItemStatus::Skipped))
            .count()
    }
}

/// Drives keyed async actions with bounded parallelism.
///
/// Ordering guarantee: none. Outcomes are attributed to items solely by
/// key; pipelines must never rely on settle order matching submission
/// order.
pub struct BatchExecutor {
    config: ExecutorConfig,
}

impl BatchExecutor {
    /// Create a new executor
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Run `action` over every `(key, item)` pair with at most
    /// `concurrency` actions in flight.
    ///
    /// With `continue_on_error` set to false, the first `Err` raises a
    /// halt flag: queued items resolve as [`ItemStatus::Skipped`] without
    /// running, while actions already in flight settle normally.
    pub async fn execute<K, T, R, F, Fut>(&self, items: Vec<(K, T)>, action: F) -> BatchRun<K, R>
    where
        K: Clone + Send + 'static,
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(K, T) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = std::result::Result<R, ApiError>> + Send,
    {
        let config = self.config.clone();
        let halted = Arc::new(AtomicBool::new(false));

        let outcomes: Vec<ItemOutcome<K, R>> = stream::iter(items)
            .map(|(key, item)| {
                let action = action.clone();
                let halted = Arc::clone(&halted);
                let continue_on_error = config.continue_on_error;

                async move {
                    let start = Instant::now();

                    if halted.load(Ordering::SeqCst) {
                        return ItemOutcome {
                            key,
                            status: ItemStatus::Skipped,
                            duration: start.elapsed(),
                        };
                    }

                    match action(key.clone(), item).await {
                        Ok(value) => ItemOutcome {
                            key,
                            status: ItemStatus::Succeeded(value),
                            duration: start.elapsed(),
                        },
                        Err(err) => {
                            if !continue_on_error {
                                halted.store(true, Ordering::SeqCst);
                            }
                            ItemOutcome {
                                key,
                                status: ItemStatus::Failed(err),
                                duration: start.elapsed(),
                            }
                        }
                    }
                }
            })
            .buffer_unordered(config.concurrency)
            .collect()
            .await;

        let halted = halted.load(Ordering::SeqCst);
        let first_error = if halted {
            outcomes.iter().find_map(|outcome| match &outcome.status {
                ItemStatus::Failed(err) => Some(err.clone()),
                _ => None,
            })
        } else {
            None
        };

        BatchRun {
            outcomes,
            halted,
            first_error,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }
}

impl Default for BatchExecutor {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}
