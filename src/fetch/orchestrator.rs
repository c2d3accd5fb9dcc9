use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use crate::core::error::FetchErrorKind;
use crate::core::results::{FetchResult, FetchTask};
use crate::core::traits::Transport;
use crate::fetch::worker;

pub const DEFAULT_CONCURRENCY: usize = 5;

/// Fans fetch tasks out over a semaphore-bounded pool.
///
/// Every submitted task yields exactly one result. A slow task holds one
/// pool slot for at most its own timeout (plus one retry when enabled);
/// it never blocks other tasks from completing.
pub struct Orchestrator {
    transport: Arc<dyn Transport>,
    concurrency: usize,
    per_task_timeout: Duration,
    retry_transient: bool,
}

impl Orchestrator {
    pub fn new(transport: Arc<dyn Transport>, concurrency: usize, per_task_timeout: Duration) -> Self {
        Self {
            transport,
            concurrency: concurrency.max(1),
            per_task_timeout,
            retry_transient: false,
        }
    }

    /// Retry timed-out / connection-level failures once. `NotFound` and
    /// HTTP errors are never retried.
    pub fn with_retry(mut self, retry_transient: bool) -> Self {
        self.retry_transient = retry_transient;
        self
    }

    /// Run all tasks to completion, or until `deadline` elapses.
    ///
    /// Results complete in arrival order, not submission order. When the
    /// deadline passes, still-pending workers are aborted and their tasks
    /// reported as `Cancelled`; the returned vector always has one entry
    /// per submitted task.
    pub async fn run(
        &self,
        tasks: Vec<FetchTask>,
        deadline: Option<Duration>,
    ) -> Vec<FetchResult> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let started = Instant::now();

        let mut handles = Vec::with_capacity(tasks.len());
        for task in tasks {
            let transport = Arc::clone(&self.transport);
            let semaphore = Arc::clone(&semaphore);
            let timeout = self.per_task_timeout;
            let retry = self.retry_transient;
            let worker_task = task.clone();

            let handle = tokio::spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return FetchResult::failure(worker_task, FetchErrorKind::Cancelled)
                    }
                };

                let mut result = worker::fetch(transport.as_ref(), &worker_task, timeout).await;
                if retry && result.outcome.is_transient_failure() {
                    debug!(url = %worker_task.target_url, source = %worker_task.source,
                        "retrying transient failure");
                    result = worker::fetch(transport.as_ref(), &worker_task, timeout).await;
                }
                result
            });

            handles.push((task, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (task, handle) in handles {
            let remaining = deadline.map(|limit| limit.saturating_sub(started.elapsed()));

            match remaining {
                Some(remaining) if remaining.is_zero() => {
                    handle.abort();
                    warn!(url = %task.target_url, source = %task.source,
                        "deadline reached, cancelling task");
                    results.push(FetchResult::failure(task, FetchErrorKind::Cancelled));
                }
                Some(remaining) => {
                    let abort = handle.abort_handle();
                    match tokio::time::timeout(remaining, handle).await {
                        Ok(joined) => results.push(Self::unwrap_join(task, joined)),
                        Err(_) => {
                            abort.abort();
                            warn!(url = %task.target_url, source = %task.source,
                                "deadline reached, cancelling task");
                            results.push(FetchResult::failure(task, FetchErrorKind::Cancelled));
                        }
                    }
                }
                None => {
                    let joined = handle.await;
                    results.push(Self::unwrap_join(task, joined));
                }
            }
        }

        results
    }

    fn unwrap_join(
        task: FetchTask,
        joined: std::result::Result<FetchResult, tokio::task::JoinError>,
    ) -> FetchResult {
        match joined {
            Ok(result) => result,
            Err(e) => {
                error!(url = %task.target_url, source = %task.source,
                    "worker task failed to join: {e}");
                FetchResult::failure(task, FetchErrorKind::Cancelled)
            }
        }
    }
}
