//! The single entry point tying the pipeline together.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::core::results::{FetchTask, Report};
use crate::core::traits::Transport;
use crate::fetch::{Orchestrator, DEFAULT_CONCURRENCY};
use crate::patterns::PatternRegistry;
use crate::report::aggregate;
use crate::sources::CacheSource;

/// Tuning for one recon run.
#[derive(Debug, Clone)]
pub struct ReconOptions {
    /// Maximum number of in-flight fetches.
    pub concurrency: usize,
    /// Timeout applied to each fetch independently.
    pub per_task_timeout: Duration,
    /// Optional ceiling on the whole run; tasks unresolved when it elapses
    /// are reported as cancelled.
    pub deadline: Option<Duration>,
    /// Retry timed-out / connection-level failures once.
    pub retry_transient: bool,
}

impl Default for ReconOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            per_task_timeout: Duration::from_secs(10),
            deadline: None,
            retry_transient: false,
        }
    }
}

/// Fetch every (target, source) combination, scan what came back, and
/// aggregate into a [`Report`].
///
/// Partial failure is the normal case: unreachable providers and missing
/// snapshots land in the report's failure list and never abort the run.
pub async fn run_recon(
    transport: Arc<dyn Transport>,
    targets: &[String],
    sources: &[CacheSource],
    registry: &PatternRegistry,
    options: &ReconOptions,
) -> Report {
    let mut seen = HashSet::new();
    let mut tasks = Vec::new();
    for target in targets {
        for source in sources {
            let task = FetchTask::new(target.clone(), source.clone());
            if seen.insert(task.fingerprint()) {
                tasks.push(task);
            }
        }
    }

    info!(
        tasks = tasks.len(),
        concurrency = options.concurrency,
        "dispatching fetch tasks"
    );

    let orchestrator = Orchestrator::new(transport, options.concurrency, options.per_task_timeout)
        .with_retry(options.retry_transient);
    let results = orchestrator.run(tasks, options.deadline).await;

    aggregate(results, registry)
}
