use std::time::Duration;

use tracing::debug;

use crate::core::error::{FetchErrorKind, TransportError};
use crate::core::results::{FetchOutcome, FetchResult, FetchTask};
use crate::core::traits::Transport;

/// Fetch one cached snapshot.
///
/// Total over its inputs: every failure mode is folded into the returned
/// [`FetchResult`], so callers never see an error. Retry policy lives in
/// the orchestrator, not here.
pub async fn fetch(transport: &dyn Transport, task: &FetchTask, timeout: Duration) -> FetchResult {
    let url = task.source.request_url(&task.target_url);
    debug!(url = %task.target_url, source = %task.source, "fetching cached copy");

    let outcome = match transport.get(&url, timeout).await {
        Ok(response) => {
            if response.is_not_found() {
                FetchOutcome::Failed(FetchErrorKind::NotFound)
            } else if !response.is_success() {
                FetchOutcome::Failed(FetchErrorKind::HttpError(response.status_code))
            } else if response.body.is_empty() {
                FetchOutcome::Failed(FetchErrorKind::EmptyContent)
            } else {
                FetchOutcome::Content(response.text())
            }
        }
        Err(TransportError::TimedOut) => FetchOutcome::Failed(FetchErrorKind::Timeout),
        Err(TransportError::Connection(reason)) => {
            FetchOutcome::Failed(FetchErrorKind::NetworkError(reason))
        }
    };

    if let FetchOutcome::Failed(kind) = &outcome {
        debug!(url = %task.target_url, source = %task.source, %kind, "fetch failed");
    }

    FetchResult {
        task: task.clone(),
        outcome,
    }
}
