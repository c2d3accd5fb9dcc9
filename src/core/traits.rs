use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::time::Duration;

use super::error::{Result, TransportError};
use super::results::{Report, ReportFormat};
use crate::utils::HttpResponse;

/// The HTTP seam between the fetch pipeline and the network.
///
/// Implementations must be safe to share across workers behind an `Arc`.
/// The timeout bounds the whole request; on expiry the implementation
/// returns [`TransportError::TimedOut`] with no resources left behind.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<HttpResponse, TransportError>;
}

/// Trait for rendering a recon report into an output format.
pub trait ReportWriter: Send + Sync {
    /// Render the report to a string in this writer's format.
    fn render(&self, report: &Report) -> Result<String>;

    /// The format this writer outputs.
    fn format(&self) -> ReportFormat;
}
