//! Wayback Machine CDX index lookup.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info};

use crate::core::error::{ReconError, Result};
use crate::core::traits::Transport;

/// CDX query returning every archived URL under `domain` that was captured
/// with a 200 status. External contract; field order and filters must not
/// change.
pub fn cdx_url(domain: &str) -> String {
    format!(
        "http://web.archive.org/cdx/search/cdx?url={}/*&output=json&fl=original&filter=statuscode:200",
        domain
    )
}

/// Fetch archived URLs for a domain from the Wayback CDX index.
///
/// The response is a JSON array of rows where the first row is a header;
/// each remaining row holds the original URL in its first column.
/// Duplicates are removed preserving first-seen order. `max_urls` of 0
/// means unlimited.
pub async fn discover_urls(
    transport: &dyn Transport,
    domain: &str,
    timeout: Duration,
    max_urls: usize,
) -> Result<Vec<String>> {
    let url = cdx_url(domain);
    info!(domain, "querying Wayback CDX index");

    let response = transport
        .get(&url, timeout)
        .await
        .map_err(|e| ReconError::Discovery(format!("CDX request failed: {}", e)))?;

    if !response.is_success() {
        return Err(ReconError::Discovery(format!(
            "CDX index returned HTTP {}",
            response.status_code
        )));
    }

    let rows: Vec<Vec<String>> = serde_json::from_slice(&response.body)?;

    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    // First row is the CDX header ("original").
    for row in rows.into_iter().skip(1) {
        let Some(original) = row.into_iter().next() else {
            continue;
        };
        if seen.insert(original.clone()) {
            urls.push(original);
        }
        if max_urls != 0 && urls.len() >= max_urls {
            break;
        }
    }

    debug!(count = urls.len(), "CDX discovery complete");
    Ok(urls)
}
