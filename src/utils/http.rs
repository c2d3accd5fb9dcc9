use async_trait::async_trait;
use curl::easy::{Easy2, Handler, WriteError};
use std::time::Duration;

use crate::core::error::TransportError;
use crate::core::traits::Transport;

const USER_AGENT: &str = concat!("cache-recon/", env!("CARGO_PKG_VERSION"));

/// Collector for response data
struct Collector(Vec<u8>);

impl Handler for Collector {
    fn write(&mut self, data: &[u8]) -> std::result::Result<usize, WriteError> {
        self.0.extend_from_slice(data);
        Ok(data.len())
    }
}

/// Blocking HTTP client using libcurl.
pub struct HttpClient {
    timeout: Duration,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Perform a GET request
    pub fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> std::result::Result<HttpResponse, curl::Error> {
        let mut easy = Easy2::new(Collector(Vec::new()));

        easy.url(url)?;
        easy.timeout(self.timeout)?;
        easy.follow_location(true)?;
        easy.max_redirections(5)?;
        easy.ssl_verify_peer(true)?;
        easy.ssl_verify_host(true)?;

        let mut list = curl::easy::List::new();
        for (key, value) in headers {
            list.append(&format!("{}: {}", key, value))?;
        }
        easy.http_headers(list)?;

        easy.perform()?;

        let response_code = easy.response_code()?;
        let body = easy.get_ref().0.clone();

        Ok(HttpResponse {
            status_code: response_code as u16,
            body,
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status_code: u16, body: Vec<u8>) -> Self {
        Self { status_code, body }
    }

    /// Response body as text. Cached pages are frequently not valid UTF-8,
    /// so decoding is lossy rather than fallible.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }
}

/// Production [`Transport`]: libcurl driven from a blocking task so the
/// async workers never stall the runtime. One `Easy2` handle per request;
/// libcurl enforces the timeout and tears the connection down on expiry.
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<HttpResponse, TransportError> {
        let url = url.to_string();
        let result = tokio::task::spawn_blocking(move || {
            let client = HttpClient::with_timeout(timeout);
            client.get(&url, &[("User-Agent", USER_AGENT)])
        })
        .await
        .map_err(|e| TransportError::Connection(format!("task join error: {}", e)))?;

        result.map_err(|e| {
            if e.is_operation_timedout() {
                TransportError::TimedOut
            } else {
                TransportError::Connection(e.to_string())
            }
        })
    }
}
