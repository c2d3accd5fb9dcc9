use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("invalid pattern on line {line}: {source}")]
    InvalidPattern {
        line: usize,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("URL discovery failed: {0}")]
    Discovery(String),
}

pub type Result<T> = std::result::Result<T, ReconError>;

/// Why a single fetch attempt did not yield content.
///
/// Every failure a worker can hit maps onto one of these variants; nothing
/// is raised past the worker boundary. `NotFound` (the provider has no
/// snapshot) and `NetworkError` (the provider was unreachable) are kept
/// distinct.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    #[error("request timed out")]
    Timeout,

    #[error("no cached copy found")]
    NotFound,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("HTTP {0}")]
    HttpError(u16),

    #[error("empty response body")]
    EmptyContent,

    #[error("cancelled before completion")]
    Cancelled,
}

impl FetchErrorKind {
    /// Transient failures are the only ones eligible for the orchestrator's
    /// single retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchErrorKind::Timeout | FetchErrorKind::NetworkError(_))
    }
}

/// Connection-level failure reported by a [`Transport`](crate::core::Transport)
/// implementation, before any HTTP status is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    TimedOut,

    #[error("connection failed: {0}")]
    Connection(String),
}
