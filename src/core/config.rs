use serde::{Deserialize, Serialize};

/// File-backed configuration. Every field has a default so a missing or
/// partial config file is never fatal; CLI flags override whatever the
/// file provides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum number of in-flight fetches.
    pub concurrency: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry timed-out / connection-refused fetches once.
    pub retry_transient: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            timeout_secs: 10,
            retry_transient: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            directory: "./output".to_string(),
        }
    }
}
