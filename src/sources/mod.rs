//! Cache providers and their URL-templating rules.

pub mod wayback;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder expanded with the target URL in custom source templates.
pub const TEMPLATE_PLACEHOLDER: &str = "{url}";

/// A third-party service holding historical snapshots of web pages.
///
/// Each variant owns its request-URL construction, so the fetch worker
/// never formats provider strings itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheSource {
    Wayback,
    GoogleCache,
    /// Caller-supplied template containing a `{url}` placeholder.
    Custom(String),
}

impl CacheSource {
    /// Short provider label used in console output and report tables.
    pub fn name(&self) -> &'static str {
        match self {
            CacheSource::Wayback => "wayback",
            CacheSource::GoogleCache => "google",
            CacheSource::Custom(_) => "custom",
        }
    }

    /// Build the snapshot request URL for `target_url`.
    ///
    /// The Wayback and Google Cache shapes are external contracts and must
    /// not drift; the Wayback form deliberately leaves the timestamp slot
    /// empty, which resolves to the most recent capture.
    pub fn request_url(&self, target_url: &str) -> String {
        match self {
            CacheSource::Wayback => format!("http://web.archive.org/web/{}", target_url),
            CacheSource::GoogleCache => format!(
                "https://webcache.googleusercontent.com/search?q=cache:{}",
                target_url
            ),
            CacheSource::Custom(template) => template.replace(TEMPLATE_PLACEHOLDER, target_url),
        }
    }

    /// Parse a provider label from the CLI. `custom` requires a template
    /// and is constructed separately.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "wayback" => Some(CacheSource::Wayback),
            "google" => Some(CacheSource::GoogleCache),
            _ => None,
        }
    }
}

impl fmt::Display for CacheSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
