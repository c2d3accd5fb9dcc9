//! # Cache Recon
//!
//! A concurrent toolkit for scanning cached web pages for exposed secrets.
//!
//! ## Features
//!
//! - **Multi-source**: Wayback Machine, Google Cache, custom URL templates
//! - **Concurrent**: bounded parallel fetching with Tokio, partial-failure
//!   tolerant
//! - **Pattern-based**: ordered registry of case-insensitive regex
//!   detectors, extendable with custom patterns
//! - **Typed failures**: every fetch outcome is classified, never thrown
//!
//! ## Architecture
//!
//! The pipeline is built from five pieces:
//!
//! - `PatternRegistry`: named regex detectors in deterministic order
//! - `fetch::worker`: one HTTP GET per (URL, source) pair with timeout and
//!   error classification
//! - `fetch::Orchestrator`: semaphore-bounded fan-out across all tasks
//! - `scanner::scan`: pure pattern-matching pass over fetched content
//! - `report::aggregate`: merges results into a single keyed [`Report`]
//!
//! ## Example
//!
//! ```rust
//! use cache_recon::patterns::PatternRegistry;
//! use cache_recon::scanner::scan;
//!
//! let registry = PatternRegistry::defaults();
//! let result = scan("contact me at a@b.com", &registry);
//!
//! assert_eq!(
//!     result.get("Email Addresses"),
//!     Some(&["a@b.com".to_string()][..])
//! );
//! ```

pub mod cli;
pub mod core;
pub mod fetch;
pub mod patterns;
pub mod recon;
pub mod report;
pub mod scanner;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    Config, Failure, FetchErrorKind, FetchOutcome, FetchResult, FetchTask, Finding, ReconError,
    Report, ReportFormat, ReportSummary, ReportWriter, Result, ScanResult, Transport,
};

pub use patterns::{load_custom, PatternRegistry, PatternSpec};
pub use recon::{run_recon, ReconOptions};
pub use sources::CacheSource;
pub use utils::CurlTransport;
