pub mod config;
pub mod error;
pub mod results;
pub mod traits;

pub use config::Config;
pub use error::{FetchErrorKind, ReconError, Result, TransportError};
pub use results::{
    Failure, FetchOutcome, FetchResult, FetchTask, Finding, PatternCount, PatternMatches, Report,
    ReportFormat, ReportSummary, ScanResult,
};
pub use traits::{ReportWriter, Transport};
