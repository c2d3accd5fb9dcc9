use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::FetchErrorKind;
use crate::sources::CacheSource;

/// One fetch attempt: a target URL paired with the cache source to query.
///
/// The (target_url, source) pair is the fingerprint that keys the final
/// report; the orchestrator never dispatches the same pair twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchTask {
    pub target_url: String,
    pub source: CacheSource,
}

impl FetchTask {
    pub fn new(target_url: impl Into<String>, source: CacheSource) -> Self {
        Self {
            target_url: target_url.into(),
            source,
        }
    }

    /// The report key for this task.
    pub fn fingerprint(&self) -> (String, CacheSource) {
        (self.target_url.clone(), self.source.clone())
    }
}

/// What came back from a single fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchOutcome {
    Content(String),
    Failed(FetchErrorKind),
}

impl FetchOutcome {
    pub fn is_transient_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed(kind) if kind.is_transient())
    }
}

/// Produced exactly once per [`FetchTask`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    pub task: FetchTask,
    pub outcome: FetchOutcome,
}

impl FetchResult {
    pub fn content(task: FetchTask, body: String) -> Self {
        Self {
            task,
            outcome: FetchOutcome::Content(body),
        }
    }

    pub fn failure(task: FetchTask, kind: FetchErrorKind) -> Self {
        Self {
            task,
            outcome: FetchOutcome::Failed(kind),
        }
    }
}

/// All matches for a single pattern within one block of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatches {
    pub pattern: String,
    pub matches: Vec<String>,
}

/// Scanner output for one successful fetch: every registry pattern appears,
/// in registry order, with its (possibly empty) match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub matches: Vec<PatternMatches>,
}

impl ScanResult {
    /// Matches recorded under `pattern`, if the pattern is known.
    pub fn get(&self, pattern: &str) -> Option<&[String]> {
        self.matches
            .iter()
            .find(|entry| entry.pattern == pattern)
            .map(|entry| entry.matches.as_slice())
    }

    pub fn total_matches(&self) -> usize {
        self.matches.iter().map(|entry| entry.matches.len()).sum()
    }
}

/// A successful fetch with its scan output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub task: FetchTask,
    pub scan: ScanResult,
}

/// A task that yielded no content, with the classified reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub task: FetchTask,
    pub error: FetchErrorKind,
}

/// Final output of a recon run.
///
/// Findings and failures are disjoint and together cover every dispatched
/// task; keys are unique per (target_url, source).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub findings: Vec<Finding>,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            findings: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Scan output for a (target_url, source) pair, if that task succeeded.
    pub fn scan_for(&self, target_url: &str, source: &CacheSource) -> Option<&ScanResult> {
        self.findings
            .iter()
            .find(|f| f.task.target_url == target_url && &f.task.source == source)
            .map(|f| &f.scan)
    }

    /// Failure reason for a (target_url, source) pair, if that task failed.
    pub fn failure_for(&self, target_url: &str, source: &CacheSource) -> Option<&FetchErrorKind> {
        self.failures
            .iter()
            .find(|f| f.task.target_url == target_url && &f.task.source == source)
            .map(|f| &f.error)
    }

    /// Derived totals, recomputed on every call.
    pub fn summary(&self) -> ReportSummary {
        let mut order: Vec<String> = Vec::new();
        let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();

        for finding in &self.findings {
            for entry in &finding.scan.matches {
                if !counts.contains_key(entry.pattern.as_str()) {
                    order.push(entry.pattern.clone());
                }
                *counts.entry(entry.pattern.as_str()).or_insert(0) += entry.matches.len();
            }
        }

        ReportSummary {
            total_tasks: self.findings.len() + self.failures.len(),
            succeeded: self.findings.len(),
            failed: self.failures.len(),
            total_matches_by_pattern: order
                .into_iter()
                .map(|pattern| {
                    let matches = counts[pattern.as_str()];
                    PatternCount { pattern, matches }
                })
                .collect(),
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCount {
    pub pattern: String,
    pub matches: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_tasks: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_matches_by_pattern: Vec<PatternCount>,
}

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
    Markdown,
}

impl ReportFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Markdown => "md",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_with(pattern: &str, matches: &[&str]) -> ScanResult {
        ScanResult {
            matches: vec![PatternMatches {
                pattern: pattern.to_string(),
                matches: matches.iter().map(|m| m.to_string()).collect(),
            }],
        }
    }

    #[test]
    fn summary_counts_findings_and_failures() {
        let mut report = Report::new();
        report.findings.push(Finding {
            task: FetchTask::new("http://a.example", CacheSource::Wayback),
            scan: scan_with("Email Addresses", &["a@b.com", "c@d.com"]),
        });
        report.findings.push(Finding {
            task: FetchTask::new("http://b.example", CacheSource::Wayback),
            scan: scan_with("Email Addresses", &["e@f.com"]),
        });
        report.failures.push(Failure {
            task: FetchTask::new("http://a.example", CacheSource::GoogleCache),
            error: FetchErrorKind::NotFound,
        });

        let summary = report.summary();
        assert_eq!(summary.total_tasks, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.total_matches_by_pattern,
            vec![PatternCount {
                pattern: "Email Addresses".to_string(),
                matches: 3
            }]
        );
    }

    #[test]
    fn summary_is_recomputed_not_cached() {
        let mut report = Report::new();
        assert_eq!(report.summary().total_tasks, 0);

        report.failures.push(Failure {
            task: FetchTask::new("http://a.example", CacheSource::Wayback),
            error: FetchErrorKind::Timeout,
        });
        assert_eq!(report.summary().total_tasks, 1);
        assert_eq!(report.summary().failed, 1);
    }

    #[test]
    fn report_format_parsing() {
        assert_eq!(ReportFormat::parse("json"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::parse("CSV"), Some(ReportFormat::Csv));
        assert_eq!(ReportFormat::parse("md"), Some(ReportFormat::Markdown));
        assert_eq!(ReportFormat::parse("xml"), None);
    }

    #[test]
    fn scan_result_lookup() {
        let scan = scan_with("API Keys", &["abcd1234567890efghij"]);
        assert_eq!(
            scan.get("API Keys"),
            Some(&["abcd1234567890efghij".to_string()][..])
        );
        assert_eq!(scan.get("Passwords"), None);
        assert_eq!(scan.total_matches(), 1);
    }
}
