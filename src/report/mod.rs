//! Result aggregation and report rendering.

mod csv;
mod json;
mod markdown;

pub use csv::CsvWriter;
pub use json::JsonWriter;
pub use markdown::MarkdownWriter;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;

use crate::core::error::Result;
use crate::core::results::{Failure, FetchOutcome, FetchResult, Finding, Report, ReportFormat};
use crate::core::traits::ReportWriter;
use crate::patterns::PatternRegistry;
use crate::scanner::scan;

/// Merge fetch results into the final report.
///
/// Successful fetches are scanned; failures are recorded with their
/// classified reason and never scanned. Duplicate (target_url, source)
/// keys are skipped so report keys stay unique.
pub fn aggregate(results: Vec<FetchResult>, registry: &PatternRegistry) -> Report {
    let mut report = Report::new();
    let mut seen = HashSet::new();

    for result in results {
        if !seen.insert(result.task.fingerprint()) {
            warn!(url = %result.task.target_url, source = %result.task.source,
                "duplicate task result, skipping");
            continue;
        }

        match result.outcome {
            FetchOutcome::Content(content) => report.findings.push(Finding {
                scan: scan(&content, registry),
                task: result.task,
            }),
            FetchOutcome::Failed(kind) => report.failures.push(Failure {
                task: result.task,
                error: kind,
            }),
        }
    }

    report
}

/// Get a writer for the requested format.
pub fn get_writer(format: ReportFormat) -> Box<dyn ReportWriter> {
    match format {
        ReportFormat::Json => Box::new(JsonWriter),
        ReportFormat::Csv => Box::new(CsvWriter),
        ReportFormat::Markdown => Box::new(MarkdownWriter),
    }
}

/// Render `report` and write it under `directory` as
/// `recon_<timestamp>.<ext>`, creating the directory if needed.
pub fn write_report(report: &Report, format: ReportFormat, directory: &Path) -> Result<PathBuf> {
    let rendered = get_writer(format).render(report)?;

    fs::create_dir_all(directory)?;
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = directory.join(format!("recon_{}.{}", timestamp, format.extension()));
    fs::write(&path, rendered)?;

    Ok(path)
}

/// Escape a CSV field, quoting when needed.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FetchErrorKind;
    use crate::core::results::FetchTask;
    use crate::sources::CacheSource;

    fn registry() -> PatternRegistry {
        PatternRegistry::defaults()
    }

    fn success(url: &str, source: CacheSource, body: &str) -> FetchResult {
        FetchResult::content(FetchTask::new(url, source), body.to_string())
    }

    fn failed(url: &str, source: CacheSource, kind: FetchErrorKind) -> FetchResult {
        FetchResult::failure(FetchTask::new(url, source), kind)
    }

    #[test]
    fn aggregates_successes_and_failures() {
        let results = vec![
            success(
                "http://example.com",
                CacheSource::Wayback,
                "contact me at a@b.com",
            ),
            failed(
                "http://example.com",
                CacheSource::GoogleCache,
                FetchErrorKind::NotFound,
            ),
        ];

        let report = aggregate(results, &registry());
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(
            report
                .scan_for("http://example.com", &CacheSource::Wayback)
                .unwrap()
                .get("Email Addresses"),
            Some(&["a@b.com".to_string()][..])
        );
        assert_eq!(
            report.failure_for("http://example.com", &CacheSource::GoogleCache),
            Some(&FetchErrorKind::NotFound)
        );
    }

    #[test]
    fn duplicate_fingerprints_are_skipped() {
        let results = vec![
            success("http://example.com", CacheSource::Wayback, "a@b.com"),
            success("http://example.com", CacheSource::Wayback, "c@d.com"),
        ];

        let report = aggregate(results, &registry());
        assert_eq!(report.findings.len(), 1);
        assert_eq!(
            report
                .scan_for("http://example.com", &CacheSource::Wayback)
                .unwrap()
                .get("Email Addresses"),
            Some(&["a@b.com".to_string()][..])
        );
    }

    #[test]
    fn failures_are_not_scanned() {
        let results = vec![failed(
            "http://example.com",
            CacheSource::Wayback,
            FetchErrorKind::Timeout,
        )];
        let report = aggregate(results, &registry());
        assert!(report.findings.is_empty());
        assert_eq!(report.summary().failed, 1);
    }

    #[test]
    fn csv_field_escaping() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn write_report_places_file_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let report = aggregate(
            vec![success(
                "http://example.com",
                CacheSource::Wayback,
                "a@b.com",
            )],
            &registry(),
        );

        let path = write_report(&report, ReportFormat::Json, dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "json");

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["summary"]["succeeded"], 1);
    }
}
