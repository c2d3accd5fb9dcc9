use crate::core::error::Result;
use crate::core::results::{Report, ReportFormat};
use crate::core::traits::ReportWriter;

use super::csv_field;

/// One row per match, plus one row per failed task.
pub struct CsvWriter;

impl ReportWriter for CsvWriter {
    fn render(&self, report: &Report) -> Result<String> {
        let mut out = String::from("target_url,source,status,pattern,value\n");

        for finding in &report.findings {
            for entry in &finding.scan.matches {
                for matched in &entry.matches {
                    out.push_str(&format!(
                        "{},{},ok,{},{}\n",
                        csv_field(&finding.task.target_url),
                        finding.task.source.name(),
                        csv_field(&entry.pattern),
                        csv_field(matched),
                    ));
                }
            }
        }

        for failure in &report.failures {
            out.push_str(&format!(
                "{},{},error,,{}\n",
                csv_field(&failure.task.target_url),
                failure.task.source.name(),
                csv_field(&failure.error.to_string()),
            ));
        }

        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FetchErrorKind;
    use crate::core::results::{Failure, FetchTask, Finding, PatternMatches, ScanResult};
    use crate::sources::CacheSource;

    #[test]
    fn one_row_per_match_and_failure() {
        let mut report = Report::new();
        report.findings.push(Finding {
            task: FetchTask::new("http://example.com", CacheSource::Wayback),
            scan: ScanResult {
                matches: vec![
                    PatternMatches {
                        pattern: "Email Addresses".to_string(),
                        matches: vec!["a@b.com".to_string(), "c@d.com".to_string()],
                    },
                    PatternMatches {
                        pattern: "Passwords".to_string(),
                        matches: vec![],
                    },
                ],
            },
        });
        report.failures.push(Failure {
            task: FetchTask::new("http://other.example", CacheSource::GoogleCache),
            error: FetchErrorKind::NotFound,
        });

        let rendered = CsvWriter.render(&report).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "target_url,source,status,pattern,value");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "http://example.com,wayback,ok,Email Addresses,a@b.com");
        assert_eq!(lines[2], "http://example.com,wayback,ok,Email Addresses,c@d.com");
        assert_eq!(
            lines[3],
            "http://other.example,google,error,,no cached copy found"
        );
    }
}
