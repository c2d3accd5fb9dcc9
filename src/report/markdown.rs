use crate::core::error::Result;
use crate::core::results::{Report, ReportFormat};
use crate::core::traits::ReportWriter;

pub struct MarkdownWriter;

impl ReportWriter for MarkdownWriter {
    fn render(&self, report: &Report) -> Result<String> {
        let summary = report.summary();
        let mut out = String::new();

        out.push_str("# Web Cache Recon Report\n\n");
        out.push_str(&format!(
            "Generated: {}\n\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        out.push_str("## Summary\n\n");
        out.push_str(&format!("- Tasks: {}\n", summary.total_tasks));
        out.push_str(&format!("- Succeeded: {}\n", summary.succeeded));
        out.push_str(&format!("- Failed: {}\n", summary.failed));
        if !summary.total_matches_by_pattern.is_empty() {
            out.push('\n');
            out.push_str("| Pattern | Matches |\n|---|---|\n");
            for count in &summary.total_matches_by_pattern {
                out.push_str(&format!("| {} | {} |\n", count.pattern, count.matches));
            }
        }

        if !report.findings.is_empty() {
            out.push_str("\n## Findings\n");
            for finding in &report.findings {
                out.push_str(&format!(
                    "\n### {} ({})\n\n",
                    finding.task.target_url,
                    finding.task.source.name()
                ));
                let mut any = false;
                for entry in &finding.scan.matches {
                    if entry.matches.is_empty() {
                        continue;
                    }
                    any = true;
                    out.push_str(&format!("- **{}**\n", entry.pattern));
                    for matched in &entry.matches {
                        out.push_str(&format!("  - `{}`\n", matched));
                    }
                }
                if !any {
                    out.push_str("No matches.\n");
                }
            }
        }

        if !report.failures.is_empty() {
            out.push_str("\n## Failures\n\n");
            for failure in &report.failures {
                out.push_str(&format!(
                    "- {} ({}): {}\n",
                    failure.task.target_url,
                    failure.task.source.name(),
                    failure.error
                ));
            }
        }

        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}
