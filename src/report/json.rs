use serde_json::json;

use crate::core::error::Result;
use crate::core::results::{Report, ReportFormat};
use crate::core::traits::ReportWriter;

pub struct JsonWriter;

impl ReportWriter for JsonWriter {
    fn render(&self, report: &Report) -> Result<String> {
        let document = json!({
            "generated_at": report.generated_at,
            "summary": report.summary(),
            "findings": report.findings,
            "failures": report.failures,
        });
        Ok(serde_json::to_string_pretty(&document)?)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
