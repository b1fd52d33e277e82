use crate::explanation::types::RenderableReport;

/// JSON formatter for suitability reports
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format report as pretty-printed JSON
    pub fn format(report: &RenderableReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }

    /// Format report as compact JSON (no whitespace)
    pub fn format_compact(report: &RenderableReport) -> Result<String, serde_json::Error> {
        serde_json::to_string(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explanation::i18n::Language;
    use crate::explanation::types::{ReportRow, ReportSection, SectionStyle};

    fn sample() -> RenderableReport {
        RenderableReport {
            title: "Smart Soil Report".to_string(),
            generated_at: "2026-10-18 06:30:00 UTC".to_string(),
            language: Language::Hindi,
            sections: vec![ReportSection {
                key: "ranking".to_string(),
                heading: "फसल उपयुक्तता".to_string(),
                style: SectionStyle::Table,
                rows: vec![ReportRow::new("1. Rice", "96.48% मेल")],
            }],
        }
    }

    #[test]
    fn test_format_json() {
        let json = JsonFormatter::format(&sample()).unwrap();
        assert!(json.contains("\"language\": \"hindi\""));
        assert!(json.contains("\"style\": \"table\""));
        assert!(json.contains("\"key\": \"1. Rice\""));
    }

    #[test]
    fn test_format_compact_round_trip() {
        let report = sample();
        let json = JsonFormatter::format_compact(&report).unwrap();
        assert!(!json.contains('\n'));
        let parsed: RenderableReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
