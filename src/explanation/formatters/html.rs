use crate::explanation::types::{RenderableReport, SectionStyle};
use askama::Template;

/// Standalone HTML page for one report (`templates/report.html`)
#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    report: &'a RenderableReport,
}

/// HTML formatter for suitability reports
pub struct HtmlFormatter;

impl HtmlFormatter {
    /// Format report as standalone HTML with embedded CSS
    ///
    /// All report text is HTML-escaped by the template.
    pub fn format(report: &RenderableReport) -> Result<String, askama::Error> {
        ReportTemplate { report }.render()
    }
}
