use crate::explanation::types::{RenderableReport, ReportSection, SectionStyle};

/// Markdown formatter for suitability reports
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format report as markdown
    pub fn format(report: &RenderableReport) -> String {
        let mut md = String::with_capacity(1024);

        md.push_str(&format!("# {}\n\n", report.title));
        md.push_str(&format!("*{}*\n\n", report.generated_at));

        for section in &report.sections {
            md.push_str(&format!("## {}\n\n", section.heading));
            match section.style {
                SectionStyle::Fields => Self::format_fields(&mut md, section),
                SectionStyle::Table => Self::format_table(&mut md, section),
                SectionStyle::Alerts => Self::format_alerts(&mut md, section),
            }
        }

        md
    }

    fn format_fields(md: &mut String, section: &ReportSection) {
        for row in &section.rows {
            md.push_str(&format!("- **{}:** {}\n", row.key, row.value));
        }
        md.push('\n');
    }

    fn format_table(md: &mut String, section: &ReportSection) {
        md.push_str("| | |\n");
        md.push_str("|---|---|\n");
        for row in &section.rows {
            md.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(&row.key),
                escape_cell(&row.value)
            ));
        }
        md.push('\n');
    }

    fn format_alerts(md: &mut String, section: &ReportSection) {
        for row in &section.rows {
            md.push_str(&format!("> {}\n\n", row.value));
        }
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
