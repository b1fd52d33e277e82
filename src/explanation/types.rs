use serde::{Deserialize, Serialize};
use crate::explanation::advisory::{AdvisoryFlag, WeatherSummary};
use crate::explanation::i18n::Language;
use crate::explanation::schemes::SchemeRecord;

/// Presentation-ready report: ordered sections of key/value rows
///
/// Renderers (Markdown, HTML, PDF writers, UI tables) consume this without
/// re-deriving any score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderableReport {
    pub title: String,
    pub generated_at: String,
    pub language: Language,
    pub sections: Vec<ReportSection>,
}

impl RenderableReport {
    /// Find a section by its stable key ("subject", "ranking", ...)
    pub fn section(&self, key: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.key == key)
    }
}

/// One titled block of rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub key: String,       // "subject", "weather", "advisories", "ranking", ...
    pub heading: String,   // Localized title
    pub style: SectionStyle,
    pub rows: Vec<ReportRow>,
}

/// Layout hint for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStyle {
    /// Label/value pairs
    Fields,
    /// Two-column table
    Table,
    /// Highlighted notices
    Alerts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub key: String,
    pub value: String,
}

impl ReportRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Caller-supplied context for a report
///
/// Everything here comes from outside the scoring core: who the report is
/// for, where, and what the weather collaborator said.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub subject_name: String,
    pub location: String,
    pub soil_name: Option<String>,
    pub language: Language,
    /// Attribute names in vector order, used to explain gaps
    pub attribute_names: Vec<String>,
    pub advisories: Vec<AdvisoryFlag>,
    pub weather: Option<WeatherSummary>,
    /// Knowledge hub entries listed after the scores
    #[serde(default)]
    pub schemes: Vec<SchemeRecord>,
}
