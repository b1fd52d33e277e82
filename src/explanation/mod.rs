//! Report assembly and rendering
//!
//! - `types.rs` - RenderableReport, sections and caller metadata
//! - `generator.rs` - ReportAssembler (scores + metadata -> sections)
//! - `advisory.rs` - Weather condition classification
//! - `i18n.rs` - English/Hindi report strings
//! - `schemes.rs` - Knowledge hub table (schemes CSV)
//! - `formatters/` - Markdown, JSON and HTML renderers

pub mod types;
pub mod advisory;
pub mod i18n;
pub mod schemes;
pub mod generator;
pub mod formatters;

pub use types::{RenderableReport, ReportMetadata, ReportRow, ReportSection, SectionStyle};
pub use advisory::{classify_weather, AdvisoryFlag, WeatherSummary};
pub use i18n::{Language, ReportStrings};
pub use schemes::{load_schemes, schemes_from_dataframe, SchemeRecord};
pub use generator::{format_percent, ReportAssembler};
pub use formatters::{HtmlFormatter, JsonFormatter, MarkdownFormatter};
