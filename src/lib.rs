//! Crop Suitability Engine
//!
//! Scores a soil attribute vector against a catalog of crop requirement
//! profiles and assembles a ranked, renderable recommendation report.
//!
//! Module layout:
//! - `vector`: Validated, immutable attribute vectors
//! - `catalog/`: ProfileVectorStore, catalog tables, built-in presets
//! - `metrics/`: Pluggable similarity metrics (cosine, Euclidean, weighted dot)
//! - `scorer`: SuitabilityEngine (scoring, ranking, partial-failure handling)
//! - `explanation/`: ReportAssembler, advisories, Markdown/JSON/HTML output
//! - `config`: JSON configuration with preset fallbacks
//!
//! ```rust
//! use crop_suitability::{default_crops, AttributeVector, ProfileVectorStore, SuitabilityEngine};
//!
//! let store = ProfileVectorStore::with_entries(default_crops()?)?;
//! let alluvial = AttributeVector::new([90.0, 50.0, 45.0, 30.0])?;
//! let report = SuitabilityEngine::default().score(&alluvial, &store)?;
//! assert_eq!(report.top().map(|r| r.entry_id.as_str()), Some("wheat"));
//! # Ok::<(), crop_suitability::SuitabilityError>(())
//! ```

pub mod error;
pub mod vector;
pub mod catalog;
pub mod metrics;
pub mod scorer;
pub mod explanation;
pub mod config;

// Re-export commonly used types
pub use error::{Result, SuitabilityError};
pub use vector::AttributeVector;
pub use catalog::{default_crops, default_soils, CatalogEntry, CatalogSnapshot, ProfileVectorStore, SoilProfile};
pub use metrics::{Cosine, Euclidean, MetricConfig, SimilarityMetric, WeightedDot};
pub use scorer::{OmissionReason, OmittedEntry, ScoreResult, SuitabilityEngine, SuitabilityReport};
pub use explanation::{
    classify_weather, AdvisoryFlag, HtmlFormatter, JsonFormatter, Language, MarkdownFormatter,
    RenderableReport, ReportAssembler, ReportMetadata, SchemeRecord, WeatherSummary,
};
pub use config::{ResolvedConfig, ScoringConfig};
