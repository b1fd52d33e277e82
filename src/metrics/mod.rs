//! Similarity metrics for suitability scoring
//!
//! Each metric compares a query (soil) vector against a reference (crop
//! requirement) vector and returns a score where higher means a better match.
//! The engine treats metrics as interchangeable strategies, so adding a new
//! catalog or a new way of comparing profiles never touches the engine.

pub mod cosine;
pub mod euclidean;
pub mod weighted_dot;

pub use cosine::Cosine;
pub use euclidean::Euclidean;
pub use weighted_dot::WeightedDot;

use crate::error::Result;
use crate::vector::AttributeVector;
use serde::{Deserialize, Serialize};

/// Pluggable scoring strategy
///
/// Implementations are pure and thread-safe so one metric can be shared by
/// concurrent scoring passes. Both vectors are guaranteed non-zero and of the
/// catalog's dimensionality by the time the engine calls `similarity`.
pub trait SimilarityMetric: Send + Sync {
    /// Stable identifier recorded on reports
    fn name(&self) -> &'static str;

    /// Check the metric's own parameters against the catalog dimensionality
    fn validate(&self, _dimensionality: usize) -> Result<()> {
        Ok(())
    }

    /// Check the query once before any entry is scored
    ///
    /// Fails with `ZeroMagnitude` when no comparison could be defined for
    /// this query, so a query-side problem is never blamed on catalog entries.
    fn validate_query(&self, query: &AttributeVector) -> Result<()> {
        if query.is_zero() {
            return Err(crate::error::SuitabilityError::zero_magnitude("query"));
        }
        Ok(())
    }

    /// Similarity between `query` and `reference`
    ///
    /// Returns `ZeroMagnitude` when the comparison is undefined for this pair.
    fn similarity(&self, query: &AttributeVector, reference: &AttributeVector) -> Result<f64>;
}

/// Metric selection as written in configuration files
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricConfig {
    #[default]
    Cosine,
    Euclidean,
    WeightedDot { weights: Vec<f64> },
}

impl MetricConfig {
    /// Instantiate the configured metric
    pub fn build(&self) -> Result<Box<dyn SimilarityMetric>> {
        Ok(match self {
            MetricConfig::Cosine => Box::new(Cosine),
            MetricConfig::Euclidean => Box::new(Euclidean),
            MetricConfig::WeightedDot { weights } => Box::new(WeightedDot::new(weights.clone())?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SuitabilityError;

    #[test]
    fn test_config_parsing() {
        let cfg: MetricConfig = serde_json::from_str(r#"{"kind": "cosine"}"#).unwrap();
        assert_eq!(cfg, MetricConfig::Cosine);

        let cfg: MetricConfig =
            serde_json::from_str(r#"{"kind": "weighted_dot", "weights": [1, 1, 1, 2]}"#).unwrap();
        assert_eq!(cfg, MetricConfig::WeightedDot { weights: vec![1.0, 1.0, 1.0, 2.0] });

        assert!(serde_json::from_str::<MetricConfig>(r#"{"kind": "manhattan"}"#).is_err());
    }

    #[test]
    fn test_build_names() {
        assert_eq!(MetricConfig::Cosine.build().unwrap().name(), "cosine");
        assert_eq!(MetricConfig::Euclidean.build().unwrap().name(), "euclidean");
        let weighted = MetricConfig::WeightedDot { weights: vec![1.0, 2.0] };
        assert_eq!(weighted.build().unwrap().name(), "weighted_dot");
    }

    #[test]
    fn test_build_rejects_bad_weights() {
        let cfg = MetricConfig::WeightedDot { weights: vec![1.0, -0.5] };
        assert_eq!(
            cfg.build().err(),
            Some(SuitabilityError::InvalidWeight { index: 1, value: -0.5 })
        );
    }
}
