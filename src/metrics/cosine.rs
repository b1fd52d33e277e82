//! Cosine similarity
//!
//! cos(q, r) = (q . r) / (||q|| x ||r||)
//!
//! Measures directional alignment of the nutrient profile independent of
//! absolute levels. For non-negative vectors the result lies in [0, 1].

use super::SimilarityMetric;
use crate::error::{Result, SuitabilityError};
use crate::vector::{scaled_norm, AttributeVector};

#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl SimilarityMetric for Cosine {
    fn name(&self) -> &'static str {
        "cosine"
    }

    fn similarity(&self, query: &AttributeVector, reference: &AttributeVector) -> Result<f64> {
        query.ensure_same_dimensionality(reference)?;

        // Both sides scaled into [0, 1]; the ratio is unchanged
        let q = query
            .unit_scaled()
            .ok_or_else(|| SuitabilityError::zero_magnitude("query"))?;
        let r = reference
            .unit_scaled()
            .ok_or_else(|| SuitabilityError::zero_magnitude("reference"))?;

        let dot: f64 = q.iter().zip(r.iter()).map(|(a, b)| a * b).sum();
        let norms = scaled_norm(&q) * scaled_norm(&r);

        // Rounding can push self-similarity a hair past 1.0
        Ok((dot / norms).clamp(-1.0, 1.0))
    }
}
