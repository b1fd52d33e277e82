//! Euclidean-distance similarity
//!
//! sim(q, r) = 1 / (1 + ||q - r||)
//!
//! Unlike cosine this rewards matching absolute levels: a soil with half the
//! nutrients of a crop's profile scores poorly even if the proportions match.
//! Range is (0, 1], with 1 only for identical vectors.

use super::SimilarityMetric;
use crate::error::Result;
use crate::vector::{scaled_norm, AttributeVector};

#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl SimilarityMetric for Euclidean {
    fn name(&self) -> &'static str {
        "euclidean"
    }

    fn similarity(&self, query: &AttributeVector, reference: &AttributeVector) -> Result<f64> {
        let distance = scaled_norm(&query.difference(reference)?);
        Ok(1.0 / (1.0 + distance))
    }
}
