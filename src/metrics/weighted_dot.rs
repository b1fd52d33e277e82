//! Weighted dot-product similarity
//!
//! sim(q, r) = sum(w_i q_i r_i) / (sqrt(sum(w_i q_i^2)) x sqrt(sum(w_i r_i^2)))
//!
//! A cosine in a space where each attribute is stretched by its weight, so an
//! agronomically important attribute (e.g. moisture for paddy crops) can count
//! for more than the others. Uniform weights reduce to plain cosine.

use super::SimilarityMetric;
use crate::error::{Result, SuitabilityError};
use crate::vector::AttributeVector;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedDot {
    weights: Vec<f64>,
    /// Weights divided by the largest one (all zero if every weight is zero)
    unit_weights: Vec<f64>,
}

impl WeightedDot {
    /// Weights must be finite and non-negative
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(SuitabilityError::InvalidWeight { index, value });
            }
        }

        let max = weights.iter().fold(0.0_f64, |max, &w| max.max(w));
        let unit_weights = if max > 0.0 {
            weights.iter().map(|w| w / max).collect()
        } else {
            vec![0.0; weights.len()]
        };

        Ok(Self {
            weights,
            unit_weights,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Operates on unit-scaled values, so nothing here can overflow
    fn weighted_norm(&self, v: &[f64]) -> f64 {
        libm::sqrt(
            v.iter()
                .zip(self.unit_weights.iter())
                .map(|(x, w)| w * x * x)
                .sum(),
        )
    }
}

impl SimilarityMetric for WeightedDot {
    fn name(&self) -> &'static str {
        "weighted_dot"
    }

    fn validate(&self, dimensionality: usize) -> Result<()> {
        if self.weights.len() != dimensionality {
            return Err(SuitabilityError::DimensionMismatch {
                expected: dimensionality,
                actual: self.weights.len(),
            });
        }
        Ok(())
    }

    fn validate_query(&self, query: &AttributeVector) -> Result<()> {
        let q = query
            .unit_scaled()
            .ok_or_else(|| SuitabilityError::zero_magnitude("query"))?;
        if self.weighted_norm(&q) == 0.0 {
            return Err(SuitabilityError::zero_magnitude("query (weighted)"));
        }
        Ok(())
    }

    fn similarity(&self, query: &AttributeVector, reference: &AttributeVector) -> Result<f64> {
        query.ensure_same_dimensionality(reference)?;
        self.validate(query.dimensionality())?;

        let q = query
            .unit_scaled()
            .ok_or_else(|| SuitabilityError::zero_magnitude("query"))?;
        let r = reference
            .unit_scaled()
            .ok_or_else(|| SuitabilityError::zero_magnitude("reference"))?;

        let dot: f64 = q
            .iter()
            .zip(r.iter())
            .zip(self.unit_weights.iter())
            .map(|((a, b), w)| w * a * b)
            .sum();

        let query_norm = self.weighted_norm(&q);
        if query_norm == 0.0 {
            return Err(SuitabilityError::zero_magnitude("query (weighted)"));
        }
        let reference_norm = self.weighted_norm(&r);
        if reference_norm == 0.0 {
            return Err(SuitabilityError::zero_magnitude("reference (weighted)"));
        }

        Ok((dot / (query_norm * reference_norm)).clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Cosine;
    use approx::assert_relative_eq;

    fn v(values: &[f64]) -> AttributeVector {
        AttributeVector::new(values.iter().copied()).unwrap()
    }

    #[test]
    fn test_uniform_weights_match_cosine() {
        let soil = v(&[70.0, 40.0, 60.0, 50.0]);
        let rice = v(&[100.0, 60.0, 40.0, 80.0]);
        let weighted = WeightedDot::new(vec![1.0; 4]).unwrap();
        assert_relative_eq!(
            weighted.similarity(&soil, &rice).unwrap(),
            Cosine.similarity(&soil, &rice).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_moisture_weighting() {
        // Doubling the moisture weight for the alluvial profile
        let metric = WeightedDot::new(vec![1.0, 1.0, 1.0, 2.0]).unwrap();
        let soil = v(&[90.0, 50.0, 45.0, 30.0]);
        assert_relative_eq!(
            metric.similarity(&soil, &v(&[80.0, 40.0, 40.0, 20.0])).unwrap(),
            0.996059,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            metric.similarity(&soil, &v(&[100.0, 60.0, 40.0, 80.0])).unwrap(),
            0.925499,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_weight_length_checked() {
        let metric = WeightedDot::new(vec![1.0, 1.0]).unwrap();
        assert_eq!(
            metric.validate(4),
            Err(SuitabilityError::DimensionMismatch { expected: 4, actual: 2 })
        );
    }

    #[test]
    fn test_zero_weighted_magnitude() {
        // Only the second attribute counts, and the query has none of it
        let metric = WeightedDot::new(vec![0.0, 1.0]).unwrap();
        let result = metric.similarity(&v(&[5.0, 0.0]), &v(&[1.0, 1.0]));
        assert!(matches!(result, Err(SuitabilityError::ZeroMagnitude { .. })));
    }

    #[test]
    fn test_extreme_weights_and_components() {
        let metric = WeightedDot::new(vec![1e300, 1e300, 1e300, 2e300]).unwrap();
        let soil = v(&[90e154, 50e154, 45e154, 30e154]);
        let score = metric.similarity(&soil, &v(&[80.0, 40.0, 40.0, 20.0])).unwrap();
        assert_relative_eq!(score, 0.996059, epsilon = 1e-6);

        let tiny = v(&[9e-170, 5e-170, 4.5e-170, 3e-170]);
        let score = metric.similarity(&tiny, &v(&[80.0, 40.0, 40.0, 20.0])).unwrap();
        assert_relative_eq!(score, 0.996059, epsilon = 1e-6);
    }

    #[test]
    fn test_query_check_uses_weights() {
        let metric = WeightedDot::new(vec![0.0, 1.0]).unwrap();
        assert_eq!(
            metric.validate_query(&v(&[5.0, 0.0])),
            Err(SuitabilityError::zero_magnitude("query (weighted)"))
        );
        assert!(metric.validate_query(&v(&[0.0, 1e-300])).is_ok());
    }

    #[test]
    fn test_invalid_weight() {
        assert_eq!(
            WeightedDot::new(vec![1.0, f64::NAN]).err().map(|e| e.to_string()),
            Some("invalid metric weight NaN at index 1".to_string())
        );
    }
}
