//! Attribute Vectors
//!
//! Fixed-length, non-negative measurements describing a soil sample or a
//! crop's ideal growing profile (nitrogen, phosphorus, potassium, moisture...).
//! Values are validated once at construction and never change afterwards.

use crate::error::{Result, SuitabilityError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Immutable attribute vector
///
/// Most profiles carry four attributes (N, P, K, water retention), so the
/// components live inline on the stack for the common case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct AttributeVector {
    components: SmallVec<[f64; 4]>,
}

impl AttributeVector {
    /// Build a vector, rejecting empty input and negative/non-finite values
    pub fn new(components: impl IntoIterator<Item = f64>) -> Result<Self> {
        let components: SmallVec<[f64; 4]> = components.into_iter().collect();

        if components.is_empty() {
            return Err(SuitabilityError::EmptyVector);
        }

        for (index, &value) in components.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(SuitabilityError::InvalidComponent { index, value });
            }
        }

        Ok(Self { components })
    }

    /// Number of attributes
    pub fn dimensionality(&self) -> usize {
        self.components.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.components
    }

    /// Euclidean norm
    ///
    /// Huge values do not overflow and tiny non-zero values do not
    /// underflow to zero.
    pub fn magnitude(&self) -> f64 {
        scaled_norm(&self.components)
    }

    /// Largest component
    pub fn max_component(&self) -> f64 {
        self.components.iter().fold(0.0, |max, &v| if v > max { v } else { max })
    }

    /// Components divided by the largest one, `None` for a zero vector
    ///
    /// Cosine-style metrics are scale invariant, so they work on these
    /// values, which all lie in [0, 1].
    pub(crate) fn unit_scaled(&self) -> Option<SmallVec<[f64; 4]>> {
        let max = self.max_component();
        if max == 0.0 {
            return None;
        }
        Some(self.components.iter().map(|v| v / max).collect())
    }

    /// True when every component is zero (similarity undefined)
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&v| v == 0.0)
    }

    /// Dot product with another vector of the same length
    pub fn dot(&self, other: &AttributeVector) -> Result<f64> {
        self.ensure_same_dimensionality(other)?;
        Ok(self
            .components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Per-attribute `other - self`
    pub fn difference(&self, other: &AttributeVector) -> Result<Vec<f64>> {
        self.ensure_same_dimensionality(other)?;
        Ok(self
            .components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| b - a)
            .collect())
    }

    pub(crate) fn ensure_same_dimensionality(&self, other: &AttributeVector) -> Result<()> {
        if self.dimensionality() != other.dimensionality() {
            return Err(SuitabilityError::DimensionMismatch {
                expected: self.dimensionality(),
                actual: other.dimensionality(),
            });
        }
        Ok(())
    }
}

/// Overflow-safe Euclidean norm of arbitrary finite values
///
/// Takes the plain sum of squares when it stays finite and normal, so
/// integer-valued inputs keep exact results; otherwise rescales by the
/// largest magnitude first.
pub(crate) fn scaled_norm(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().map(|v| v * v).sum();
    if sum.is_finite() && sum >= f64::MIN_POSITIVE {
        return libm::sqrt(sum);
    }

    let max = values.iter().fold(0.0_f64, |max, v| max.max(v.abs()));
    if max == 0.0 {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|v| (v / max) * (v / max)).sum();
    max * libm::sqrt(sum)
}

impl TryFrom<Vec<f64>> for AttributeVector {
    type Error = SuitabilityError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        AttributeVector::new(values)
    }
}

impl From<AttributeVector> for Vec<f64> {
    fn from(vector: AttributeVector) -> Self {
        vector.components.into_vec()
    }
}

impl fmt::Display for AttributeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
