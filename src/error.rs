//! Error taxonomy for catalog loading and suitability scoring
//!
//! Every failure the core can produce is a distinct variant so callers can
//! decide how to present it (fatal, fallback, retry with another catalog).

use thiserror::Error;

/// Typed failure reasons for store, metric and engine operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SuitabilityError {
    /// Two catalog entries in one load share an id
    #[error("duplicate catalog id '{0}'")]
    DuplicateId(String),

    /// Vectors compared in one operation have different lengths
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Requested catalog entry is absent
    #[error("catalog entry '{0}' not found")]
    NotFound(String),

    /// No catalog has been loaded successfully yet
    #[error("catalog has not been loaded")]
    NotLoaded,

    /// Similarity is undefined for a zero-magnitude vector
    #[error("zero-magnitude vector: {subject}")]
    ZeroMagnitude { subject: String },

    /// A load was attempted with no entries
    #[error("catalog must contain at least one entry")]
    EmptyCatalog,

    /// An attribute vector was built from an empty sequence
    #[error("attribute vector must have at least one component")]
    EmptyVector,

    /// A component is negative, NaN or infinite
    #[error("invalid attribute value {value} at index {index}")]
    InvalidComponent { index: usize, value: f64 },

    /// A metric produced NaN or an infinite score
    #[error("metric '{metric}' produced non-finite score for '{entry_id}'")]
    NonFiniteScore { metric: String, entry_id: String },

    /// A metric weight is negative, NaN or infinite
    #[error("invalid metric weight {value} at index {index}")]
    InvalidWeight { index: usize, value: f64 },
}

impl SuitabilityError {
    pub(crate) fn zero_magnitude(subject: impl Into<String>) -> Self {
        SuitabilityError::ZeroMagnitude {
            subject: subject.into(),
        }
    }

    /// Whether this error only concerns a single catalog entry and can be
    /// recovered by omitting that entry from a report
    pub fn is_entry_local(&self) -> bool {
        matches!(self, SuitabilityError::ZeroMagnitude { .. })
    }
}

pub type Result<T> = std::result::Result<T, SuitabilityError>;
