//! Error types for toolkit operations.

use thiserror::Error;

/// Errors raised by toolkit operations.
///
/// All variants are pre-flight validation failures: an operation either
/// completes with a fully valid result or fails here before allocating
/// any output. Degenerate numeric cases (zero vectors, zero variance,
/// empty clusters) are handled by epsilon guards and documented fallback
/// policies, not errors.
#[derive(Debug, Error)]
pub enum TerravecError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Result type for toolkit operations.
pub type Result<T> = std::result::Result<T, TerravecError>;

impl TerravecError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        TerravecError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Check that every embedding in a batch has the expected dimension.
pub(crate) fn check_dimensions(embeddings: &[Vec<f64>]) -> Result<usize> {
    let first = embeddings
        .first()
        .ok_or(TerravecError::EmptyInput("embeddings"))?;
    let dimension = first.len();
    for e in embeddings {
        if e.len() != dimension {
            return Err(TerravecError::DimensionMismatch {
                expected: dimension,
                got: e.len(),
            });
        }
    }
    Ok(dimension)
}
