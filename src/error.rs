//! Error types for interval embedding
//!
//! Every failure is raised at the point of detection. Callers branch on
//! [`EmbeddingError::kind`] rather than on message text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse failure category exposed to callers (and to JavaScript)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A required grid was neither passed nor cached
    MissingOperand,
    /// A grid's fixed dimension is violated
    DimensionMismatch,
    /// A scalar falls outside its inclusive bounds
    OutOfRange,
    /// pixels_per_bar / pixels_per_chunk / leading_silence are unusable
    InvalidConfiguration,
}

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("missing operand: {0} was neither passed nor cached")]
    MissingOperand(&'static str),

    #[error("wrong {grid} shape, second dimension must be {expected} (got {actual})")]
    DimensionMismatch {
        grid: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{grid} has {actual} rows, expected {expected}")]
    RowCountMismatch {
        grid: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{name} = {value} is out of range, must be between {min} and {max} (inclusive)")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl EmbeddingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmbeddingError::MissingOperand(_) => ErrorKind::MissingOperand,
            EmbeddingError::DimensionMismatch { .. } | EmbeddingError::RowCountMismatch { .. } => {
                ErrorKind::DimensionMismatch
            }
            EmbeddingError::OutOfRange { .. } => ErrorKind::OutOfRange,
            EmbeddingError::InvalidConfiguration(_) | EmbeddingError::Config(_) => {
                ErrorKind::InvalidConfiguration
            }
        }
    }

    /// Range check helper used for origins, velocities, pitches and descriptor fields
    pub(crate) fn check_range(name: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
        if value < min || value > max {
            return Err(EmbeddingError::OutOfRange { name, value, min, max });
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;
