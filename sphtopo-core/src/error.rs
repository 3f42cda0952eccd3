//! Error types for sphtopo

use thiserror::Error;

/// Main error type for sphtopo operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Regions requested before a successful segmentation")]
    NotSegmented,

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for sphtopo operations
pub type Result<T> = std::result::Result<T, Error>;
