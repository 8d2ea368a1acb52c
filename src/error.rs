//! Error types for the HNSW index

use thiserror::Error;

/// Result type alias for HNSW operations
pub type Result<T> = std::result::Result<T, HnswError>;

/// Error types that can occur in HNSW operations.
///
/// All variants represent the same underlying failure class — an invalid
/// argument — split out only so `#[error(...)]` messages stay specific.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HnswError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("id {id} already present in the index")]
    DuplicateId { id: usize },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}
