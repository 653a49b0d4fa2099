//! Error handling for Gatherly
//!
//! This module defines the main error types used throughout the series
//! engine and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Gatherly series engine
#[derive(Error, Debug)]
pub enum GatherlyError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Occurrence not found: {occurrence_id}")]
    OccurrenceNotFound { occurrence_id: String },
}

/// Document store specific errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document not found: {collection}/{document_id}")]
    NotFound {
        collection: String,
        document_id: String,
    },

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Check whether the error signals a missing document
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type alias for Gatherly operations
pub type Result<T> = std::result::Result<T, GatherlyError>;

/// Result type alias for document store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl GatherlyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            GatherlyError::Validation(_) => true,
            GatherlyError::Store(StoreError::Backend(_)) => true,
            GatherlyError::Store(_) => false,
            GatherlyError::Config(_) => false,
            GatherlyError::Serialization(_) => false,
            GatherlyError::OccurrenceNotFound { .. } => false,
        }
    }
}
