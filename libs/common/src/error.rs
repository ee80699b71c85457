//! Custom error types for the common library
//!
//! This module defines application-specific error types that can be used
//! throughout the application.

use serde_json::Error as JsonError;
use thiserror::Error;

/// Custom error type for document store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred while reading the document file
    #[error("Store read error: {0}")]
    Read(#[source] std::io::Error),

    /// The document file exists but does not parse
    #[error("Store parse error: {0}")]
    Parse(#[source] JsonError),

    /// The in-memory document could not be serialized
    #[error("Store serialize error: {0}")]
    Serialize(#[source] JsonError),

    /// Error occurred while writing the document back to disk
    #[error("Store persist error: {0}")]
    Persist(#[source] std::io::Error),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
