//! Shared Error Types
//!
//! This module defines the error outcomes of the collection domain and its
//! services. They are typed so callers can tell "missing" apart from
//! "malformed" without catching anything broader than they mean to.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A change list or collection failed validation
//! - `NotFound` - The requested entity does not exist
//! - `VersionConflict` - The stored version moved on before a write landed
//!
//! # Usage
//!
//! ```rust
//! use collection_editor::shared::error::SharedError;
//!
//! let error = SharedError::validation("change_list", "Unknown command: frobnicate");
//! assert!(error.is_validation());
//! ```
use thiserror::Error;

/// Domain and service errors shared by the backend and the harness
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Entity lookup found nothing
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity looked up (e.g. "collection")
        entity: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// A write raced another write and lost
    #[error("Expected version {expected} but the stored version is {actual}")]
    VersionConflict {
        /// Version the writer based its changes on
        expected: u64,
        /// Version currently stored
        actual: u64,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
