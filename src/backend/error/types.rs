/**
 * Backend Error Types
 *
 * This module defines the error kinds surfaced at the HTTP boundary of the
 * collection editor. Domain and service errors are translated into one of
 * these kinds by the handlers; nothing is retried automatically.
 *
 * # Error Categories
 *
 * ## Not Found
 *
 * - `NotFound` - the collection does not exist
 * - `ProjectionUnavailable` - an update committed but the learner projection
 *   could not be re-fetched afterwards. Clients see the same 404 as for a
 *   missing collection, but this points at a lost race rather than a bad id
 *   and is logged as an error.
 *
 * ## Rights
 *
 * - `Unauthorized` - the caller is signed in but lacks rights, or is banned
 *
 * ## Input
 *
 * - `InvalidInput` - missing/mismatched version, malformed payload or
 *   change list, and validation errors raised by the update service
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::{SharedError, UserId};

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// The requested collection does not exist
    #[error("Not found: {message}")]
    NotFound {
        message: String,
    },

    /// Post-update projection fetch failed
    #[error("Projection unavailable for collection {collection_id}: {message}")]
    ProjectionUnavailable {
        collection_id: String,
        message: String,
    },

    /// Authenticated caller without sufficient rights
    ///
    /// `user_id` is carried for audit logging.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
        user_id: Option<UserId>,
    },

    /// Request the caller must fix before resubmitting
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    /// State management error (e.g., lock acquisition failure)
    #[error("State error: {message}")]
    StateError {
        message: String,
    },
}

impl BackendError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn projection_unavailable(collection_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProjectionUnavailable {
            collection_id: collection_id.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>, user_id: Option<UserId>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            user_id,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound`, `ProjectionUnavailable` - 404 Not Found
    /// - `Unauthorized` - 401 Unauthorized
    /// - `InvalidInput` - 400 Bad Request
    /// - `StateError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } | Self::ProjectionUnavailable { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::StateError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message sent to the client
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { .. } | Self::ProjectionUnavailable { .. } => {
                "The requested page could not be found.".to_string()
            }
            Self::Unauthorized { message, .. } => message.clone(),
            Self::InvalidInput { message } => message.clone(),
            Self::StateError { message } => message.clone(),
        }
    }
}

/// Translate service outcomes at the handler boundary
///
/// Validation failures and lost version races become `InvalidInput` with the
/// underlying message; a missing entity becomes `NotFound`.
impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { message, .. } => Self::invalid_input(message),
            SharedError::VersionConflict { expected, actual } => Self::invalid_input(
                crate::backend::editor::version::VersionError::Mismatch {
                    submitted: expected,
                    current: actual,
                }
                .to_string(),
            ),
            SharedError::NotFound { entity, id } => {
                Self::not_found(format!("{} {} not found", entity, id))
            }
            SharedError::SerializationError { message } => Self::state(message),
        }
    }
}
