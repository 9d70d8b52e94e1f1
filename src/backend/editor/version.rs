/**
 * Version Guard
 *
 * Optimistic concurrency check for collection edits. A client edits the
 * version it loaded; if the stored version has moved on, the edit is rejected
 * and the client must reload. There is no locking and no fuzzy matching.
 */

use thiserror::Error;

use crate::backend::error::BackendError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid PUT request: a version must be specified.")]
    Missing,

    #[error(
        "Trying to update version {current} of collection from version {submitted}, \
         which is out of date. Please reload the page and try again."
    )]
    Mismatch { submitted: u64, current: u64 },
}

/// Succeeds only when `submitted` is present and equal to `current`
pub fn require_valid_version(submitted: Option<u64>, current: u64) -> Result<(), VersionError> {
    match submitted {
        None => Err(VersionError::Missing),
        Some(submitted) if submitted != current => {
            Err(VersionError::Mismatch { submitted, current })
        }
        Some(_) => Ok(()),
    }
}

impl From<VersionError> for BackendError {
    fn from(err: VersionError) -> Self {
        BackendError::invalid_input(err.to_string())
    }
}
