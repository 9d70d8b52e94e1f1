//! Performance harness errors

use thiserror::Error;

use crate::perf::metrics::{ByteCount, LoadTime, PassKind};

#[derive(Debug, Error)]
pub enum PerformanceError {
    /// Page key missing from the limits table
    #[error("No performance limits configured for page key '{0}'")]
    UnknownPageKey(String),

    #[error("{page_key} ({pass} pass): total page size {measured} > limit {limit}")]
    SizeLimitExceeded {
        page_key: String,
        pass: PassKind,
        measured: ByteCount,
        limit: ByteCount,
    },

    #[error("{page_key} ({pass} pass): load time {measured} > limit {limit}")]
    LoadTimeExceeded {
        page_key: String,
        pass: PassKind,
        measured: LoadTime,
        limit: LoadTime,
    },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Page {url} answered with status {status}")]
    PageStatus { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PerformanceError {
    /// Whether this is a limit violation rather than a harness failure
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(
            self,
            Self::SizeLimitExceeded { .. } | Self::LoadTimeExceeded { .. }
        )
    }
}
