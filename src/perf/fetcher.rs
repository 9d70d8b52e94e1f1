//! Page fetchers.
//!
//! `PageFetcher` is the seam between the harness and the network: the
//! harness only decides what to measure and how to judge it, the fetcher
//! produces the measurements.

use async_trait::async_trait;
use url::Url;

use crate::perf::error::PerformanceError;
use crate::perf::metrics::{PageMeasurement, PassKind};
use crate::perf::session::PageSession;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Load a page once so server-side caches are warm.
    async fn load_url(&self, page_url: &Url) -> Result<(), PerformanceError>;

    /// Measure a load from a brand-new session.
    async fn measure_cold(&self, page_url: &Url) -> Result<PageMeasurement, PerformanceError>;

    /// Measure a second load from a session that already loaded the page.
    async fn measure_cached(&self, page_url: &Url) -> Result<PageMeasurement, PerformanceError>;

    /// Whether requests carry a signed-in identity.
    fn is_authenticated(&self) -> bool {
        false
    }
}

/// Fetcher backed by real HTTP sessions.
///
/// Every call starts from fresh sessions, so nothing measured for one page
/// leaks into the next.
#[derive(Debug, Clone, Default)]
pub struct HttpPageFetcher {
    auth_token: Option<String>,
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `Authorization: Bearer <token>` with every request to the
    /// measured page's origin.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn session(&self) -> Result<PageSession, PerformanceError> {
        PageSession::new(self.auth_token.clone())
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn load_url(&self, page_url: &Url) -> Result<(), PerformanceError> {
        let mut session = self.session()?;
        session.load(page_url, PassKind::Cold).await?;
        Ok(())
    }

    async fn measure_cold(&self, page_url: &Url) -> Result<PageMeasurement, PerformanceError> {
        let mut session = self.session()?;
        session.load(page_url, PassKind::Cold).await
    }

    async fn measure_cached(&self, page_url: &Url) -> Result<PageMeasurement, PerformanceError> {
        let mut session = self.session()?;
        session.load(page_url, PassKind::Cold).await?;
        session.load(page_url, PassKind::Cached).await
    }

    fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }
}
