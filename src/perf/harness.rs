//! Page performance harness.
//!
//! One harness instance covers one page key. `setup` resolves the page's
//! limits (an unknown key fails here, before anything is measured) and
//! warms the server with a throw-away load. Each check then takes its own
//! measurements and compares them with the configured limit.

use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::perf::config::{PerfTestConfig, PerformanceLimits};
use crate::perf::error::PerformanceError;
use crate::perf::fetcher::PageFetcher;
use crate::perf::metrics::{average_load_time, ByteCount, LoadTime, PageMeasurement, PassKind};

#[derive(Debug)]
pub struct PagePerformanceHarness<F> {
    page_key: String,
    page_url: Url,
    limits: PerformanceLimits,
    sample_count: usize,
    fetcher: F,
}

impl<F: PageFetcher> PagePerformanceHarness<F> {
    pub async fn setup(
        config: &PerfTestConfig,
        page_key: &str,
        fetcher: F,
    ) -> Result<Self, PerformanceError> {
        let limits = config.limits_for(page_key)?;
        let page = config.page(page_key)?;
        let page_url = config.page_url(page_key)?;

        if page.preload_options.login && !fetcher.is_authenticated() {
            return Err(PerformanceError::Config(format!(
                "page '{}' requires a signed-in session but no auth token was given",
                page_key
            )));
        }

        tracing::info!("[Perf] Warming {} ({})", page_key, page_url);
        fetcher.load_url(&page_url).await?;

        Ok(Self {
            page_key: page_key.to_string(),
            page_url,
            limits,
            sample_count: config.session_sample_count.max(1),
            fetcher,
        })
    }

    pub fn page_key(&self) -> &str {
        &self.page_key
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    pub fn limits(&self) -> &PerformanceLimits {
        &self.limits
    }

    /// Cold-pass transferred bytes stay within the uncached size limit.
    pub async fn test_total_page_size(&self) -> Result<PageMeasurement, PerformanceError> {
        let measurement = self.fetcher.measure_cold(&self.page_url).await?;
        self.check_size(measurement, PassKind::Cold, self.limits.max_cold_bytes)
    }

    /// Cached-pass transferred bytes stay within the cached size limit.
    pub async fn test_total_page_size_for_cached_session(
        &self,
    ) -> Result<PageMeasurement, PerformanceError> {
        let measurement = self.fetcher.measure_cached(&self.page_url).await?;
        self.check_size(measurement, PassKind::Cached, self.limits.max_cached_bytes)
    }

    /// Average cold-pass load time stays within the uncached time limit.
    pub async fn test_page_load_time(&self) -> Result<Duration, PerformanceError> {
        let mut samples = Vec::with_capacity(self.sample_count);
        for _ in 0..self.sample_count {
            samples.push(self.fetcher.measure_cold(&self.page_url).await?);
        }
        self.check_load_time(&samples, PassKind::Cold, self.limits.max_cold_load_time)
    }

    /// Average cached-pass load time stays within the cached time limit.
    pub async fn test_page_load_time_for_cached_session(
        &self,
    ) -> Result<Duration, PerformanceError> {
        let mut samples = Vec::with_capacity(self.sample_count);
        for _ in 0..self.sample_count {
            samples.push(self.fetcher.measure_cached(&self.page_url).await?);
        }
        self.check_load_time(&samples, PassKind::Cached, self.limits.max_cached_load_time)
    }

    /// Run the four checks in order, collecting every outcome.
    pub async fn run_all(&self) -> PerformanceReport {
        let mut checks = Vec::with_capacity(4);

        checks.push(CheckOutcome::from_result(
            "test_total_page_size",
            self.test_total_page_size()
                .await
                .map(|m| ByteCount(m.total_page_size_bytes()).to_string()),
        ));
        checks.push(CheckOutcome::from_result(
            "test_total_page_size_for_cached_session",
            self.test_total_page_size_for_cached_session()
                .await
                .map(|m| ByteCount(m.total_page_size_bytes()).to_string()),
        ));
        checks.push(CheckOutcome::from_result(
            "test_page_load_time",
            self.test_page_load_time()
                .await
                .map(|d| LoadTime(d).to_string()),
        ));
        checks.push(CheckOutcome::from_result(
            "test_page_load_time_for_cached_session",
            self.test_page_load_time_for_cached_session()
                .await
                .map(|d| LoadTime(d).to_string()),
        ));

        PerformanceReport {
            page_key: self.page_key.clone(),
            page_url: self.page_url.to_string(),
            checks,
        }
    }

    fn check_size(
        &self,
        measurement: PageMeasurement,
        pass: PassKind,
        limit: u64,
    ) -> Result<PageMeasurement, PerformanceError> {
        let measured = measurement.total_page_size_bytes();
        if measured > limit {
            tracing::warn!(
                "[Perf] {} {} pass size {} over limit {}",
                self.page_key,
                pass,
                ByteCount(measured),
                ByteCount(limit)
            );
            return Err(PerformanceError::SizeLimitExceeded {
                page_key: self.page_key.clone(),
                pass,
                measured: ByteCount(measured),
                limit: ByteCount(limit),
            });
        }
        Ok(measurement)
    }

    fn check_load_time(
        &self,
        samples: &[PageMeasurement],
        pass: PassKind,
        limit: Duration,
    ) -> Result<Duration, PerformanceError> {
        let average = average_load_time(samples).unwrap_or(Duration::MAX);
        if average > limit {
            tracing::warn!(
                "[Perf] {} {} pass load time {} over limit {}",
                self.page_key,
                pass,
                LoadTime(average),
                LoadTime(limit)
            );
            return Err(PerformanceError::LoadTimeExceeded {
                page_key: self.page_key.clone(),
                pass,
                measured: LoadTime(average),
                limit: LoadTime(limit),
            });
        }
        Ok(average)
    }
}

/// Result of one named check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    /// Measured value on success, failure message otherwise
    pub detail: String,
}

impl CheckOutcome {
    fn from_result(name: &'static str, result: Result<String, PerformanceError>) -> Self {
        match result {
            Ok(detail) => Self {
                name,
                passed: true,
                detail,
            },
            Err(e) => Self {
                name,
                passed: false,
                detail: e.to_string(),
            },
        }
    }
}

/// Outcomes of all checks for one page key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceReport {
    pub page_key: String,
    pub page_url: String,
    pub checks: Vec<CheckOutcome>,
}

impl PerformanceReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed)
    }
}
