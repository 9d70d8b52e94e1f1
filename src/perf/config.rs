//! Per-page performance thresholds.
//!
//! The table maps a page key to its URL and four limits: total transferred
//! size and total load time, each for an uncached (first visit) and a
//! cached (return visit) session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::perf::error::PerformanceError;

/// Number of passes averaged by the load time checks.
pub const DEFAULT_SESSION_SAMPLE_COUNT: usize = 3;

/// Server the default table points at.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9501";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A threshold split by session kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionLimits {
    pub uncached: f64,
    pub cached: f64,
}

/// Setup a page needs before it can be measured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadOptions {
    /// Page is only reachable for a signed-in user
    #[serde(default)]
    pub login: bool,
}

/// Limits for a single page key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Path relative to the base URL
    pub url: String,
    pub size_limits_mb: SessionLimits,
    pub load_time_limits_secs: SessionLimits,
    #[serde(default)]
    pub preload_options: PreloadOptions,
}

impl PageConfig {
    fn standard(url: &str, login: bool) -> Self {
        Self {
            url: url.to_string(),
            size_limits_mb: SessionLimits {
                uncached: 10.0,
                cached: 1.0,
            },
            load_time_limits_secs: SessionLimits {
                uncached: 10.0,
                cached: 3.0,
            },
            preload_options: PreloadOptions { login },
        }
    }
}

/// Resolved thresholds for one page, in bytes and durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceLimits {
    pub max_cold_bytes: u64,
    pub max_cached_bytes: u64,
    pub max_cold_load_time: Duration,
    pub max_cached_load_time: Duration,
}

impl PerformanceLimits {
    fn from_page(page_key: &str, page: &PageConfig) -> Result<Self, PerformanceError> {
        Ok(Self {
            max_cold_bytes: megabytes_to_bytes(page_key, page.size_limits_mb.uncached)?,
            max_cached_bytes: megabytes_to_bytes(page_key, page.size_limits_mb.cached)?,
            max_cold_load_time: seconds_to_duration(page_key, page.load_time_limits_secs.uncached)?,
            max_cached_load_time: seconds_to_duration(page_key, page.load_time_limits_secs.cached)?,
        })
    }
}

fn check_limit(page_key: &str, value: f64) -> Result<f64, PerformanceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PerformanceError::Config(format!(
            "page '{}' has an invalid limit {}",
            page_key, value
        )))
    }
}

fn megabytes_to_bytes(page_key: &str, mb: f64) -> Result<u64, PerformanceError> {
    Ok((check_limit(page_key, mb)? * BYTES_PER_MB).round() as u64)
}

fn seconds_to_duration(page_key: &str, secs: f64) -> Result<Duration, PerformanceError> {
    Duration::try_from_secs_f64(check_limit(page_key, secs)?).map_err(|e| {
        PerformanceError::Config(format!(
            "page '{}' has an out-of-range time limit {}: {}",
            page_key, secs, e
        ))
    })
}

/// Harness configuration: target server, sampling and the page table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfTestConfig {
    pub base_url: String,
    #[serde(default = "default_sample_count")]
    pub session_sample_count: usize,
    #[serde(default)]
    pub pages: BTreeMap<String, PageConfig>,
}

fn default_sample_count() -> usize {
    DEFAULT_SESSION_SAMPLE_COUNT
}

impl Default for PerfTestConfig {
    fn default() -> Self {
        let pages = [
            ("splash", "/splash", false),
            ("library", "/library", false),
            ("dashboard", "/dashboard", true),
            ("explore", "/explore/0", false),
            ("editor", "/create/0", false),
            ("collection", "/collection/0", false),
            ("profile", "/profile/", true),
        ]
        .into_iter()
        .map(|(key, url, login)| (key.to_string(), PageConfig::standard(url, login)))
        .collect();

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_sample_count: DEFAULT_SESSION_SAMPLE_COUNT,
            pages,
        }
    }
}

impl PerfTestConfig {
    /// Parse a TOML document.
    pub fn parse(contents: &str) -> Result<Self, PerformanceError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| PerformanceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PerformanceError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PerformanceError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&contents)
    }

    pub fn validate(&self) -> Result<(), PerformanceError> {
        Url::parse(&self.base_url)
            .map_err(|e| PerformanceError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if self.session_sample_count == 0 {
            return Err(PerformanceError::Config(
                "session_sample_count must be at least 1".to_string(),
            ));
        }
        for (key, page) in &self.pages {
            PerformanceLimits::from_page(key, page)?;
        }
        Ok(())
    }

    pub fn page(&self, page_key: &str) -> Result<&PageConfig, PerformanceError> {
        self.pages
            .get(page_key)
            .ok_or_else(|| PerformanceError::UnknownPageKey(page_key.to_string()))
    }

    /// Thresholds for a page key; unknown keys are an error, never skipped.
    pub fn limits_for(&self, page_key: &str) -> Result<PerformanceLimits, PerformanceError> {
        PerformanceLimits::from_page(page_key, self.page(page_key)?)
    }

    /// Absolute URL of a page key.
    pub fn page_url(&self, page_key: &str) -> Result<Url, PerformanceError> {
        let page = self.page(page_key)?;
        let base = Url::parse(&self.base_url)
            .map_err(|e| PerformanceError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        base.join(&page.url)
            .map_err(|e| PerformanceError::InvalidUrl(format!("{}: {}", page.url, e)))
    }

    pub fn page_keys(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}
