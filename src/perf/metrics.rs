//! Page load measurements

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Which kind of load pass produced a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    /// Fresh session, nothing cached
    Cold,
    /// Session that already loaded the page once
    Cached,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cold => f.write_str("cold"),
            Self::Cached => f.write_str("cached"),
        }
    }
}

/// A byte count that displays in human units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ByteCount(pub u64);

impl fmt::Display for ByteCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const KB: f64 = 1024.0;
        const MB: f64 = 1024.0 * 1024.0;
        let bytes = self.0 as f64;
        if bytes < KB {
            write!(f, "{} B", self.0)
        } else if bytes < MB {
            write!(f, "{:.1} KB", bytes / KB)
        } else {
            write!(f, "{:.2} MB", bytes / MB)
        }
    }
}

/// A load duration that displays in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTime(pub Duration);

impl fmt::Display for LoadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} s", self.0.as_secs_f64())
    }
}

/// One resource requested (or served from cache) during a page load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    pub url: String,
    pub status: u16,
    /// Response body bytes received over the network
    pub transferred_bytes: u64,
    /// Served from the session cache without a request
    pub from_cache: bool,
    /// Answered with 304 Not Modified
    pub revalidated: bool,
}

/// Everything measured for a single page load pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeasurement {
    pub kind: PassKind,
    pub page_url: String,
    pub entries: Vec<ResourceEntry>,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u128(duration.as_millis())
}

impl PageMeasurement {
    pub fn total_page_size_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.transferred_bytes).sum()
    }

    /// Requests that actually went over the network
    pub fn network_request_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.from_cache).count()
    }
}

/// Mean elapsed time across several passes
pub fn average_load_time(measurements: &[PageMeasurement]) -> Option<Duration> {
    let count = u32::try_from(measurements.len()).ok().filter(|&n| n > 0)?;
    let total = measurements
        .iter()
        .try_fold(Duration::ZERO, |acc, m| acc.checked_add(m.elapsed))?;
    Some(total / count)
}
