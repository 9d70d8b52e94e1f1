//! Page Performance Module
//!
//! Measures how heavy and how fast a page is for a first-time visitor
//! (cold pass) and for a returning one (cached pass), and checks both
//! against per-page limits.
//!
//! - **`config`** - `PerfTestConfig` page table and `PerformanceLimits`
//! - **`metrics`** - `PageMeasurement` and display helpers
//! - **`session`** - cache-aware `PageSession` over reqwest
//! - **`fetcher`** - `PageFetcher` trait and `HttpPageFetcher`
//! - **`harness`** - `PagePerformanceHarness` and its four checks
//! - **`error`** - `PerformanceError`
//!
//! # Example
//!
//! ```rust,no_run
//! use collection_editor::perf::{HttpPageFetcher, PagePerformanceHarness, PerfTestConfig};
//!
//! # async fn example() -> Result<(), collection_editor::perf::PerformanceError> {
//! let config = PerfTestConfig::default();
//! let harness = PagePerformanceHarness::setup(&config, "library", HttpPageFetcher::new()).await?;
//! harness.test_total_page_size().await?;
//! harness.test_page_load_time_for_cached_session().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fetcher;
pub mod harness;
pub mod metrics;
pub mod session;

pub use config::{PageConfig, PerfTestConfig, PerformanceLimits, PreloadOptions, SessionLimits};
pub use error::PerformanceError;
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use harness::{CheckOutcome, PagePerformanceHarness, PerformanceReport};
pub use metrics::{ByteCount, LoadTime, PageMeasurement, PassKind, ResourceEntry};
pub use session::PageSession;
