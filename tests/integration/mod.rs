//! Integration tests
//!
//! - `editor_api_test` - editor endpoints through the full router
//! - `editor_page_test` - editor page and read-only data endpoint
//! - `perf_harness_test` - page sessions and the harness against a mock
//!   page server
//! - `perf_live_server_test` - the harness against a running editor server

#[cfg(feature = "ssr")]
mod editor_page_test;
mod perf_harness_test;
#[cfg(feature = "ssr")]
mod perf_live_server_test;
