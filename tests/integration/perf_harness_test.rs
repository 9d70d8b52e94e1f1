//! Performance harness integration tests against a mock page server

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use collection_editor::perf::{
    HttpPageFetcher, PageFetcher, PagePerformanceHarness, PageSession, PassKind,
    PerfTestConfig, PerformanceError,
};

use crate::assert_contains;
use crate::common::*;

const JS_BYTES: usize = 100 * 1024;
const CSS_BYTES: usize = 20 * 1024;
const IMG_BYTES: usize = 8 * 1024;

/// Library page with one fresh script, one revalidated stylesheet and one
/// uncacheable image
async fn library_server() -> (MockServer, String) {
    let server = MockServer::start().await;
    let html = page_html(&["/static/app.js"], &["/static/app.css"], &["/img/banner.png"]);

    mount_page(&server, "/library", &html).await;
    mount_fresh_resource(&server, "/static/app.js", blob(JS_BYTES)).await;
    mount_revalidated_resource(&server, "/static/app.css", "\"css-v1\"", blob(CSS_BYTES), "text/css")
        .await;
    mount_uncacheable_resource(&server, "/img/banner.png", blob(IMG_BYTES)).await;

    (server, html)
}

fn library_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/library", server.uri())).unwrap()
}

#[tokio::test]
async fn test_cold_load_counts_document_and_every_resource() {
    let (server, html) = library_server().await;
    let mut session = PageSession::new(None).unwrap();

    let cold = session.load(&library_url(&server), PassKind::Cold).await.unwrap();

    assert_eq!(cold.kind, PassKind::Cold);
    assert_eq!(cold.entries.len(), 4);
    assert_eq!(
        cold.total_page_size_bytes(),
        (html.len() + JS_BYTES + CSS_BYTES + IMG_BYTES) as u64
    );
    assert_eq!(cold.network_request_count(), 4);
    assert!(cold.entries.iter().all(|e| e.status == 200));
}

#[tokio::test]
async fn test_second_load_uses_session_cache() {
    let (server, _html) = library_server().await;
    let mut session = PageSession::new(None).unwrap();
    let url = library_url(&server);

    session.load(&url, PassKind::Cold).await.unwrap();
    // document, script and stylesheet; the image is no-store
    assert_eq!(session.cached_resource_count(), 3);

    let cached = session.load(&url, PassKind::Cached).await.unwrap();

    assert_eq!(cached.total_page_size_bytes(), IMG_BYTES as u64);
    let by_url = |suffix: &str| {
        cached
            .entries
            .iter()
            .find(|e| e.url.ends_with(suffix))
            .unwrap()
            .clone()
    };
    let document = by_url("/library");
    assert!(document.revalidated);
    assert_eq!(document.status, 304);
    let script = by_url("/static/app.js");
    assert!(script.from_cache);
    assert_eq!(script.transferred_bytes, 0);
    let stylesheet = by_url("/static/app.css");
    assert!(stylesheet.revalidated);
    assert_eq!(stylesheet.transferred_bytes, 0);
    let image = by_url("/img/banner.png");
    assert!(!image.from_cache);
    assert_eq!(image.transferred_bytes, IMG_BYTES as u64);
}

#[tokio::test]
async fn test_cached_measurement_fetches_fresh_resources_once() {
    let server = MockServer::start().await;
    let html = page_html(&["/static/app.js"], &[], &[]);
    mount_page(&server, "/library", &html).await;
    Mock::given(method("GET"))
        .and(path("/static/app.js"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Cache-Control", "max-age=600")
                .set_body_bytes(blob(JS_BYTES)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let measurement = HttpPageFetcher::new()
        .measure_cached(&library_url(&server))
        .await
        .unwrap();

    assert_eq!(measurement.kind, PassKind::Cached);
    assert_eq!(measurement.total_page_size_bytes(), 0);
}

#[tokio::test]
async fn test_separate_measurements_share_no_cache() {
    let (server, _html) = library_server().await;
    let fetcher = HttpPageFetcher::new();
    let url = library_url(&server);

    let first = fetcher.measure_cold(&url).await.unwrap();
    let second = fetcher.measure_cold(&url).await.unwrap();

    assert_eq!(first.total_page_size_bytes(), second.total_page_size_bytes());
    assert!(second.entries.iter().all(|e| !e.from_cache && !e.revalidated));
}

#[tokio::test]
async fn test_harness_fails_cold_size_and_passes_cached_size() {
    let (server, _html) = library_server().await;
    let config = perf_config_for(&server.uri(), "library", "/library", 100, 50);

    let harness = PagePerformanceHarness::setup(&config, "library", HttpPageFetcher::new())
        .await
        .unwrap();

    let err = harness.test_total_page_size().await.unwrap_err();
    assert_matches!(err, PerformanceError::SizeLimitExceeded { pass: PassKind::Cold, .. });
    assert_contains!(err.to_string(), "> limit 100.0 KB");

    let cached = harness.test_total_page_size_for_cached_session().await.unwrap();
    assert_eq!(cached.total_page_size_bytes(), IMG_BYTES as u64);

    harness.test_page_load_time().await.unwrap();
    harness.test_page_load_time_for_cached_session().await.unwrap();
}

#[tokio::test]
async fn test_run_all_report_lists_failed_check() {
    let (server, _html) = library_server().await;
    let config = perf_config_for(&server.uri(), "library", "/library", 100, 50);
    let harness = PagePerformanceHarness::setup(&config, "library", HttpPageFetcher::new())
        .await
        .unwrap();

    let report = harness.run_all().await;

    assert!(!report.passed());
    let failed: Vec<_> = report.failures().map(|c| c.name).collect();
    assert_eq!(failed, vec!["test_total_page_size"]);
}

#[tokio::test]
async fn test_unknown_page_key_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let config = perf_config_for(&server.uri(), "library", "/library", 100, 50);

    let result = PagePerformanceHarness::setup(&config, "profile", HttpPageFetcher::new()).await;

    assert_matches!(result, Err(PerformanceError::UnknownPageKey(key)) if key == "profile");
}

#[tokio::test]
async fn test_missing_page_fails_setup() {
    let server = MockServer::start().await;
    let config = perf_config_for(&server.uri(), "library", "/library", 100, 50);

    let result = PagePerformanceHarness::setup(&config, "library", HttpPageFetcher::new()).await;

    assert_matches!(result, Err(PerformanceError::PageStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_signed_in_fetcher_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard"))
        .and(header("Authorization", "Bearer perf-token"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page_html(&[], &[], &[]), "text/html"))
        .mount(&server)
        .await;
    let config = PerfTestConfig {
        base_url: server.uri(),
        ..PerfTestConfig::default()
    };

    let anonymous = PagePerformanceHarness::setup(&config, "dashboard", HttpPageFetcher::new()).await;
    assert_matches!(anonymous, Err(PerformanceError::Config(_)));

    let fetcher = HttpPageFetcher::new().with_auth_token("perf-token");
    let harness = PagePerformanceHarness::setup(&config, "dashboard", fetcher)
        .await
        .unwrap();
    assert!(harness.run_all().await.passed());
}

#[tokio::test]
async fn test_oversized_max_age_is_measured_and_cached() {
    let server = MockServer::start().await;
    let html = page_html(&["/static/forever.js"], &[], &[]);
    mount_page(&server, "/library", &html).await;
    Mock::given(method("GET"))
        .and(path("/static/forever.js"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Cache-Control", "max-age=18446744073709551615")
                .set_body_bytes(blob(JS_BYTES)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let mut session = PageSession::new(None).unwrap();
    let url = library_url(&server);

    let cold = session.load(&url, PassKind::Cold).await.unwrap();
    assert_eq!(cold.total_page_size_bytes(), (html.len() + JS_BYTES) as u64);

    let cached = session.load(&url, PassKind::Cached).await.unwrap();
    let script = cached
        .entries
        .iter()
        .find(|e| e.url.ends_with("/static/forever.js"))
        .unwrap();
    assert!(script.from_cache);
    assert_eq!(script.transferred_bytes, 0);
}

#[tokio::test]
async fn test_bearer_token_stays_on_page_origin() {
    let page_server = MockServer::start().await;
    let cdn = MockServer::start().await;

    let cdn_script = format!("{}/lib/vendor.js", cdn.uri());
    let html = page_html(&[cdn_script.as_str(), "/static/app.js"], &[], &[]);
    Mock::given(method("GET"))
        .and(path("/dashboard"))
        .and(header("Authorization", "Bearer perf-token"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(&page_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/static/app.js"))
        .and(header("Authorization", "Bearer perf-token"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(blob(JS_BYTES)))
        .expect(1)
        .mount(&page_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lib/vendor.js"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(blob(CSS_BYTES)))
        .expect(1)
        .mount(&cdn)
        .await;

    let fetcher = HttpPageFetcher::new().with_auth_token("perf-token");
    let url = Url::parse(&format!("{}/dashboard", page_server.uri())).unwrap();
    let cold = fetcher.measure_cold(&url).await.unwrap();
    assert!(cold.entries.iter().all(|e| e.status == 200));

    let cdn_requests = cdn.received_requests().await.unwrap();
    assert_eq!(cdn_requests.len(), 1);
    assert!(!cdn_requests[0].headers.contains_key("authorization"));
}
