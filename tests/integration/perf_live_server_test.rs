//! Harness run against a live editor server on an ephemeral port

use pretty_assertions::assert_eq;
use tokio::net::TcpListener;

use collection_editor::backend::server::create_app_with_store;
use collection_editor::perf::{HttpPageFetcher, PagePerformanceHarness, PerfTestConfig};

use crate::common::*;

async fn spawn_editor_server() -> String {
    let store = seeded_store().await;
    let app = create_app_with_store(store, test_config());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_public_editor_page_within_limits() {
    let base_url = spawn_editor_server().await;
    let config = perf_config_for(&base_url, "editor", "/editor/col_public", 64, 64);

    let harness = PagePerformanceHarness::setup(&config, "editor", HttpPageFetcher::new())
        .await
        .unwrap();
    let report = harness.run_all().await;

    assert!(report.passed(), "report: {:?}", report);
    assert_eq!(report.checks.len(), 4);
}

#[tokio::test]
async fn test_private_editor_page_measured_with_token() {
    let base_url = spawn_editor_server().await;
    let config = PerfTestConfig::parse(&format!(
        r#"
        base_url = "{}"

        [pages.editor]
        url = "/editor/col_1"
        size_limits_mb = {{ uncached = 1.0, cached = 1.0 }}
        load_time_limits_secs = {{ uncached = 30.0, cached = 30.0 }}
        preload_options = {{ login = true }}
        "#,
        base_url
    ))
    .unwrap();

    let fetcher = HttpPageFetcher::new().with_auth_token(token_for(&owner()));
    let harness = PagePerformanceHarness::setup(&config, "editor", fetcher)
        .await
        .unwrap();

    let measurement = harness.test_total_page_size().await.unwrap();
    assert_eq!(measurement.entries.len(), 1);
    assert_eq!(measurement.entries[0].status, 200);
    assert!(measurement.total_page_size_bytes() > 0);
}
