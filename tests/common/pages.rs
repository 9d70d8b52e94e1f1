//! Mock page server helpers
//!
//! Builds small HTML pages and mounts them, with their sub-resources and
//! caching headers, on a `wiremock::MockServer`.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use collection_editor::perf::PerfTestConfig;

/// HTML document referencing the given scripts, stylesheets and images
pub fn page_html(scripts: &[&str], stylesheets: &[&str], images: &[&str]) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
    for href in stylesheets {
        html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", href));
    }
    for src in scripts {
        html.push_str(&format!("<script src=\"{}\"></script>\n", src));
    }
    html.push_str("</head>\n<body>\n");
    for src in images {
        html.push_str(&format!("<img src=\"{}\" alt=\"\">\n", src));
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Body of exactly `size` bytes
pub fn blob(size: usize) -> Vec<u8> {
    vec![b'x'; size]
}

/// Resource served with `Cache-Control: max-age=3600`
pub async fn mount_fresh_resource(server: &MockServer, resource_path: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(resource_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Cache-Control", "public, max-age=3600")
                .set_body_bytes(body),
        )
        .mount(server)
        .await;
}

/// Resource that must be revalidated; a matching `If-None-Match` gets 304
pub async fn mount_revalidated_resource(
    server: &MockServer,
    resource_path: &str,
    etag: &str,
    body: Vec<u8>,
    content_type: &str,
) {
    Mock::given(method("GET"))
        .and(path(resource_path))
        .and(header("If-None-Match", etag))
        .respond_with(ResponseTemplate::new(304).insert_header("ETag", etag))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(resource_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Cache-Control", "no-cache")
                .insert_header("ETag", etag)
                .set_body_raw(body, content_type),
        )
        .mount(server)
        .await;
}

/// Resource that may never be cached
pub async fn mount_uncacheable_resource(server: &MockServer, resource_path: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(resource_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Cache-Control", "no-store")
                .set_body_bytes(body),
        )
        .mount(server)
        .await;
}

/// Document revalidated through its ETag
pub async fn mount_page(server: &MockServer, page_path: &str, html: &str) {
    mount_revalidated_resource(
        server,
        page_path,
        "\"page-v1\"",
        html.as_bytes().to_vec(),
        "text/html",
    )
    .await;
}

/// Harness config with one page pointing at the mock server
pub fn perf_config_for(
    base_url: &str,
    page_key: &str,
    page_path: &str,
    cold_kb: u64,
    cached_kb: u64,
) -> PerfTestConfig {
    PerfTestConfig::parse(&format!(
        r#"
        base_url = "{base_url}"
        session_sample_count = 2

        [pages.{page_key}]
        url = "{page_path}"
        size_limits_mb = {{ uncached = {cold:?}, cached = {cached:?} }}
        load_time_limits_secs = {{ uncached = 30.0, cached = 30.0 }}
        "#,
        cold = cold_kb as f64 / 1024.0,
        cached = cached_kb as f64 / 1024.0,
    ))
    .expect("Failed to build perf config")
}
