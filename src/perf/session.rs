//! Cache-aware page session.
//!
//! A `PageSession` behaves like a single browser profile: it loads a page
//! document, discovers the scripts, stylesheets and images it references,
//! fetches them concurrently, and keeps an HTTP cache between loads.
//!
//! Cache rules:
//! - `Cache-Control: no-store` responses are never kept
//! - `max-age=N` responses are served locally for N seconds, unless
//!   `no-cache` is also set
//! - stale entries with an `ETag` or `Last-Modified` are revalidated with
//!   `If-None-Match` / `If-Modified-Since`; a 304 transfers no body bytes
//! - entries with neither freshness nor validators are dropped
//! - `max-age` values past 2^31 seconds are read as 2^31 seconds
//!
//! The session's bearer token only goes to the page's own origin.

use futures_util::future::join_all;
use regex::Regex;
use reqwest::header::{
    HeaderMap, HeaderName, CACHE_CONTROL, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED,
};
use reqwest::{Client, StatusCode};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use crate::perf::error::PerformanceError;
use crate::perf::metrics::{PageMeasurement, PassKind, ResourceEntry};

/// Largest `max-age` honoured, in seconds.
const MAX_AGE_CAP_SECS: u64 = 1 << 31;

/// Caching directives of one response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    pub no_store: bool,
    pub no_cache: bool,
    pub max_age: Option<Duration>,
}

impl CachePolicy {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut policy = Self::default();
        for value in headers.get_all(CACHE_CONTROL) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            for directive in value.split(',') {
                let directive = directive.trim().to_ascii_lowercase();
                match directive.as_str() {
                    "no-store" => policy.no_store = true,
                    "no-cache" => policy.no_cache = true,
                    _ => {
                        if let Some(secs) = directive.strip_prefix("max-age=") {
                            if let Some(secs) = parse_delta_seconds(secs.trim_matches('"')) {
                                policy.max_age = Some(Duration::from_secs(secs));
                            }
                        }
                    }
                }
            }
        }
        policy
    }

    /// Instant until which a response may be reused without asking.
    fn fresh_until(&self, now: Instant) -> Option<Instant> {
        if self.no_cache || self.no_store {
            return None;
        }
        self.max_age
            .filter(|age| !age.is_zero())
            .and_then(|age| now.checked_add(age))
    }
}

/// Delta-seconds value, capped at `MAX_AGE_CAP_SECS`.
fn parse_delta_seconds(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(raw.parse::<u64>().map_or(MAX_AGE_CAP_SECS, |secs| secs.min(MAX_AGE_CAP_SECS)))
}

#[derive(Debug, Clone)]
struct CachedResponse {
    status: u16,
    body: Arc<[u8]>,
    etag: Option<String>,
    last_modified: Option<String>,
    fresh_until: Option<Instant>,
}

impl CachedResponse {
    fn is_fresh(&self, now: Instant) -> bool {
        self.fresh_until.is_some_and(|until| now < until)
    }

    fn has_validators(&self) -> bool {
        self.etag.is_some() || self.last_modified.is_some()
    }
}

enum CacheUpdate {
    Keep,
    Store(CachedResponse),
    Evict,
}

struct Fetched {
    entry: ResourceEntry,
    body: Arc<[u8]>,
    update: CacheUpdate,
}

/// Finds the sub-resources a document references.
#[derive(Debug, Clone)]
pub struct SubresourceScanner {
    tag: Regex,
    attribute: Regex,
}

impl SubresourceScanner {
    pub fn new() -> Result<Self, PerformanceError> {
        let build = |pattern: &str| {
            Regex::new(pattern).map_err(|e| PerformanceError::Config(e.to_string()))
        };
        Ok(Self {
            tag: build(r"(?is)<(script|img|link)\b([^>]*)>")?,
            attribute: build(r#"(?is)([a-z][a-z0-9_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)?,
        })
    }

    /// Absolute http(s) URLs referenced by `script src`, `img src` and
    /// `link href` (stylesheets, icons, preloads), deduplicated in document
    /// order.
    pub fn scan(&self, page_url: &Url, html: &str) -> Vec<Url> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for tag in self.tag.captures_iter(html) {
            let name = tag[1].to_ascii_lowercase();
            let attributes = self.attributes(&tag[2]);

            let reference = match name.as_str() {
                "link" => {
                    let rel = attributes.get("rel").map(|r| r.to_ascii_lowercase());
                    let wanted = rel.is_some_and(|rel| {
                        rel.split_whitespace().any(|r| {
                            matches!(r, "stylesheet" | "icon" | "preload" | "modulepreload" | "manifest")
                        })
                    });
                    if !wanted {
                        continue;
                    }
                    attributes.get("href")
                }
                _ => attributes.get("src"),
            };

            let Some(reference) = reference else {
                continue;
            };
            let Ok(url) = page_url.join(reference.trim()) else {
                continue;
            };
            if !matches!(url.scheme(), "http" | "https") {
                continue;
            }
            if seen.insert(url.to_string()) {
                urls.push(url);
            }
        }

        urls
    }

    fn attributes(&self, raw: &str) -> HashMap<String, String> {
        self.attribute
            .captures_iter(raw)
            .map(|c| {
                let value = c.get(2).or_else(|| c.get(3)).map_or("", |m| m.as_str());
                (c[1].to_ascii_lowercase(), value.to_string())
            })
            .collect()
    }
}

/// One browser-like session with its own HTTP cache.
pub struct PageSession {
    client: Client,
    scanner: SubresourceScanner,
    cache: HashMap<String, CachedResponse>,
    auth_token: Option<String>,
}

impl PageSession {
    pub fn new(auth_token: Option<String>) -> Result<Self, PerformanceError> {
        let client = Client::builder()
            .build()
            .map_err(|e| PerformanceError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            scanner: SubresourceScanner::new()?,
            cache: HashMap::new(),
            auth_token,
        })
    }

    /// Number of responses currently held in the session cache.
    pub fn cached_resource_count(&self) -> usize {
        self.cache.len()
    }

    /// Load a page and everything it references, tagging the result with
    /// `kind`.
    pub async fn load(
        &mut self,
        page_url: &Url,
        kind: PassKind,
    ) -> Result<PageMeasurement, PerformanceError> {
        let started = Instant::now();

        let document = fetch_resource(
            &self.client,
            page_url,
            self.cache.get(page_url.as_str()).cloned(),
            self.auth_token.as_deref(),
        )
        .await?;

        if document.entry.status >= 400 {
            return Err(PerformanceError::PageStatus {
                url: page_url.to_string(),
                status: document.entry.status,
            });
        }

        let html = String::from_utf8_lossy(&document.body);
        let resources = self.scanner.scan(page_url, &html);
        self.apply(page_url, document.update);

        let fetches = resources.iter().map(|url| {
            let token = self
                .auth_token
                .as_deref()
                .filter(|_| url.origin() == page_url.origin());
            fetch_resource(
                &self.client,
                url,
                self.cache.get(url.as_str()).cloned(),
                token,
            )
        });
        let results = join_all(fetches).await;

        let mut entries = Vec::with_capacity(resources.len() + 1);
        entries.push(document.entry);
        for (url, result) in resources.iter().zip(results) {
            let fetched = result?;
            if fetched.entry.status >= 400 {
                tracing::warn!("[Perf] {} answered {}", url, fetched.entry.status);
            }
            self.apply(url, fetched.update);
            entries.push(fetched.entry);
        }

        let measurement = PageMeasurement {
            kind,
            page_url: page_url.to_string(),
            entries,
            elapsed: started.elapsed(),
        };
        tracing::debug!(
            "[Perf] {} pass of {}: {} bytes, {} network requests, {:?}",
            kind,
            page_url,
            measurement.total_page_size_bytes(),
            measurement.network_request_count(),
            measurement.elapsed
        );
        Ok(measurement)
    }

    fn apply(&mut self, url: &Url, update: CacheUpdate) {
        match update {
            CacheUpdate::Keep => {}
            CacheUpdate::Store(cached) => {
                self.cache.insert(url.to_string(), cached);
            }
            CacheUpdate::Evict => {
                self.cache.remove(url.as_str());
            }
        }
    }
}

fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn fetch_resource(
    client: &Client,
    url: &Url,
    cached: Option<CachedResponse>,
    auth_token: Option<&str>,
) -> Result<Fetched, PerformanceError> {
    let now = Instant::now();

    if let Some(cached) = cached.as_ref().filter(|c| c.is_fresh(now)) {
        return Ok(Fetched {
            entry: ResourceEntry {
                url: url.to_string(),
                status: cached.status,
                transferred_bytes: 0,
                from_cache: true,
                revalidated: false,
            },
            body: cached.body.clone(),
            update: CacheUpdate::Keep,
        });
    }

    let mut request = client.get(url.clone());
    if let Some(token) = auth_token {
        request = request.bearer_auth(token);
    }
    if let Some(cached) = &cached {
        if let Some(etag) = &cached.etag {
            request = request.header(IF_NONE_MATCH, etag.as_str());
        }
        if let Some(last_modified) = &cached.last_modified {
            request = request.header(IF_MODIFIED_SINCE, last_modified.as_str());
        }
    }

    let request_error = |source| PerformanceError::Request {
        url: url.to_string(),
        source,
    };
    let response = request.send().await.map_err(request_error)?;

    let status = response.status();
    let headers = response.headers();
    let policy = CachePolicy::from_headers(headers);
    let etag = header_string(headers, ETAG);
    let last_modified = header_string(headers, LAST_MODIFIED);

    if status == StatusCode::NOT_MODIFIED {
        if let Some(cached) = cached {
            let refreshed = CachedResponse {
                status: cached.status,
                body: cached.body,
                etag: etag.or(cached.etag),
                last_modified: last_modified.or(cached.last_modified),
                fresh_until: policy.fresh_until(now),
            };
            let body = refreshed.body.clone();
            let update = if policy.no_store {
                CacheUpdate::Evict
            } else {
                CacheUpdate::Store(refreshed)
            };
            return Ok(Fetched {
                entry: ResourceEntry {
                    url: url.to_string(),
                    status: status.as_u16(),
                    transferred_bytes: 0,
                    from_cache: false,
                    revalidated: true,
                },
                body,
                update,
            });
        }
    }

    let bytes = response.bytes().await.map_err(request_error)?;
    let body: Arc<[u8]> = Arc::from(bytes.as_ref());

    let candidate = CachedResponse {
        status: status.as_u16(),
        body: body.clone(),
        etag,
        last_modified,
        fresh_until: policy.fresh_until(now),
    };
    let cacheable = status.is_success()
        && !policy.no_store
        && (candidate.fresh_until.is_some() || candidate.has_validators());
    let update = if cacheable {
        CacheUpdate::Store(candidate)
    } else {
        CacheUpdate::Evict
    };

    Ok(Fetched {
        entry: ResourceEntry {
            url: url.to_string(),
            status: status.as_u16(),
            transferred_bytes: body.len() as u64,
            from_cache: false,
            revalidated: false,
        },
        body,
        update,
    })
}
