//! page-perf - page size and load time checks against a running server.
//!
//! Runs the four performance checks for each requested page key and exits
//! non-zero when any of them fails.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use collection_editor::perf::{HttpPageFetcher, PagePerformanceHarness, PerfTestConfig, PerformanceReport};

/// Check page weight and load time against per-page limits
#[derive(Parser)]
#[command(name = "page-perf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML limits file (built-in table when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the server base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for pages that need a signed-in user
    #[arg(long, env = "PERF_AUTH_TOKEN")]
    token: Option<String>,

    /// Override how many passes the load time checks average
    #[arg(long)]
    samples: Option<usize>,

    /// Use JSON output format
    #[arg(long)]
    json: bool,

    /// Page keys to check (all configured pages when omitted)
    pages: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("collection_editor=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PerfTestConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PerfTestConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(samples) = cli.samples {
        config.session_sample_count = samples;
    }
    config.validate()?;

    let page_keys: Vec<String> = if cli.pages.is_empty() {
        config.page_keys().map(str::to_string).collect()
    } else {
        cli.pages
    };

    let mut reports = Vec::with_capacity(page_keys.len());
    for page_key in &page_keys {
        let mut fetcher = HttpPageFetcher::new();
        if let Some(token) = &cli.token {
            fetcher = fetcher.with_auth_token(token.clone());
        }

        let harness = PagePerformanceHarness::setup(&config, page_key, fetcher)
            .await
            .with_context(|| format!("setting up page '{}'", page_key))?;
        let report = harness.run_all().await;
        if !cli.json {
            print_report(&report);
        }
        reports.push(report);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    let failed = reports.iter().filter(|r| !r.passed()).count();
    if failed > 0 {
        eprintln!("{} of {} pages over their limits", failed, reports.len());
        std::process::exit(1);
    }

    Ok(())
}

fn print_report(report: &PerformanceReport) {
    println!("{} ({})", report.page_key, report.page_url);
    for check in &report.checks {
        let mark = if check.passed { "ok  " } else { "FAIL" };
        println!("  [{}] {}: {}", mark, check.name, check.detail);
    }
}
