/**
 * Collection Editor Server Entry Point
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("collection_editor=debug,tower_http=debug,info")
    });
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = collection_editor::backend::ServerConfig::from_env()?;
    let port = config.port;
    let app = collection_editor::backend::create_app(config).await?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin collection-editor-server --features ssr");
    std::process::exit(1);
}
