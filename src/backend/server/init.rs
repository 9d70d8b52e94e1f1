/**
 * Server Initialization
 *
 * Builds the Axum application from a `ServerConfig`:
 * 1. Create the in-memory collection store
 * 2. Load seed collections if a seed file is configured
 * 3. Build the application state (rights evaluator gets the banned set)
 * 4. Create the router
 *
 * A configured seed file that fails to load is a startup error.
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::collections::{InMemoryCollectionStore, SeedFile};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{ConfigError, ServerConfig};
use crate::backend::server::state::AppState;

pub async fn create_app(config: ServerConfig) -> Result<Router<()>, ConfigError> {
    tracing::info!("Initializing collection editor backend");

    let store = Arc::new(InMemoryCollectionStore::new());

    if let Some(path) = &config.seed_path {
        let loaded = SeedFile::load(path)?.apply(&store).await?;
        tracing::info!("Loaded {} seed collections from {}", loaded, path.display());
    }

    tracing::info!(
        "{} banned usernames configured, login URL {}",
        config.banned_usernames.len(),
        config.login_url
    );

    Ok(create_app_with_store(store, config))
}

/// Router over an existing store
pub fn create_app_with_store(store: Arc<InMemoryCollectionStore>, config: ServerConfig) -> Router<()> {
    create_router(AppState::in_memory(store, config))
}
