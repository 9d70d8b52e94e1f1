/**
 * Application State Management
 *
 * This module defines the application state structure handlers extract
 * with `State<AppState>`.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container, holding:
 * - The collection service the editor delegates mutations to
 * - The rights evaluator, with the banned-username set injected
 * - The loaded server configuration
 *
 * Everything is behind `Arc`, so cloning the state per request is cheap.
 */

use std::sync::Arc;

use crate::backend::collections::{CollectionService, InMemoryCollectionStore};
use crate::backend::rights::RightsEvaluator;
use crate::backend::server::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    /// Collection lookups, updates and learner projections
    pub collections: Arc<dyn CollectionService>,

    /// Authorization checks
    pub rights: RightsEvaluator,

    /// Loaded server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by an in-memory store, which also serves as the rights source
    pub fn in_memory(store: Arc<InMemoryCollectionStore>, config: ServerConfig) -> Self {
        let rights = RightsEvaluator::new(config.banned_usernames.clone(), store.clone());
        Self {
            collections: store,
            rights,
            config: Arc::new(config),
        }
    }
}
