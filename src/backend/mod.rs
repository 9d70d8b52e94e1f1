//! Backend Module
//!
//! Server-side code for the collection editor: an Axum HTTP server that
//! lets signed-in users edit shared collections under optimistic
//! concurrency control.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - configuration, application state, initialization
//! - **`routes`** - router assembly
//! - **`editor`** - version guard, editor guard extractor, handlers
//! - **`rights`** - view/edit authorization with banned usernames
//! - **`collections`** - collection service trait and in-memory store
//! - **`auth`** - JWT session tokens and login URLs
//! - **`middleware`** - identity resolution
//! - **`error`** - HTTP-boundary error kinds
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs         - server binary
//! ├── server/
//! ├── routes/
//! ├── editor/
//! ├── rights/
//! ├── collections/
//! ├── auth/
//! ├── middleware/
//! └── error/
//! ```
//!
//! # Edit flow
//!
//! `PUT /editor/data/{id}` passes the identity middleware, then the
//! `CollectionEditor` guard (login redirect, 404, 401), then the version
//! guard (400), then the collection service (400 on validation failure),
//! and finally returns the learner projection for the editing user.
//!
//! # Thread Safety
//!
//! Collections live behind a `tokio::sync::RwLock`; each update holds the
//! write lock for its whole check-apply-commit sequence.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Collection editor handlers
pub mod editor;

/// Authorization
pub mod rights;

/// Collection domain service
pub mod collections;

/// Session tokens
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::{create_app, AppState, ServerConfig};
pub use error::BackendError;
pub use rights::{BannedUsernames, RightsEvaluator};
pub use collections::{CollectionService, InMemoryCollectionStore};
