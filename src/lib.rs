//! Collection Editor - Main Library
//!
//! A server for editing shared learning collections, plus a harness that
//! keeps page weight and load time in check.
//!
//! # Overview
//!
//! - Edit authorization: only signed-in, non-banned users holding edit
//!   rights on a collection may change it
//! - Optimistic concurrency: every edit names the version it was based on
//!   and is rejected when that version is out of date
//! - Learner projection: successful edits answer with the collection as
//!   the editing user sees it while playing through
//! - Page performance: cold and cached page loads measured against
//!   per-page size and time limits
//!
//! # Module Structure
//!
//! - **`shared`** - Domain types shared by the server and tools
//!   - Collections and change commands
//!   - Activity rights and users
//!   - Editor payloads and learner views
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server
//!   - Editor guard, version guard and handlers
//!   - Rights evaluation and the in-memory collection store
//!   - JWT identity
//!
//! - **`perf`** - Page performance harness and the `page-perf` tool
//!
//! # Feature Flags
//!
//! - **`ssr`** - Server build (enables the `backend` module), on by default
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use collection_editor::backend::{create_app, ServerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8181").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! Server state is shared through `Arc`; collections sit behind a
//! `tokio::sync::RwLock` and updates hold the write lock while they check
//! the version, apply and commit.
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for domain failures
//! - `backend::error::BackendError` at the HTTP boundary
//! - `perf::PerformanceError` for the harness

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Page performance harness
pub mod perf;
