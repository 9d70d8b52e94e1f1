//! Server Module
//!
//! Server configuration, shared state and application assembly.
//!
//! - **`config`** - environment-driven `ServerConfig`
//! - **`state`** - `AppState`, the shared handler state
//! - **`init`** - `create_app`

pub mod config;

pub mod state;

pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{create_app, create_app_with_store};
pub use state::AppState;
