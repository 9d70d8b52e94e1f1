//! Middleware Module
//!
//! HTTP middleware run before handlers.
//!
//! - **`auth`** - resolves the caller's identity from a bearer token

pub mod auth;

pub use auth::{identity_middleware, CurrentUser, MaybeUser};
