//! Authentication Module
//!
//! Session token handling. The editor consumes identities; it does not
//! manage accounts.

pub mod sessions;

pub use sessions::{create_login_url, create_token, verify_token, Claims};
