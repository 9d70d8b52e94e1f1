//! Collections Module
//!
//! The collection domain service consumed by the editor handlers.
//!
//! - **`service`** - `CollectionService` trait (lookup, update, projection)
//! - **`store`** - in-memory implementation with single-writer updates
//! - **`seed`** - TOML seed loading for demo collections

pub mod service;

pub mod store;

pub mod seed;

pub use service::{CollectionService, MAX_COMMIT_MESSAGE_LENGTH};
pub use store::InMemoryCollectionStore;
pub use seed::SeedFile;
