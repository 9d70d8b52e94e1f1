//! Shared Module
//!
//! This module contains the collection domain types used by the backend
//! handlers and by tests. All types are designed for serialization and
//! transmission over HTTP.

/// Shared error types
pub mod error;

/// Collection domain: nodes, change operations, validation
pub mod collection;

/// Identity and activity rights
pub mod rights;

/// Editor request and projection types
pub mod editor;

/// Re-export commonly used types for convenience
pub use collection::{Collection, CollectionChange, CollectionNode};
pub use editor::{CollectionPlaythrough, CommitLogEntry, LearnerCollectionView, UpdateCollectionPayload};
pub use error::SharedError;
pub use rights::{ActivityRights, ActivityStatus, ActivityType, User, UserId};
