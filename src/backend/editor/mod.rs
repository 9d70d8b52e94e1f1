//! Collection Editor Module
//!
//! Request handling for the collection editor.
//!
//! - **`version`** - optimistic-concurrency version guard
//! - **`guard`** - editor authorization extractor (login, lookup, rights)
//! - **`handlers`** - page, read and update handlers

pub mod version;

pub mod guard;

pub mod handlers;

pub use guard::{authorize_editor, CollectionEditor, EditorRejection};
pub use handlers::{collection_editor_page, get_collection_data, update_collection_data};
pub use version::{require_valid_version, VersionError};
