//! Wire types for the collection editor endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::collection::{Collection, CollectionNode};
use crate::shared::rights::UserId;

/// Body of `PUT /editor/data/{id}`
///
/// `change_list` entries stay raw JSON here; the update service parses
/// them so malformed entries surface as validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCollectionPayload {
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub commit_message: Option<String>,
    #[serde(default)]
    pub change_list: Vec<Value>,
}

/// A learner's progress through a collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionPlaythrough {
    pub completed_exploration_ids: Vec<String>,
    pub next_exploration_ids: Vec<String>,
}

/// Caller-scoped projection of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerCollectionView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub objective: String,
    pub version: u64,
    pub nodes: Vec<CollectionNode>,
    pub playthrough: CollectionPlaythrough,
}

impl LearnerCollectionView {
    pub fn build(collection: &Collection, completed: Vec<String>) -> Self {
        let completed: Vec<String> = completed
            .into_iter()
            .filter(|id| collection.node(id).is_some())
            .collect();
        let next_exploration_ids = collection.next_exploration_ids(&completed);

        Self {
            id: collection.id.clone(),
            title: collection.title.clone(),
            category: collection.category.clone(),
            objective: collection.objective.clone(),
            version: collection.version,
            nodes: collection.nodes.clone(),
            playthrough: CollectionPlaythrough {
                completed_exploration_ids: completed,
                next_exploration_ids,
            },
        }
    }
}

/// One committed update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitLogEntry {
    /// Version the collection reached with this commit
    pub version: u64,
    pub committer_id: UserId,
    pub commit_message: Option<String>,
    pub commands: Vec<Value>,
    pub created_at: DateTime<Utc>,
}
