/**
 * In-Memory Collection Store
 *
 * Holds collections, their rights, their commit logs and per-learner
 * completion records behind a single `tokio::sync::RwLock`. Updates take the
 * write lock for the whole check-apply-commit sequence, which gives the
 * single-writer-per-collection behaviour the editor relies on.
 */

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::backend::collections::service::{CollectionService, MAX_COMMIT_MESSAGE_LENGTH};
use crate::backend::rights::RightsSource;
use crate::shared::{
    ActivityRights, ActivityType, Collection, CollectionChange, CommitLogEntry,
    LearnerCollectionView, SharedError, UserId,
};

#[derive(Debug, Clone)]
struct CollectionRecord {
    collection: Collection,
    rights: ActivityRights,
    commits: Vec<CommitLogEntry>,
    completions: HashMap<UserId, Vec<String>>,
}

#[derive(Debug, Default)]
pub struct InMemoryCollectionStore {
    records: RwLock<HashMap<String, CollectionRecord>>,
}

impl InMemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a collection together with its rights
    pub async fn insert_collection(
        &self,
        collection: Collection,
        rights: ActivityRights,
    ) -> Result<(), SharedError> {
        collection.validate()?;
        let mut records = self.records.write().await;
        tracing::debug!("[Store] Inserting collection {} at version {}", collection.id, collection.version);
        records.insert(
            collection.id.clone(),
            CollectionRecord {
                collection,
                rights,
                commits: Vec::new(),
                completions: HashMap::new(),
            },
        );
        Ok(())
    }

    /// Mark an exploration as completed by a learner
    pub async fn record_completion(
        &self,
        collection_id: &str,
        user_id: &UserId,
        exploration_id: &str,
    ) -> Result<(), SharedError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(collection_id)
            .ok_or_else(|| SharedError::not_found("collection", collection_id))?;
        if record.collection.node(exploration_id).is_none() {
            return Err(SharedError::validation(
                "exploration_id",
                format!("Exploration {} is not part of this collection", exploration_id),
            ));
        }
        let completed = record.completions.entry(user_id.clone()).or_default();
        if !completed.iter().any(|id| id == exploration_id) {
            completed.push(exploration_id.to_string());
        }
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn check_commit_message(rights: &ActivityRights, commit_message: Option<&str>) -> Result<(), SharedError> {
    let message = commit_message.map(str::trim).filter(|m| !m.is_empty());
    match message {
        None if rights.is_public() => Err(SharedError::validation(
            "commit_message",
            "Collection is public so expected a commit message but received none.",
        )),
        Some(m) if m.chars().count() > MAX_COMMIT_MESSAGE_LENGTH => Err(SharedError::validation(
            "commit_message",
            format!(
                "Commit messages must be at most {} characters long.",
                MAX_COMMIT_MESSAGE_LENGTH
            ),
        )),
        _ => Ok(()),
    }
}

#[async_trait]
impl RightsSource for InMemoryCollectionStore {
    async fn get_activity_rights(
        &self,
        activity_type: ActivityType,
        activity_id: &str,
    ) -> Option<ActivityRights> {
        if activity_type != ActivityType::Collection {
            return None;
        }
        self.records
            .read()
            .await
            .get(activity_id)
            .map(|record| record.rights.clone())
    }
}

#[async_trait]
impl CollectionService for InMemoryCollectionStore {
    async fn get_collection_by_id(&self, collection_id: &str) -> Option<Collection> {
        self.records
            .read()
            .await
            .get(collection_id)
            .map(|record| record.collection.clone())
    }

    async fn update_collection(
        &self,
        committer_id: &UserId,
        collection_id: &str,
        expected_version: u64,
        change_list: &[Value],
        commit_message: Option<&str>,
    ) -> Result<Collection, SharedError> {
        let changes = CollectionChange::parse_list(change_list)?;
        if changes.is_empty() {
            return Err(SharedError::validation(
                "change_list",
                "Expected a non-empty change list.",
            ));
        }

        let mut records = self.records.write().await;
        let record = records
            .get_mut(collection_id)
            .ok_or_else(|| SharedError::not_found("collection", collection_id))?;

        if record.collection.version != expected_version {
            tracing::warn!(
                "[Store] Version race on collection {}: expected {}, stored {}",
                collection_id,
                expected_version,
                record.collection.version
            );
            return Err(SharedError::VersionConflict {
                expected: expected_version,
                actual: record.collection.version,
            });
        }
        check_commit_message(&record.rights, commit_message)?;

        let mut working = record.collection.clone();
        for change in &changes {
            working.apply_change(change)?;
        }
        working.validate()?;
        working.version += 1;

        record.commits.push(CommitLogEntry {
            version: working.version,
            committer_id: committer_id.clone(),
            commit_message: commit_message.map(str::to_owned),
            commands: change_list.to_vec(),
            created_at: Utc::now(),
        });
        record.collection = working;

        tracing::info!(
            "[Store] Collection {} updated to version {} by {} ({} changes)",
            collection_id,
            record.collection.version,
            committer_id,
            changes.len()
        );
        Ok(record.collection.clone())
    }

    async fn get_learner_collection_view(
        &self,
        collection_id: &str,
        actor_id: Option<&UserId>,
    ) -> Result<LearnerCollectionView, SharedError> {
        let records = self.records.read().await;
        let record = records
            .get(collection_id)
            .ok_or_else(|| SharedError::not_found("collection", collection_id))?;
        let completed = actor_id
            .and_then(|id| record.completions.get(id))
            .cloned()
            .unwrap_or_default();
        Ok(LearnerCollectionView::build(&record.collection, completed))
    }

    async fn get_commit_log(&self, collection_id: &str) -> Result<Vec<CommitLogEntry>, SharedError> {
        self.records
            .read()
            .await
            .get(collection_id)
            .map(|record| record.commits.clone())
            .ok_or_else(|| SharedError::not_found("collection", collection_id))
    }
}
