/**
 * Collection Service Interface
 *
 * The domain service the editor handlers delegate to. Every lookup returns a
 * typed outcome: `None` / `SharedError::NotFound` for a missing collection,
 * `SharedError::ValidationError` for a malformed change list. Handlers never
 * need to catch anything broader.
 *
 * Implementations must apply each `update_collection` call atomically and
 * serialize writes per collection, re-checking `expected_version` under the
 * write so that only one of two racing edits from the same base commits.
 */

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::rights::RightsSource;
use crate::shared::{Collection, CommitLogEntry, LearnerCollectionView, SharedError, UserId};

/// Longest commit message accepted with an update
pub const MAX_COMMIT_MESSAGE_LENGTH: usize = 1000;

#[async_trait]
pub trait CollectionService: RightsSource {
    /// Non-strict lookup
    async fn get_collection_by_id(&self, collection_id: &str) -> Option<Collection>;

    /// Strict lookup
    async fn require_collection(&self, collection_id: &str) -> Result<Collection, SharedError> {
        self.get_collection_by_id(collection_id)
            .await
            .ok_or_else(|| SharedError::not_found("collection", collection_id))
    }

    /// Apply `change_list` as one commit and return the updated collection
    ///
    /// On any error the stored collection is left untouched.
    async fn update_collection(
        &self,
        committer_id: &UserId,
        collection_id: &str,
        expected_version: u64,
        change_list: &[Value],
        commit_message: Option<&str>,
    ) -> Result<Collection, SharedError>;

    /// Learner projection of the collection for `actor_id`
    async fn get_learner_collection_view(
        &self,
        collection_id: &str,
        actor_id: Option<&UserId>,
    ) -> Result<LearnerCollectionView, SharedError>;

    /// Commits in the order they were applied
    async fn get_commit_log(&self, collection_id: &str) -> Result<Vec<CommitLogEntry>, SharedError>;
}
