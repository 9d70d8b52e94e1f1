/**
 * Rights Evaluator
 *
 * Read-only authorization checks for collections. Combines three inputs:
 * - the caller's identity (absent for anonymous requests)
 * - the banned-username set, injected at construction
 * - the activity rights looked up through a `RightsSource`
 *
 * The evaluator never distinguishes "collection missing" from "no rights":
 * callers resolve the collection first and report not-found themselves.
 */

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::shared::{ActivityRights, ActivityType, User};

/// Lookup of rights metadata, keyed by activity type and id
#[async_trait]
pub trait RightsSource: Send + Sync {
    async fn get_activity_rights(
        &self,
        activity_type: ActivityType,
        activity_id: &str,
    ) -> Option<ActivityRights>;
}

/// Usernames that may not edit anything
///
/// Matched by exact username, never by user id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannedUsernames(HashSet<String>);

impl BannedUsernames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, username: &str) -> bool {
        self.0.contains(username)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone)]
pub struct RightsEvaluator {
    banned: Arc<BannedUsernames>,
    source: Arc<dyn RightsSource>,
}

impl RightsEvaluator {
    pub fn new(banned: BannedUsernames, source: Arc<dyn RightsSource>) -> Self {
        Self {
            banned: Arc::new(banned),
            source,
        }
    }

    pub fn is_banned(&self, user: &User) -> bool {
        self.banned.contains(&user.username)
    }

    /// Whether `user` (or an anonymous caller) may view the collection
    pub async fn can_view(&self, user: Option<&User>, collection_id: &str) -> bool {
        self.can_view_activity(user, ActivityType::Collection, collection_id)
            .await
    }

    /// Whether `user` may edit the collection
    ///
    /// Requires a signed-in, non-banned user whom the rights model grants
    /// edit access.
    pub async fn can_edit(&self, user: Option<&User>, collection_id: &str) -> bool {
        self.can_edit_activity(user, ActivityType::Collection, collection_id)
            .await
    }

    pub async fn can_view_activity(
        &self,
        user: Option<&User>,
        activity_type: ActivityType,
        activity_id: &str,
    ) -> bool {
        match self.source.get_activity_rights(activity_type, activity_id).await {
            Some(rights) => rights.actor_can_view(user.map(|u| &u.id)),
            None => false,
        }
    }

    pub async fn can_edit_activity(
        &self,
        user: Option<&User>,
        activity_type: ActivityType,
        activity_id: &str,
    ) -> bool {
        let Some(user) = user else {
            return false;
        };
        if self.is_banned(user) {
            tracing::debug!("[Rights] Banned user {} denied edit on {} {}", user.username, activity_type, activity_id);
            return false;
        }
        match self.source.get_activity_rights(activity_type, activity_id).await {
            Some(rights) => rights.actor_can_edit(Some(&user.id)),
            None => false,
        }
    }
}
