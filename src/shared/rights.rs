//! Identity and activity rights types
//!
//! `ActivityRights` answers the raw rights question for one actor. Banned
//! usernames and anonymous access are layered on top by the backend's
//! `RightsEvaluator`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque user identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            username: username.into(),
        }
    }
}

/// Kinds of activity that carry rights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Exploration,
    Collection,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exploration => f.write_str("exploration"),
            Self::Collection => f.write_str("collection"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    #[default]
    Private,
    Public,
}

/// Ownership and sharing metadata for one activity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityRights {
    #[serde(default)]
    pub owner_ids: Vec<UserId>,
    #[serde(default)]
    pub editor_ids: Vec<UserId>,
    #[serde(default)]
    pub viewer_ids: Vec<UserId>,
    #[serde(default)]
    pub status: ActivityStatus,
    /// Any signed-in user may edit a community-owned activity
    #[serde(default)]
    pub community_owned: bool,
}

impl ActivityRights {
    /// Private rights with a single owner
    pub fn owned_by(owner: UserId) -> Self {
        Self {
            owner_ids: vec![owner],
            ..Self::default()
        }
    }

    pub fn is_public(&self) -> bool {
        self.status == ActivityStatus::Public
    }

    pub fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_ids.contains(user_id)
    }

    pub fn is_editor(&self, user_id: &UserId) -> bool {
        self.editor_ids.contains(user_id) || self.is_owner(user_id)
    }

    pub fn is_viewer(&self, user_id: &UserId) -> bool {
        self.viewer_ids.contains(user_id) || self.is_editor(user_id)
    }

    pub fn actor_can_view(&self, actor: Option<&UserId>) -> bool {
        if self.is_public() {
            return true;
        }
        actor.is_some_and(|id| self.is_viewer(id))
    }

    pub fn actor_can_edit(&self, actor: Option<&UserId>) -> bool {
        match actor {
            Some(id) => self.community_owned || self.is_editor(id),
            None => false,
        }
    }
}
