//! Seeded server fixtures
//!
//! Every test gets its own in-memory store and `TestServer`, seeded with:
//! - `col_1` "Algebra Basics", private, version 3, owned by `owner`, with
//!   `editor` and the banned user `spammer` on the editor list and
//!   `learner` as a viewer
//! - `col_public`, public and community owned, version 1

use axum_test::TestServer;
use std::sync::Arc;

use collection_editor::backend::auth::sessions::create_token;
use collection_editor::backend::server::create_app_with_store;
use collection_editor::backend::{InMemoryCollectionStore, ServerConfig};
use collection_editor::shared::{
    ActivityRights, ActivityStatus, Collection, CollectionNode, User, UserId,
};

pub const TEST_JWT_SECRET: &str = "suite-secret";
pub const TEST_LOGIN_URL: &str = "/login";
pub const BANNED_USERNAME: &str = "spammer";

pub const PRIVATE_COLLECTION_ID: &str = "col_1";
pub const PUBLIC_COLLECTION_ID: &str = "col_public";
pub const PRIVATE_COLLECTION_VERSION: u64 = 3;

pub fn owner() -> User {
    User::new("u_owner", "owner")
}

pub fn editor() -> User {
    User::new("u_editor", "editor")
}

pub fn banned_editor() -> User {
    User::new("u_spammer", BANNED_USERNAME)
}

pub fn learner() -> User {
    User::new("u_learner", "learner")
}

pub fn stranger() -> User {
    User::new("u_stranger", "stranger")
}

/// Bearer token the test server will accept for `user`
pub fn token_for(user: &User) -> String {
    create_token(TEST_JWT_SECRET, user).expect("Failed to create test token")
}

pub fn test_config() -> ServerConfig {
    ServerConfig::builder()
        .jwt_secret(TEST_JWT_SECRET)
        .login_url(TEST_LOGIN_URL)
        .banned_usernames([BANNED_USERNAME])
        .build()
        .expect("Failed to build test config")
}

fn algebra_collection() -> Collection {
    let mut collection = Collection::new(PRIVATE_COLLECTION_ID, "Algebra Basics");
    collection.category = "Mathematics".to_string();
    collection.objective = "Solve linear equations".to_string();
    collection.version = PRIVATE_COLLECTION_VERSION;

    let mut intro = CollectionNode::new("exp_intro");
    intro.acquired_skills = vec!["arithmetic".to_string()];
    let mut equations = CollectionNode::new("exp_equations");
    equations.prerequisite_skills = vec!["arithmetic".to_string()];
    collection.nodes = vec![intro, equations];
    collection
}

fn algebra_rights() -> ActivityRights {
    let mut rights = ActivityRights::owned_by(owner().id);
    rights.editor_ids = vec![editor().id, banned_editor().id];
    rights.viewer_ids = vec![learner().id];
    rights
}

fn public_rights() -> ActivityRights {
    ActivityRights {
        owner_ids: vec![UserId::new("u_owner")],
        status: ActivityStatus::Public,
        community_owned: true,
        ..ActivityRights::default()
    }
}

pub async fn seeded_store() -> Arc<InMemoryCollectionStore> {
    let store = Arc::new(InMemoryCollectionStore::new());
    store
        .insert_collection(algebra_collection(), algebra_rights())
        .await
        .expect("Failed to seed private collection");
    store
        .insert_collection(
            Collection::new(PUBLIC_COLLECTION_ID, "Open Geometry"),
            public_rights(),
        )
        .await
        .expect("Failed to seed public collection");
    store
}

/// Test server over a freshly seeded store
pub async fn create_test_server() -> (TestServer, Arc<InMemoryCollectionStore>) {
    let store = seeded_store().await;
    let app = create_app_with_store(store.clone(), test_config());
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, store)
}

/// Change list that retitles a collection
pub fn retitle(title: &str) -> serde_json::Value {
    serde_json::json!([{
        "cmd": "edit_collection_property",
        "property_name": "title",
        "new_value": title,
    }])
}
