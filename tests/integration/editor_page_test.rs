//! Editor page and read-only data endpoint tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use collection_editor::shared::LearnerCollectionView;

use crate::assert_contains;
use crate::common::*;

#[tokio::test]
async fn test_editor_page_for_missing_collection_redirects_home() {
    let (server, _store) = create_test_server().await;

    let response = server
        .get("/editor/col_missing")
        .authorization_bearer(token_for(&owner()))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");
}

#[tokio::test]
async fn test_private_editor_page_hidden_from_anonymous() {
    let (server, _store) = create_test_server().await;

    let response = server.get("/editor/col_1").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");
}

#[tokio::test]
async fn test_editor_page_reports_edit_rights() {
    let (server, _store) = create_test_server().await;

    let owner_page = server
        .get("/editor/col_1")
        .authorization_bearer(token_for(&owner()))
        .await;
    assert_eq!(owner_page.status_code(), StatusCode::OK);
    let html = owner_page.text();
    assert_contains!(html, "data-collection-id=\"col_1\"");
    assert_contains!(html, "data-can-edit=\"true\"");
    assert_contains!(html, "Algebra Basics");

    let learner_page = server
        .get("/editor/col_1")
        .authorization_bearer(token_for(&learner()))
        .await;
    assert_eq!(learner_page.status_code(), StatusCode::OK);
    assert_contains!(learner_page.text(), "data-can-edit=\"false\"");
}

#[tokio::test]
async fn test_banned_editor_sees_page_without_edit_rights() {
    let (server, _store) = create_test_server().await;

    let response = server
        .get("/editor/col_1")
        .authorization_bearer(token_for(&banned_editor()))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_contains!(response.text(), "data-can-edit=\"false\"");
}

#[tokio::test]
async fn test_data_endpoint_returns_learner_view() {
    let (server, store) = create_test_server().await;
    store
        .record_completion("col_1", &learner().id, "exp_intro")
        .await
        .unwrap();

    let response = server
        .get("/editor/data/col_1")
        .authorization_bearer(token_for(&learner()))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let view: LearnerCollectionView = response.json();
    assert_eq!(view.version, PRIVATE_COLLECTION_VERSION);
    assert_eq!(view.category, "Mathematics");
    assert_eq!(view.playthrough.completed_exploration_ids, vec!["exp_intro"]);
    assert_eq!(view.playthrough.next_exploration_ids, vec!["exp_equations"]);
}

#[tokio::test]
async fn test_data_endpoint_anonymous_public_collection() {
    let (server, _store) = create_test_server().await;

    let response = server.get("/editor/data/col_public").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let view: LearnerCollectionView = response.json();
    assert!(view.playthrough.completed_exploration_ids.is_empty());
}

#[tokio::test]
async fn test_data_endpoint_status_codes() {
    let (server, _store) = create_test_server().await;

    let missing = server
        .get("/editor/data/col_missing")
        .authorization_bearer(token_for(&owner()))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let hidden = server
        .get("/editor/data/col_1")
        .authorization_bearer(token_for(&stranger()))
        .await;
    assert_eq!(hidden.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (server, _store) = create_test_server().await;

    let response = server.get("/nowhere").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
