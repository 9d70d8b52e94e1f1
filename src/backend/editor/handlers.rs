/**
 * Collection Editor Handlers
 *
 * - `GET /editor/{collection_id}` - editor page shell
 * - `GET /editor/data/{collection_id}` - learner projection as JSON
 * - `PUT /editor/data/{collection_id}` - apply a versioned change list
 *
 * # Edit flow
 *
 * `PUT` runs behind the `CollectionEditor` guard, then:
 * 1. checks the submitted version against the collection's version
 * 2. hands the change list and commit message to the collection service
 * 3. re-fetches the learner projection for the editing user
 *
 * Either the full updated projection is returned, or an error and the
 * collection is unchanged.
 */

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{Html, IntoResponse, Json, Redirect, Response},
};

use crate::backend::editor::guard::CollectionEditor;
use crate::backend::editor::version::require_valid_version;
use crate::backend::error::BackendError;
use crate::backend::middleware::MaybeUser;
use crate::backend::server::state::AppState;
use crate::shared::{Collection, LearnerCollectionView, UpdateCollectionPayload};

/// Editor page for a single collection
///
/// Missing collections and collections the caller may not view redirect to
/// the site root.
pub async fn collection_editor_page(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
    MaybeUser(user): MaybeUser,
) -> Response {
    let Some(collection) = state.collections.get_collection_by_id(&collection_id).await else {
        tracing::info!("[Editor] Page requested for missing collection {}", collection_id);
        return Redirect::to("/").into_response();
    };

    if !state.rights.can_view(user.as_ref(), &collection_id).await {
        tracing::info!("[Editor] Collection {} not viewable by caller, redirecting", collection_id);
        return Redirect::to("/").into_response();
    }

    let can_edit = state.rights.can_edit(user.as_ref(), &collection_id).await;
    Html(render_editor_page(&collection, can_edit)).into_response()
}

/// Read-only learner projection
pub async fn get_collection_data(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
    MaybeUser(user): MaybeUser,
) -> Result<Json<LearnerCollectionView>, BackendError> {
    if state
        .collections
        .get_collection_by_id(&collection_id)
        .await
        .is_none()
    {
        tracing::warn!("[Editor] Data requested for missing collection {}", collection_id);
        return Err(BackendError::not_found(format!("collection {} not found", collection_id)));
    }

    if !state.rights.can_view(user.as_ref(), &collection_id).await {
        return Err(BackendError::unauthorized(
            "You do not have the credentials to view this collection.",
            user.map(|u| u.id),
        ));
    }

    let view = state
        .collections
        .get_learner_collection_view(&collection_id, user.as_ref().map(|u| &u.id))
        .await?;
    Ok(Json(view))
}

/// Apply a change list to a collection
pub async fn update_collection_data(
    State(state): State<AppState>,
    editor: CollectionEditor,
    body: Bytes,
) -> Result<Json<LearnerCollectionView>, BackendError> {
    let CollectionEditor { user, collection } = editor;

    let payload: UpdateCollectionPayload = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("[Editor] Unparseable update body for {}: {}", collection.id, e);
        BackendError::invalid_input(format!("Invalid request body: {}", e))
    })?;

    require_valid_version(payload.version, collection.version)?;

    let updated = state
        .collections
        .update_collection(
            &user.id,
            &collection.id,
            collection.version,
            &payload.change_list,
            payload.commit_message.as_deref(),
        )
        .await
        .map_err(|e| {
            tracing::warn!("[Editor] Update of {} by {} rejected: {}", collection.id, user.id, e);
            BackendError::from(e)
        })?;

    let view = state
        .collections
        .get_learner_collection_view(&collection.id, Some(&user.id))
        .await
        .map_err(|e| {
            tracing::error!(
                "[Editor] Collection {} committed version {} but its projection could not be loaded: {}",
                collection.id,
                updated.version,
                e
            );
            BackendError::projection_unavailable(collection.id.clone(), e.to_string())
        })?;

    tracing::info!(
        "[Editor] {} updated collection {} from version {} to {}",
        user.id,
        collection.id,
        collection.version,
        view.version
    );
    Ok(Json(view))
}

fn render_editor_page(collection: &Collection, can_edit: bool) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title} - Collection Editor</title>\n</head>\n\
         <body>\n<div id=\"collection-editor\" data-collection-id=\"{id}\" data-can-edit=\"{can_edit}\">\n\
         <h1>{title}</h1>\n</div>\n</body>\n</html>\n",
        title = escape_html(&collection.title),
        id = escape_html(&collection.id),
        can_edit = can_edit,
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
