/**
 * Editor Guard
 *
 * Runs before the body of every collection-editing handler, as an Axum
 * extractor. It either yields a `CollectionEditor` (the signed-in user plus
 * the collection they may edit) or an early-exit `EditorRejection`:
 *
 * 1. No identity            -> redirect to the login page
 * 2. Collection missing     -> 404
 * 3. Edit rights denied     -> 401, naming the user for audit
 */

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::backend::auth::sessions::create_login_url;
use crate::backend::error::BackendError;
use crate::backend::middleware::CurrentUser;
use crate::backend::server::state::AppState;
use crate::shared::{Collection, User};

/// A request that passed the editor guard
#[derive(Debug, Clone)]
pub struct CollectionEditor {
    pub user: User,
    /// The collection as it was when the guard ran
    pub collection: Collection,
}

#[derive(Debug)]
pub enum EditorRejection {
    LoginRequired { login_url: String },
    Denied(BackendError),
}

impl From<BackendError> for EditorRejection {
    fn from(err: BackendError) -> Self {
        Self::Denied(err)
    }
}

impl IntoResponse for EditorRejection {
    fn into_response(self) -> Response {
        match self {
            Self::LoginRequired { login_url } => Redirect::to(&login_url).into_response(),
            Self::Denied(err) => err.into_response(),
        }
    }
}

/// Authorize `user` to edit `collection_id`
///
/// `request_uri` is where the login page should send the user back to.
pub async fn authorize_editor(
    state: &AppState,
    user: Option<User>,
    collection_id: &str,
    request_uri: &str,
) -> Result<CollectionEditor, EditorRejection> {
    let Some(user) = user else {
        tracing::info!("[Editor] Anonymous edit attempt on {}, redirecting to login", collection_id);
        return Err(EditorRejection::LoginRequired {
            login_url: create_login_url(&state.config.login_url, request_uri),
        });
    };

    let collection = state
        .collections
        .get_collection_by_id(collection_id)
        .await
        .ok_or_else(|| {
            tracing::warn!("[Editor] Collection {} not found (requested by {})", collection_id, user.id);
            BackendError::not_found(format!("collection {} not found", collection_id))
        })?;

    if !state.rights.can_edit(Some(&user), collection_id).await {
        return Err(BackendError::unauthorized(
            format!(
                "User {} does not have the credentials to edit collection {}.",
                user.id, collection_id
            ),
            Some(user.id.clone()),
        )
        .into());
    }

    Ok(CollectionEditor { user, collection })
}

impl FromRequestParts<AppState> for CollectionEditor {
    type Rejection = EditorRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(collection_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| BackendError::invalid_input(e.body_text()))?;
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .and_then(|current| current.0.clone());
        let request_uri = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        authorize_editor(state, user, &collection_id, &request_uri).await
    }
}
