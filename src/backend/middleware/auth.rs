/**
 * Identity Middleware
 *
 * Resolves the caller's identity before any handler runs. Requests without
 * an `Authorization` header continue anonymously; requests with a malformed
 * or invalid bearer token are rejected with 401. The resolved identity (or
 * its absence) is stored in request extensions as `CurrentUser`.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;

use crate::backend::auth::sessions::verify_token;
use crate::backend::server::state::AppState;
use crate::shared::User;

/// Identity attached to every request by `identity_middleware`
#[derive(Clone, Debug, Default)]
pub struct CurrentUser(pub Option<User>);

pub async fn identity_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user = match request.headers().get(AUTHORIZATION) {
        None => None,
        Some(value) => {
            let header = value.to_str().map_err(|_| {
                tracing::warn!("Non-ASCII Authorization header");
                StatusCode::UNAUTHORIZED
            })?;
            let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                tracing::warn!("Invalid Authorization header format");
                StatusCode::UNAUTHORIZED
            })?;
            let user = verify_token(&app_state.config.jwt_secret, token).map_err(|e| {
                tracing::warn!("Invalid token: {:?}", e);
                StatusCode::UNAUTHORIZED
            })?;
            tracing::debug!("Authenticated request from {} ({})", user.username, user.id);
            Some(user)
        }
    };

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Extractor for the optional caller identity
///
/// Never rejects: an anonymous caller yields `MaybeUser(None)`.
#[derive(Clone, Debug)]
pub struct MaybeUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .and_then(|current| current.0.clone());
        Ok(MaybeUser(user))
    }
}
