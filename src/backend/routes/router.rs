/**
 * Router Configuration
 *
 * Combines the editor routes with the identity middleware and request
 * tracing into a single Axum router.
 *
 * # Routes
 *
 * - `GET /editor/{collection_id}` - editor page
 * - `GET /editor/data/{collection_id}` - learner projection
 * - `PUT /editor/data/{collection_id}` - versioned update
 *
 * Anything else falls through to a 404.
 */

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::editor::handlers::{
    collection_editor_page, get_collection_data, update_collection_data,
};
use crate::backend::middleware::identity_middleware;
use crate::backend::server::state::AppState;

pub fn create_router(app_state: AppState) -> Router<()> {
    Router::new()
        .route("/editor/{collection_id}", get(collection_editor_page))
        .route(
            "/editor/data/{collection_id}",
            get(get_collection_data).put(update_collection_data),
        )
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn_with_state(app_state.clone(), identity_middleware)),
        )
        .with_state(app_state)
}
