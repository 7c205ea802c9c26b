pub mod health;
pub mod history;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /generate-image                                  generation proxy (POST)
/// /presets                                         color-grading catalog (GET)
///
/// /history                                         list, create (requires auth)
/// /history/{id}                                    delete (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-image", post(handlers::generate::generate_image))
        .route("/presets", get(handlers::presets::list_presets))
        .nest("/history", history::router())
}
