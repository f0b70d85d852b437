//! Tag routes (e.g., /api/v1/tags)

use axum::{routing::get, Router};
use crate::api::controller::tags::TagsController;
use crate::app_state::AppState;

pub fn tags_routes() -> Router<AppState> {
    Router::new().route("/", get(TagsController::get_tags))
}
