//! Endpoint documentation route (e.g., /api/v1/endpoints)

use axum::{routing::get, Router};
use crate::api::controller::endpoints::EndpointsController;
use crate::app_state::AppState;

pub fn endpoints_routes() -> Router<AppState> {
    Router::new().route("/", get(EndpointsController::get_endpoints))
}
