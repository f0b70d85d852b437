//! Log routes (e.g., /api/v1/logdata/*)

use axum::{routing::get, Router};
use crate::api::controller::log_data::LogDataController;
use crate::app_state::AppState;

pub fn log_data_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(LogDataController::get_log_data))
        .route("/{key}", get(LogDataController::get_log_data_by_key))
}
