use axum::{
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::app_state::AppState;
use crate::errors::AppError;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    // Log and tag subrouters live under /api/v1
    let api_v1 = Router::new()
        .nest("/logdata", crate::api::routes::log_data_routes::log_data_routes())
        .nest("/tags", crate::api::routes::tags_routes::tags_routes())
        .nest("/endpoints", crate::api::routes::endpoints_routes::endpoints_routes());

    Router::new()
        // Root route
        .route("/", get(root))
        // Health check
        .route("/health", get(health_check))
        // API v1
        .nest("/api/v1", api_v1)

        // Fallback handler for 404
        .fallback(handler_404)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

// Handler for root
async fn root() -> &'static str {
    "Server is running!"
}

// Handler for health check
async fn health_check() -> &'static str {
    "OK"
}

// Handler for 404 Not Found
async fn handler_404() -> AppError {
    AppError::NotFound("The requested resource was not found".into())
}
