use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Untrusted identifier: {0}")]
    UntrustedIdentifier(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::InternalServerError(err.to_string())
}

/// Store failures are fatal for the request; keep the whole context chain.
pub fn database_error(err: anyhow::Error) -> AppError {
    AppError::DatabaseError(format!("{:#}", err))
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Choose status codes per variant
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TransportError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UntrustedIdentifier(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untrusted_identifier_is_a_server_fault() {
        let resp = AppError::UntrustedIdentifier("Users".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_message_body() {
        let resp = AppError::NotFound("/nope".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["message"], "Not found: /nope");
    }

    #[test]
    fn database_error_keeps_context_chain() {
        let err = anyhow::anyhow!("no such table: Nope").context("Failed to dump table");
        match database_error(err) {
            AppError::DatabaseError(msg) => {
                assert!(msg.contains("Failed to dump table"));
                assert!(msg.contains("no such table"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
