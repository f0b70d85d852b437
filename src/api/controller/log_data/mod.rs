//! Log controller: polling the live log buffer, listing the persisted error log

use axum::extract::{Path, Query, State};
use axum::response::Response;
use tracing::error;

use crate::api::dto::log_data_dto::LogDataQuery;
use crate::api::util::endpoint_doc::EndpointDoc;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::log_data::dto::log_poll_request::LogPollRequest;
use crate::domain::log_data::service::log_data_service::LogDataMode;
use crate::errors::AppError;

pub struct LogDataController;

impl LogDataController {
    pub const DOC: EndpointDoc = EndpointDoc {
        path: "/api/v1/logdata",
        method: "GET",
        description: "Retrieves system log data",
        response_type: "map<string, string>[]",
    };

    pub async fn get_log_data(
        State(state): State<AppState>,
        Query(query): Query<LogDataQuery>,
    ) -> Result<Response, AppError> {
        Self::respond(&state, None, query).await
    }

    pub async fn get_log_data_by_key(
        State(state): State<AppState>,
        Path(key): Path<String>,
        Query(query): Query<LogDataQuery>,
    ) -> Result<Response, AppError> {
        Self::respond(&state, Some(key.as_str()), query).await
    }

    async fn respond(
        state: &AppState,
        key: Option<&str>,
        query: LogDataQuery,
    ) -> Result<Response, AppError> {
        let service = &state.log_data_service;

        let result = match LogDataMode::from_key(key) {
            LogDataMode::Poll => {
                let req = LogPollRequest::from_raw(
                    query.level.as_deref(),
                    query.id.as_deref(),
                    query.pagesize.as_deref(),
                );
                to_json(query.jsonp, service.poll(req).await)
            }
            LogDataMode::List => to_json(
                query.jsonp,
                service
                    .list(query.offset.as_deref(), query.pagesize.as_deref())
                    .await,
            ),
        };

        if let Err(err) = &result {
            error!(error = %err, ?key, "Log data request failed");
            service.record_failure("/api/v1/logdata", err);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::test_state;
    use crate::core::persistence::database::backing_store_trait::BackingStore;
    use crate::core::state::log_buffer::log_entry::Severity;
    use axum::http::{header, StatusCode};
    use serde_json::Value;

    async fn body_string(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> LogDataQuery {
        let mut q = LogDataQuery::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "level" => q.level = v,
                "id" => q.id = v,
                "pagesize" => q.pagesize = v,
                "offset" => q.offset = v,
                "jsonp" => q.jsonp = v,
                _ => unreachable!(),
            }
        }
        q
    }

    #[tokio::test]
    async fn poll_returns_buffer_entries_after_cursor() {
        let (state, store, buffer) = test_state();
        for i in 0..5 {
            buffer.push(Severity::Information, "test", format!("line {i}"), None);
        }
        store.insert_error_log(None, "persisted", None, 1).unwrap();

        let resp = LogDataController::get_log_data_by_key(
            State(state),
            Path("poll".to_string()),
            Query(query(&[("id", "3"), ("level", ""), ("pagesize", "abc")])),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate, max-age=0");
        let body: Value = serde_json::from_str(&body_string(resp).await).unwrap();
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["ID"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[tokio::test]
    async fn unknown_key_lists_error_log_as_jsonp() {
        let (state, store, _buffer) = test_state();
        store.insert_error_log(Some(1), "first", None, 100).unwrap();
        store.insert_error_log(Some(1), "second", None, 200).unwrap();

        let resp = LogDataController::get_log_data_by_key(
            State(state),
            Path("history".to_string()),
            Query(query(&[("jsonp", "render"), ("offset", ""), ("pagesize", "1000")])),
        )
        .await
        .unwrap();

        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
        let body = body_string(resp).await;
        let inner = body
            .strip_prefix("render(")
            .and_then(|b| b.strip_suffix(')'))
            .expect("jsonp framing");
        let rows: Value = serde_json::from_str(inner).unwrap();
        assert_eq!(rows[0]["Message"], "second");
        assert_eq!(rows[1]["Message"], "first");
    }

    #[tokio::test]
    async fn no_key_lists_error_log() {
        let (state, store, _buffer) = test_state();
        store.insert_error_log(None, "only", None, 5).unwrap();

        let resp = LogDataController::get_log_data(State(state), Query(LogDataQuery::default()))
            .await
            .unwrap();

        let body: Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }
}
