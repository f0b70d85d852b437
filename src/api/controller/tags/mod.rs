use axum::extract::{Query, State};
use axum::response::Response;
use tracing::error;

use crate::api::dto::log_data_dto::JsonpQuery;
use crate::api::util::endpoint_doc::EndpointDoc;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct TagsController;

impl TagsController {
    pub const DOC: EndpointDoc = EndpointDoc {
        path: "/api/v1/tags",
        method: "GET",
        description: "Gets the list of tags",
        response_type: "string[]",
    };

    pub async fn get_tags(
        State(state): State<AppState>,
        Query(query): Query<JsonpQuery>,
    ) -> Result<Response, AppError> {
        let result = to_json(query.jsonp, state.tags_service.get_tags().await);

        if let Err(err) = &result {
            error!(error = %err, "Tags request failed");
            state.log_data_service.record_failure("/api/v1/tags", err);
        }

        result
    }
}
