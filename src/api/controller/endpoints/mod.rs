//! Lists the documented API endpoints

use axum::extract::Query;
use axum::response::Response;

use crate::api::controller::log_data::LogDataController;
use crate::api::controller::tags::TagsController;
use crate::api::dto::log_data_dto::JsonpQuery;
use crate::api::util::endpoint_doc::EndpointDoc;
use crate::api::util::json::to_json;
use crate::errors::AppError;

pub const DOCUMENTED_ENDPOINTS: [EndpointDoc; 2] = [LogDataController::DOC, TagsController::DOC];

pub struct EndpointsController;

impl EndpointsController {
    pub async fn get_endpoints(Query(query): Query<JsonpQuery>) -> Result<Response, AppError> {
        to_json(query.jsonp, Ok(DOCUMENTED_ENDPOINTS))
    }
}
