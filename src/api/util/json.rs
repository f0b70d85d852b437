use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::api::util::response_writer::{BufferedTransport, ResponseWriter};
use crate::errors::AppError;

/// Frames a successful result through [`ResponseWriter`]; errors pass through
/// to `AppError`'s response.
pub fn to_json<T: Serialize>(
    jsonp: Option<String>,
    result: Result<T, AppError>,
) -> Result<Response, AppError> {
    let value = result?;

    let mut writer = ResponseWriter::new(BufferedTransport::new(), jsonp);
    writer.output_success(&value)?;
    Ok(writer.finish()?.into_response())
}
