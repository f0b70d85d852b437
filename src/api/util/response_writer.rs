//! JSON / JSONP response framing with a single header commit.
//!
//! The head (status, content type, cache control, content length) reaches the
//! transport at most once. [`ResponseWriter::finish`] is the only flush point:
//! it measures the buffered body, sends the head if nobody sent it earlier,
//! then sends the body.

use std::mem;

use axum::body::{Body, Bytes};
use axum::response::{IntoResponse, Response};
use http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, StatusCode};
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;

pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate, max-age=0";

/// Outgoing side of one HTTP exchange.
pub trait ResponseTransport {
    fn headers_sent(&self) -> bool;

    /// Commits the head. Fails if it was already committed.
    fn send_headers(&mut self, status: StatusCode, headers: HeaderMap) -> Result<(), AppError>;

    fn send_body(&mut self, chunk: Bytes) -> Result<(), AppError>;
}

/// Collects the exchange in memory and hands it to axum as one `Response`.
#[derive(Debug, Default)]
pub struct BufferedTransport {
    head: Option<(StatusCode, HeaderMap)>,
    body: Vec<u8>,
}

impl BufferedTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseTransport for BufferedTransport {
    fn headers_sent(&self) -> bool {
        self.head.is_some()
    }

    fn send_headers(&mut self, status: StatusCode, headers: HeaderMap) -> Result<(), AppError> {
        if self.head.is_some() {
            return Err(AppError::TransportError("headers already sent".into()));
        }
        self.head = Some((status, headers));
        Ok(())
    }

    fn send_body(&mut self, chunk: Bytes) -> Result<(), AppError> {
        if self.head.is_none() {
            return Err(AppError::TransportError("body sent before headers".into()));
        }
        self.body.extend_from_slice(&chunk);
        Ok(())
    }
}

impl IntoResponse for BufferedTransport {
    fn into_response(self) -> Response {
        let Some((status, headers)) = self.head else {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        };

        let mut resp = Response::new(Body::from(self.body));
        *resp.status_mut() = status;
        *resp.headers_mut() = headers;
        resp
    }
}

#[derive(Serialize)]
struct StatusOk {
    #[serde(rename = "Status")]
    status: &'static str,
}

const SUCCESS_RESPONSE: StatusOk = StatusOk { status: "OK" };

pub struct ResponseWriter<T: ResponseTransport = BufferedTransport> {
    transport: T,
    jsonp: Option<String>,
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    written: bool,
}

/// JSONP callbacks are limited to dotted JavaScript identifiers.
fn is_valid_callback(callback: &str) -> bool {
    let mut chars = callback.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.'))
}

impl<T: ResponseTransport> ResponseWriter<T> {
    /// `jsonp` is the callback name from the request; empty means plain JSON.
    /// A name that is not an identifier is ignored and the response is plain JSON.
    pub fn new(transport: T, jsonp: Option<String>) -> Self {
        let jsonp = jsonp.filter(|cb| !cb.is_empty()).filter(|cb| {
            let valid = is_valid_callback(cb);
            if !valid {
                warn!(callback = %cb, "Ignoring invalid JSONP callback");
            }
            valid
        });

        Self {
            transport,
            jsonp,
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
            written: false,
        }
    }

    pub fn set_success(&mut self) {
        self.status = StatusCode::OK;
    }

    /// Buffers `value` as JSON, wrapped as `callback(<json>)` for JSONP.
    ///
    /// One payload per response: a second call fails and leaves the body as is.
    /// serde_json output does not depend on the host locale.
    pub fn write_json<V: Serialize + ?Sized>(&mut self, value: &V) -> Result<(), AppError> {
        if self.written {
            return Err(AppError::InternalServerError(
                "response body already written".into(),
            ));
        }

        if !self.transport.headers_sent() {
            self.headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        // serialize first so a failure leaves the body untouched
        let json = serde_json::to_vec(value)?;

        match &self.jsonp {
            Some(callback) => {
                self.body.extend_from_slice(callback.as_bytes());
                self.body.push(b'(');
                self.body.extend_from_slice(&json);
                self.body.push(b')');
            }
            None => self.body.extend_from_slice(&json),
        }
        self.written = true;

        Ok(())
    }

    pub fn output_success<V: Serialize + ?Sized>(&mut self, value: &V) -> Result<(), AppError> {
        self.set_success();
        self.write_json(value)
    }

    /// `{"Status":"OK"}`
    pub fn output_ok(&mut self) -> Result<(), AppError> {
        self.output_success(&SUCCESS_RESPONSE)
    }

    /// Sends the head now, without a content length, for callers that stream.
    pub fn commit_headers(&mut self) -> Result<(), AppError> {
        if self.transport.headers_sent() {
            return Ok(());
        }
        self.send_head(None)
    }

    /// Flushes the response. Consumes the writer, so this happens once.
    pub fn finish(mut self) -> Result<T, AppError> {
        if !self.transport.headers_sent() {
            self.send_head(Some(self.body.len()))?;
        }

        if !self.body.is_empty() {
            let body = mem::take(&mut self.body);
            self.transport.send_body(Bytes::from(body))?;
        }

        Ok(self.transport)
    }

    fn send_head(&mut self, content_length: Option<usize>) -> Result<(), AppError> {
        self.headers
            .insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
        if let Some(len) = content_length {
            self.headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
        }

        let headers = mem::take(&mut self.headers);
        self.transport.send_headers(self.status, headers)
    }
}
