use serde::Serialize;

/// Self-description a controller publishes for its endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EndpointDoc {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
    /// Shape of a successful response body.
    pub response_type: &'static str,
}
