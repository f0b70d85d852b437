//! Log / tags API DTOs
use serde::Deserialize;

/// `?level=&id=&pagesize=&offset=&jsonp=`
///
/// Kept as strings so malformed values reach the lenient parsers instead of
/// failing extraction.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct LogDataQuery {
    pub level: Option<String>,
    pub id: Option<String>,
    pub pagesize: Option<String>,
    pub offset: Option<String>,
    pub jsonp: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct JsonpQuery {
    pub jsonp: Option<String>,
}
