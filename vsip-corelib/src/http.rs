//! HTTP request helpers.

use serde_json::{Map, Value};

use crate::err::ErrResp;

/// The message for the body that cannot be parsed as a JSON object.
pub const INVALID_JSON_MSG: &'static str = "Invalid JSON";

/// Parse the request body as a JSON object. An empty body is treated as `{}`.
pub fn parse_json_object(body: &[u8]) -> Result<Map<String, Value>, ErrResp> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Err(_) => Err(ErrResp::ErrParam(Some(INVALID_JSON_MSG.to_string()))),
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ErrResp::ErrParam(Some(INVALID_JSON_MSG.to_string()))),
    }
}

/// Split the URI path into non-empty segments. The query string is ignored.
pub fn path_segments(path: &str) -> Vec<&str> {
    let path = match path.split_once('?') {
        None => path,
        Some((path, _)) => path,
    };
    path.split('/').filter(|s| s.len() > 0).collect()
}
