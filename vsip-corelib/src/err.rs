//! To generate HTTP error response.
//!
//! ```ignore
//! use vsip_corelib::err::ErrResp;
//! // To generate HTTP request body format error.
//! if format_error(body) {
//!     return Err(ErrResp::ErrParam(Some("Invalid JSON".to_string())));
//! }
//! ```
//!
//! All errors share the body format:
//!
//! ```json
//! {"error":"API Error","message":"...","status_code":400,"timestamp":"2024-01-01T00:00:00.000Z"}
//! ```

use std::{error::Error, fmt};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use serde_json;

use crate::strings;

/// The standard error definitions.
#[derive(Debug)]
pub enum ErrResp {
    ErrConflict(Option<String>),
    ErrNotFound(Option<String>),
    ErrNotImplemented(Option<String>),
    ErrParam(Option<String>),
    ErrPerm(Option<String>),
    ErrUnknown(Option<String>),
    ErrUnprocessable(Option<String>),
    Custom(u16, Option<String>),
}

/// Used for generating HTTP body for errors.
#[derive(Serialize)]
struct RespJson<'a> {
    error: &'a str,
    message: &'a str,
    status_code: u16,
    timestamp: String,
}

/// The `error` field of all error responses.
pub const E_API: &'static str = "API Error";

impl ErrResp {
    /// To map a HTTP status code to the error variant. Unknown codes become [`ErrResp::Custom`].
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            400 => ErrResp::ErrParam(message),
            403 => ErrResp::ErrPerm(message),
            404 => ErrResp::ErrNotFound(message),
            409 => ErrResp::ErrConflict(message),
            422 => ErrResp::ErrUnprocessable(message),
            500 => ErrResp::ErrUnknown(message),
            501 => ErrResp::ErrNotImplemented(message),
            _ => ErrResp::Custom(status, message),
        }
    }

    /// The HTTP status code of the error.
    pub fn status_code(&self) -> StatusCode {
        match *self {
            ErrResp::ErrConflict(_) => StatusCode::CONFLICT,
            ErrResp::ErrNotFound(_) => StatusCode::NOT_FOUND,
            ErrResp::ErrNotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ErrResp::ErrParam(_) => StatusCode::BAD_REQUEST,
            ErrResp::ErrPerm(_) => StatusCode::FORBIDDEN,
            ErrResp::ErrUnknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ErrResp::ErrUnprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ErrResp::Custom(code, _) => match StatusCode::from_u16(code) {
                Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
                Ok(code) => code,
            },
        }
    }

    /// The detail message. Uses the canonical reason of the status code if not specified.
    pub fn message(&self) -> &str {
        let desc = match *self {
            ErrResp::ErrConflict(ref desc) => desc,
            ErrResp::ErrNotFound(ref desc) => desc,
            ErrResp::ErrNotImplemented(ref desc) => desc,
            ErrResp::ErrParam(ref desc) => desc,
            ErrResp::ErrPerm(ref desc) => desc,
            ErrResp::ErrUnknown(ref desc) => desc,
            ErrResp::ErrUnprocessable(ref desc) => desc,
            ErrResp::Custom(_, ref desc) => desc,
        };
        match desc.as_deref() {
            None => self.status_code().canonical_reason().unwrap_or(""),
            Some(desc) => desc,
        }
    }

    fn resp_json(&'_ self) -> RespJson<'_> {
        RespJson {
            error: E_API,
            message: self.message(),
            status_code: self.status_code().as_u16(),
            timestamp: strings::time_str(&Utc::now()),
        }
    }
}

impl fmt::Display for ErrResp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match serde_json::to_string(&self.resp_json()) {
            Err(_) => write!(f, "{} {}", self.status_code().as_u16(), self.message()),
            Ok(str) => write!(f, "{}", str),
        }
    }
}

impl Error for ErrResp {}

impl IntoResponse for ErrResp {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.resp_json())).into_response()
    }
}
