//! A wrapped HTTP client that is used for vSIP trunk APIs with the following features:
//! - Every request carries HTTP basic authentication with the API key and token.
//! - All paths are relative to `{base_url}/v2/accounts/{account_sid}`.
//! - Non-2xx responses are parsed into [`ApiError`].
//!
//! Here is an example to create a client to access an API:
//!
//! ```rust,no_run
//! use reqwest::Method;
//! use vsip_sdk::api::http::{Client, ClientOptions};
//!
//! async fn run() {
//!     let opts = ClientOptions {
//!         base_url: "https://api.example.com".to_string(),
//!         account_sid: "ACCOUNT_SID".to_string(),
//!         auth_key: "AUTH_KEY".to_string(),
//!         auth_token: "AUTH_TOKEN".to_string(),
//!         timeout: None,
//!     };
//!     let client = match Client::new(opts) {
//!         Err(e) => return,
//!         Ok(client) => client,
//!     };
//!     match client.request(Method::GET, "/trunks/TR123/credentials", None).await {
//!         Err(e) => {
//!             // Handle transport errors.
//!         }
//!         Ok((status_code, body)) => {
//!             // Handle response.
//!         }
//!     }
//! }
//! ```
use std::{error::Error as StdError, fmt, time::Duration};

use reqwest::{Client as ReqwestClient, Method, StatusCode, header};
use serde::Deserialize;
use serde_json::{Map, Value};

/// The HTTP client to request vSIP trunk APIs.
#[derive(Clone)]
pub struct Client {
    /// The underlying HTTP client instance.
    client: ReqwestClient,
    /// `{base_url}/v2/accounts/{account_sid}`.
    account_base: String,
    auth_key: String,
    auth_token: String,
}

/// Options of the HTTP client [`Client`].
#[derive(Clone, Default)]
pub struct ClientOptions {
    /// The base URL with scheme. For example `https://api.example.com`.
    pub base_url: String,
    /// Account SID.
    pub account_sid: String,
    /// API key (basic authentication user name).
    pub auth_key: String,
    /// API token (basic authentication password).
    pub auth_token: String,
    /// Timeout of each request. No timeout when `None`.
    pub timeout: Option<Duration>,
}

#[derive(Debug)]
pub enum Error {
    /// Missing or invalid client options.
    Config(String),
    /// Transport, timeout or decoding errors.
    Std(Box<dyn StdError + Send + Sync>),
    /// Non-2xx responses.
    Api(ApiError),
}

/// The error response of the API.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: StatusCode,
    /// The `error` field of the body.
    pub error: Option<String>,
    /// The `message` field of the body.
    pub message: Option<String>,
    /// The raw response body.
    pub body: String,
}

/// Classification of [`ApiError`] by status codes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorKind {
    /// 400
    Malformed,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 422
    Unprocessable,
    Other,
}

#[derive(Deserialize)]
struct ErrBody {
    error: Option<String>,
    message: Option<String>,
}

/// The message when connection fields or credentials are missing.
pub const E_MISSING_CONFIG: &'static str = "Missing required environment variables (EXO_AUTH_KEY, EXO_AUTH_TOKEN, EXO_SUBSCRIBIX_DOMAIN, EXO_ACCOUNT_SID)";

impl Client {
    /// Create an instance.
    ///
    /// All string options must not be empty.
    pub fn new(opts: ClientOptions) -> Result<Self, Error> {
        if opts.base_url.len() == 0
            || opts.account_sid.len() == 0
            || opts.auth_key.len() == 0
            || opts.auth_token.len() == 0
        {
            return Err(Error::Config(E_MISSING_CONFIG.to_string()));
        }

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = opts.timeout {
            builder = builder.timeout(timeout);
        }
        let client = match builder.build() {
            Err(e) => return Err(Error::Std(Box::new(e))),
            Ok(client) => client,
        };
        Ok(Client {
            client,
            account_base: format!(
                "{}/v2/accounts/{}",
                opts.base_url.trim_end_matches('/'),
                opts.account_sid
            ),
            auth_key: opts.auth_key,
            auth_token: opts.auth_token,
        })
    }

    /// Execute a vSIP API request.
    /// - `api_path` is the relative path (of the account) of the API with query string.
    ///   For example: `/trunks/TR123/phone-numbers`.
    /// - `body` will be sent as JSON.
    ///
    /// Responses of all status codes are returned as `Ok`.
    pub async fn request(
        &self,
        method: Method,
        api_path: &str,
        body: Option<&Value>,
    ) -> Result<(StatusCode, String), Error> {
        let url = format!("{}{}", self.account_base, api_path);
        let mut builder = self
            .client
            .request(method, url.as_str())
            .basic_auth(self.auth_key.as_str(), Some(self.auth_token.as_str()));
        builder = match body {
            None => builder.header(header::CONTENT_TYPE, "application/json"),
            Some(body) => builder.json(body),
        };
        let req = match builder.build() {
            Err(e) => return Err(Error::Std(Box::new(e))),
            Ok(req) => req,
        };
        let resp = match self.client.execute(req).await {
            Err(e) => return Err(Error::Std(Box::new(e))),
            Ok(resp) => resp,
        };
        let status = resp.status();
        match resp.text().await {
            Err(e) => Err(Error::Std(Box::new(e))),
            Ok(body) => Ok((status, body)),
        }
    }

    /// Execute a vSIP API request and parse the JSON body of 2xx responses. An empty body is
    /// treated as an empty object.
    ///
    /// Other status codes are returned as [`Error::Api`].
    pub async fn request_json(
        &self,
        method: Method,
        api_path: &str,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let (status, body) = self.request(method, api_path, body).await?;
        if !status.is_success() {
            return Err(Error::Api(ApiError::new(status, body)));
        }
        if body.trim().len() == 0 {
            return Ok(Value::Object(Map::new()));
        }
        match serde_json::from_str::<Value>(body.as_str()) {
            Err(e) => Err(Error::Std(Box::new(e))),
            Ok(value) => Ok(value),
        }
    }
}

impl ApiError {
    /// To parse an error body. Bodies that are not JSON keep `error` and `message` empty.
    pub fn new(status: StatusCode, body: String) -> Self {
        let (error, message) = match serde_json::from_str::<ErrBody>(body.as_str()) {
            Err(_) => (None, None),
            Ok(v) => (v.error, v.message),
        };
        ApiError {
            status,
            error,
            message,
            body,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            StatusCode::BAD_REQUEST => ErrorKind::Malformed,
            StatusCode::FORBIDDEN => ErrorKind::Forbidden,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::CONFLICT => ErrorKind::Conflict,
            StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::Unprocessable,
            _ => ErrorKind::Other,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP Error {}: {}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("")
        )?;
        match self.message.as_ref() {
            None => match self.body.len() {
                0 => Ok(()),
                _ => write!(f, " {}", self.body),
            },
            Some(message) => write!(f, " ({})", message),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "{}", e),
            Error::Std(e) => write!(f, "{}", e),
            Error::Api(e) => write!(f, "{}", e),
        }
    }
}

impl StdError for Error {}
