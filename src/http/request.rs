//! Request handling and transformation.
//!
//! # Responsibilities
//! - Read the incoming axum request into an immutable `PageRequest`
//! - Decode urlencoded form payloads
//! - Carry the request ID assigned by the request-id layer
//!
//! # Design Decisions
//! - Body size is checked against Content-Length before reading
//! - Non-form bodies are read (to enforce the limit) and then discarded

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode};
use thiserror::Error;
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Errors raised before a request enters the pipeline.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    Body(String),
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RequestError::Body(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// The request as seen by pipeline steps.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub form: Vec<(String, String)>,
    pub request_id: String,
}

impl PageRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            form: Vec::new(),
            request_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post_form(path: impl Into<String>, fields: &[(&str, &str)]) -> Self {
        let mut req = Self::new(Method::POST, path);
        req.form = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        req
    }

    /// Add a header. Values that are not valid header text are ignored.
    pub fn with_header(mut self, name: header::HeaderName, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.append(name, value);
        }
        self
    }

    /// First form field named `key`.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of the cookie named `name`, across all Cookie headers.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
    }

    /// Build from an HTTP request, reading at most `limit` body bytes.
    pub async fn from_http(request: Request<Body>, limit: usize) -> Result<Self, RequestError> {
        let (parts, body) = request.into_parts();

        let declared = parts
            .headers
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());
        if declared.is_some_and(|len| len > limit) {
            return Err(RequestError::TooLarge { limit });
        }

        let bytes = axum::body::to_bytes(body, limit)
            .await
            .map_err(|e| RequestError::Body(e.to_string()))?;

        let is_form = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with(FORM_CONTENT_TYPE));
        let form = if is_form {
            url::form_urlencoded::parse(&bytes).into_owned().collect()
        } else {
            Vec::new()
        };

        let request_id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self {
            method: parts.method,
            path: parts.uri.path().to_string(),
            headers: parts.headers,
            form,
            request_id,
        })
    }
}
