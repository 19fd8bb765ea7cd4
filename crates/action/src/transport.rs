//! Outbound HTTP port.
//!
//! The host owns the HTTP primitive. A node describes one request as an
//! [`HttpRequest`] and gets back either the parsed JSON body or a
//! [`TransportError`] carrying whatever status and backend code the host
//! could recover.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error code used when a request exceeds its timeout.
pub const TIMEOUT_CODE: &str = "ETIMEDOUT";

/// One outbound HTTP request.
#[derive(Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: http::Method,
    /// Absolute target URL.
    pub url: url::Url,
    /// Request headers. Values may carry secrets.
    pub headers: BTreeMap<String, String>,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// A POST with no headers, body or timeout.
    pub fn post(url: url::Url) -> Self {
        Self {
            method: http::Method::POST,
            url,
            headers: BTreeMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Set a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the JSON body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Header values and the body carry the bearer token.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("body", &self.body.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// The response attached to a failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status of the response.
    pub status_code: u16,
    /// Parsed body, or the raw text as a JSON string.
    #[serde(default)]
    pub body: Value,
}

/// A failed request as reported by the host transport.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable message.
    pub message: String,
    /// HTTP status, when the error itself carries one.
    pub status_code: Option<u16>,
    /// Backend or network error code (e.g. `ETIMEDOUT`).
    pub code: Option<String>,
    /// Response received before the failure, if any.
    pub response: Option<ErrorResponse>,
}

impl TransportError {
    /// Error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            code: None,
            response: None,
        }
    }

    /// The request did not finish within `timeout`.
    pub fn timed_out(timeout: Duration) -> Self {
        Self::new(format!("request timed out after {}ms", timeout.as_millis()))
            .with_code(TIMEOUT_CODE)
    }

    /// Set the status code.
    #[must_use]
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Set the error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach the response.
    #[must_use]
    pub fn with_response(mut self, status_code: u16, body: Value) -> Self {
        self.response = Some(ErrorResponse { status_code, body });
        self
    }

    /// Status from the error itself, else from its nested response.
    pub fn effective_status(&self) -> Option<u16> {
        self.status_code
            .or_else(|| self.response.as_ref().map(|r| r.status_code))
    }

    /// Returns `true` if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        self.code.as_deref() == Some(TIMEOUT_CODE)
    }
}

/// Port trait for sending HTTP requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request and return the parsed JSON body.
    ///
    /// An empty body is returned as [`Value::Null`]. Non-2xx responses are
    /// errors.
    async fn send(&self, request: HttpRequest) -> Result<Value, TransportError>;
}
