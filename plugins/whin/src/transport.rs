//! `reqwest`-backed implementation of the HTTP port.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use whin_action::{HttpRequest, HttpTransport, TransportError};

/// Sends requests with a shared, pooled [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport over an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let mut builder = self.client.request(method, url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(from_reqwest)?;
        let status = response.status();
        let text = response.text().await.map_err(from_reqwest)?;
        let body = parse_body(&text);

        if status.is_success() {
            Ok(body)
        } else {
            Err(error_from_response(status, body))
        }
    }
}

/// Empty text is `null`; anything unparsable is kept as a JSON string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

/// Error for a non-2xx response.
///
/// The message is taken from the body's `error` or `message` field (either
/// may be an object with its own `message`), falling back to the status
/// reason. A `code` field becomes the error code.
fn error_from_response(status: StatusCode, body: Value) -> TransportError {
    let message = ["error", "message"]
        .into_iter()
        .find_map(|key| match body.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Object(inner) => inner.get("message")?.as_str().map(str::to_owned),
            _ => None,
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
        });

    let code = match body.get("code") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let mut err = TransportError::new(message).with_response(status.as_u16(), body);
    if let Some(code) = code {
        err = err.with_code(code);
    }
    err
}

fn from_reqwest(err: reqwest::Error) -> TransportError {
    let mut out = TransportError::new(err.to_string());
    if err.is_timeout() {
        out = out.with_code(whin_action::transport::TIMEOUT_CODE);
    } else if err.is_connect() {
        out = out.with_code("ECONNREFUSED");
    }
    if let Some(status) = err.status() {
        out = out.with_status(status.as_u16());
    }
    out
}
