use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use whin_action::{ActionError, TransportError};
use whin_parameter::error::ParameterError;

use crate::payload::ContentType;

/// Why one item could not be sent.
///
/// Every variant is item-scoped: with continue-on-fail the node turns it
/// into an [`ErrorRecord`] and moves on, otherwise it aborts the batch as an
/// [`ActionError`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SendError {
    /// Neither the item override nor the credential holds a token.
    #[error("Missing token")]
    MissingToken,

    /// The payload was a string that does not parse as JSON.
    #[error("payload must be valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// The payload is not a JSON object.
    #[error("payload must be a JSON object")]
    InvalidPayloadShape,

    /// The payload `type` is missing or outside the allow-set.
    #[error(
        "unsupported content type {}: `type` must be one of {}",
        describe_found(.found.as_deref()),
        ContentType::allowed_list()
    )]
    UnsupportedContentType {
        /// The `type` value found, if it was a string.
        found: Option<String>,
    },

    /// The `operation` parameter names no known operation.
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    /// The resolved endpoint is not an absolute http(s) URL.
    #[error("invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint {
        /// The endpoint as configured.
        endpoint: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A parameter value does not match its definition.
    #[error(transparent)]
    InvalidParameter(#[from] ParameterError),

    /// The request failed in the transport or at the backend.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

fn describe_found(found: Option<&str>) -> String {
    found.map_or_else(|| "(missing)".to_owned(), |t| format!("`{t}`"))
}

impl SendError {
    /// HTTP status, from the error itself or its nested response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport(err) => err.effective_status(),
            _ => None,
        }
    }

    /// Backend or network error code.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Transport(err) => err.code.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if sending the same item again may succeed.
    ///
    /// Network failures without a status, 429 and 5xx qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => match self.status_code() {
                None => true,
                Some(status) => status == 429 || (500..=599).contains(&status),
            },
            _ => false,
        }
    }

    /// The sanitized record emitted for a tolerated failure.
    pub fn record(&self) -> ErrorRecord {
        ErrorRecord {
            message: self.to_string(),
            status_code: self.status_code(),
            code: self.code().map(str::to_owned),
        }
    }
}

/// A tolerated per-item failure as it appears in the output item.
///
/// Carries no response body, headers or token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Human-readable message.
    pub message: String,
    /// HTTP status, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Backend or network error code, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorRecord {
    /// `"<statusCode> <message>"`, or just the message without a status.
    pub fn summary(&self) -> String {
        match self.status_code {
            Some(status) => format!("{status} {}", self.message),
            None => self.message.clone(),
        }
    }

    /// The record as an output item's JSON object.
    pub fn into_json(self) -> Map<String, Value> {
        let mut json = Map::new();
        json.insert("message".into(), Value::String(self.message));
        if let Some(status) = self.status_code {
            json.insert("statusCode".into(), Value::from(status));
        }
        if let Some(code) = self.code {
            json.insert("code".into(), Value::String(code));
        }
        json
    }
}

impl From<SendError> for ActionError {
    fn from(err: SendError) -> Self {
        let record = err.record();
        let summary = record.summary();
        match err {
            SendError::Transport(_) if err.is_retryable() => {
                ActionError::retryable_with_details(summary, Value::Object(record.into_json()))
            }
            SendError::Transport(_) | SendError::MissingToken | SendError::InvalidEndpoint { .. } => {
                ActionError::fatal_with_details(summary, Value::Object(record.into_json()))
            }
            _ => ActionError::validation(summary),
        }
    }
}
