//! Content payload normalization.
//!
//! The node's contract is content-only: the user supplies one WhatsApp
//! content object (`text`, `image`, `template`, ...) and never the envelope
//! around it. Envelope fields are dropped if present anyway.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use whin_credential::SecretString;

use crate::credentials::TOKEN;
use crate::error::SendError;

/// Envelope fields removed from every payload.
pub const ENVELOPE_FIELDS: [&str; 3] = ["messaging_product", "to", "context"];

/// Content types the backend accepts in the payload `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Template,
    Image,
    Audio,
    Video,
    Document,
    Sticker,
    Contacts,
    Location,
    Interactive,
    Reaction,
}

impl ContentType {
    /// The allow-set, in documentation order.
    pub const ALL: [Self; 11] = [
        Self::Text,
        Self::Template,
        Self::Image,
        Self::Audio,
        Self::Video,
        Self::Document,
        Self::Sticker,
        Self::Contacts,
        Self::Location,
        Self::Interactive,
        Self::Reaction,
    ];

    /// Wire value of the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Template => "template",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Document => "document",
            Self::Sticker => "sticker",
            Self::Contacts => "contacts",
            Self::Location => "location",
            Self::Interactive => "interactive",
            Self::Reaction => "reaction",
        }
    }

    /// Look up a wire value. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// The allow-set as a comma-separated list.
    pub fn allowed_list() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload parameter as the host delivers it.
///
/// The JSON editor yields raw text; an expression may yield any value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// Editor text, to be parsed.
    Text(String),
    /// An already-evaluated value.
    Value(Value),
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Value(other),
        }
    }
}

/// A validated, envelope-free content object.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPayload {
    content_type: ContentType,
    fields: Map<String, Value>,
}

impl ContentPayload {
    /// The validated `type`.
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// The content fields, `type` included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Request body: the content plus `token`.
    ///
    /// The injected token replaces any `token` key already in the content.
    pub fn into_body(self, token: &SecretString) -> Value {
        let mut body = self.fields;
        body.insert(
            TOKEN.to_owned(),
            token.expose_secret(|t| Value::String(t.to_owned())),
        );
        Value::Object(body)
    }
}

impl From<ContentPayload> for Value {
    fn from(payload: ContentPayload) -> Self {
        Value::Object(payload.fields)
    }
}

/// Remove envelope fields. Applying it twice changes nothing.
pub fn strip_envelope(fields: &mut Map<String, Value>) {
    for key in ENVELOPE_FIELDS {
        fields.remove(key);
    }
}

/// Parse, shape-check, strip and type-check a payload.
///
/// Text is trimmed and parsed as JSON first. Feeding the fields of a
/// returned payload back in yields the same payload.
pub fn normalize(raw: RawPayload) -> Result<ContentPayload, SendError> {
    let value = match raw {
        RawPayload::Text(text) => serde_json::from_str(text.trim()).map_err(SendError::InvalidJson)?,
        RawPayload::Value(value) => value,
    };

    let Value::Object(mut fields) = value else {
        return Err(SendError::InvalidPayloadShape);
    };

    strip_envelope(&mut fields);

    let found = fields.get("type").and_then(Value::as_str);
    let content_type = found
        .and_then(ContentType::from_name)
        .ok_or_else(|| SendError::UnsupportedContentType {
            found: found.map(str::to_owned),
        })?;

    Ok(ContentPayload {
        content_type,
        fields,
    })
}
