use serde::{Deserialize, Serialize};

use crate::metadata::ParameterMetadata;

/// A JSON editor parameter.
///
/// The host hands the value over either as the raw editor text or, when the
/// field holds an expression, as the already-evaluated JSON value. Consumers
/// decide how to interpret a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonParameter {
    #[serde(flatten)]
    pub metadata: ParameterMetadata,

    /// Editor text shown for a fresh node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl JsonParameter {
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: ParameterMetadata::new(key, name),
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}
