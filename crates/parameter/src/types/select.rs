use serde::{Deserialize, Serialize};

use crate::metadata::ParameterMetadata;
use crate::option::SelectOption;

/// A single-choice dropdown parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectParameter {
    #[serde(flatten)]
    pub metadata: ParameterMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    /// The available choices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl SelectParameter {
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: ParameterMetadata::new(key, name),
            default: None,
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, option: SelectOption) -> Self {
        self.options.push(option);
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Whether `value` is one of the declared option values.
    #[must_use]
    pub fn allows(&self, value: &serde_json::Value) -> bool {
        self.options.iter().any(|o| &o.value == value)
    }
}
