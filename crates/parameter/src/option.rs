use serde::{Deserialize, Serialize};

/// A single option in a select parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Machine-readable identifier.
    pub key: String,

    /// Human-readable display label.
    pub name: String,

    /// The value produced when this option is selected.
    pub value: serde_json::Value,

    /// Optional tooltip or help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SelectOption {
    /// Create a new option with the given key, name, and value.
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            value,
            description: None,
        }
    }

    /// Attach help text to the option.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
