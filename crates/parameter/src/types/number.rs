use serde::{Deserialize, Serialize};

use crate::metadata::ParameterMetadata;

/// Options specific to number parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberOptions {
    /// Minimum allowed value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

/// A numeric input parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberParameter {
    #[serde(flatten)]
    pub metadata: ParameterMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<NumberOptions>,
}

impl NumberParameter {
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: ParameterMetadata::new(key, name),
            default: None,
            options: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the lower bound accepted by [`ParameterDef::validate`](crate::def::ParameterDef::validate).
    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.options.get_or_insert_with(NumberOptions::default).min = Some(min);
        self
    }
}
