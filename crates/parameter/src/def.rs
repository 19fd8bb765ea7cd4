use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ParameterError, describe_value};
use crate::kind::ParameterKind;
use crate::metadata::ParameterMetadata;
use crate::types::*;

/// A concrete parameter definition, tagged by type.
///
/// Each variant wraps a specific parameter type struct. The `type` field
/// in JSON determines which variant is used during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterDef {
    Text(TextParameter),
    Secret(SecretParameter),
    Number(NumberParameter),
    Select(SelectParameter),
    Json(JsonParameter),
}

macro_rules! delegate_metadata {
    ($self:ident, $($ref:tt)+) => {
        match $self {
            Self::Text(p) => $($ref)+ p.metadata,
            Self::Secret(p) => $($ref)+ p.metadata,
            Self::Number(p) => $($ref)+ p.metadata,
            Self::Select(p) => $($ref)+ p.metadata,
            Self::Json(p) => $($ref)+ p.metadata,
        }
    };
}

impl ParameterDef {
    /// The unique key identifying this parameter.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.metadata().key
    }

    /// The human-readable display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata().name
    }

    /// The parameter kind (determines UI widget and value semantics).
    #[must_use]
    pub fn kind(&self) -> ParameterKind {
        match self {
            Self::Text(_) => ParameterKind::Text,
            Self::Secret(_) => ParameterKind::Secret,
            Self::Number(_) => ParameterKind::Number,
            Self::Select(_) => ParameterKind::Select,
            Self::Json(_) => ParameterKind::Json,
        }
    }

    /// Access the full metadata for this parameter.
    #[must_use]
    pub fn metadata(&self) -> &ParameterMetadata {
        delegate_metadata!(self, &)
    }

    /// Mutable access to the metadata, for builder-style tweaks.
    pub fn metadata_mut(&mut self) -> &mut ParameterMetadata {
        delegate_metadata!(self, &mut)
    }

    /// Whether this parameter is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.metadata().required
    }

    /// Whether this parameter's value should be masked in UI and logs.
    #[must_use]
    pub fn is_sensitive(&self) -> bool {
        self.metadata().sensitive
    }

    /// Mark the parameter as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.metadata_mut().required = true;
        self
    }

    /// Attach help text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata_mut().description = Some(description.into());
        self
    }

    /// Forbid expressions for this field.
    #[must_use]
    pub fn no_data_expression(mut self) -> Self {
        self.metadata_mut().no_data_expression = true;
        self
    }

    /// The declared default as a JSON value, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<Value> {
        match self {
            Self::Text(p) => p.default.clone().map(Value::String),
            Self::Secret(_) => None,
            Self::Number(p) => p.default.and_then(serde_json::Number::from_f64).map(Value::Number),
            Self::Select(p) => p.default.clone(),
            Self::Json(p) => p.default.clone().map(Value::String),
        }
    }

    /// Check a resolved value against this definition.
    ///
    /// `None` and `null` are treated as "no value": an error only when the
    /// parameter is required.
    pub fn validate(&self, value: Option<&Value>) -> Result<(), ParameterError> {
        let value = match value {
            None | Some(Value::Null) => {
                return if self.is_required() {
                    Err(ParameterError::MissingValue {
                        key: self.key().to_owned(),
                    })
                } else {
                    Ok(())
                };
            }
            Some(v) => v,
        };

        match self {
            Self::Text(_) | Self::Secret(_) => self.expect_str(value).map(|_| ()),
            Self::Number(p) => {
                let n = value.as_f64().ok_or_else(|| self.invalid_type("number", value))?;
                if let Some(min) = p.options.as_ref().and_then(|o| o.min)
                    && n < min
                {
                    return Err(self.invalid_value(format!("must be at least {min}")));
                }
                Ok(())
            }
            Self::Select(p) => {
                if p.allows(value) {
                    Ok(())
                } else {
                    let allowed: Vec<String> =
                        p.options.iter().map(|o| o.value.to_string()).collect();
                    Err(self.invalid_value(format!(
                        "must be one of: {}",
                        allowed.join(", ")
                    )))
                }
            }
            // Shape checks belong to whoever interprets the payload.
            Self::Json(_) => Ok(()),
        }
    }

    fn expect_str<'v>(&self, value: &'v Value) -> Result<&'v str, ParameterError> {
        value.as_str().ok_or_else(|| self.invalid_type("string", value))
    }

    fn invalid_type(&self, expected: &str, value: &Value) -> ParameterError {
        ParameterError::InvalidType {
            key: self.key().to_owned(),
            expected_type: expected.to_owned(),
            actual_details: describe_value(value),
        }
    }

    fn invalid_value(&self, reason: String) -> ParameterError {
        ParameterError::InvalidValue {
            key: self.key().to_owned(),
            reason,
        }
    }
}

impl From<TextParameter> for ParameterDef {
    fn from(p: TextParameter) -> Self {
        Self::Text(p)
    }
}

impl From<SecretParameter> for ParameterDef {
    fn from(p: SecretParameter) -> Self {
        Self::Secret(p)
    }
}

impl From<NumberParameter> for ParameterDef {
    fn from(p: NumberParameter) -> Self {
        Self::Number(p)
    }
}

impl From<SelectParameter> for ParameterDef {
    fn from(p: SelectParameter) -> Self {
        Self::Select(p)
    }
}

impl From<JsonParameter> for ParameterDef {
    fn from(p: JsonParameter) -> Self {
        Self::Json(p)
    }
}
