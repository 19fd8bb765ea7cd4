use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use whin_parameter::error::ParameterError;
use whin_parameter::values::ParameterValues;

use super::{CredentialDescription, CredentialError};
use crate::utils::SecretString;

/// A credential as handed to a node at execution time.
///
/// Read-only from the node's point of view. Fields the description marks as
/// sensitive are held as [`SecretString`]; the rest stay plain JSON.
#[derive(Clone, Default)]
pub struct ResolvedCredential {
    type_key: String,
    plain: ParameterValues,
    secrets: HashMap<String, SecretString>,
}

impl ResolvedCredential {
    /// Empty credential of the given type.
    pub fn new(type_key: impl Into<String>) -> Self {
        Self {
            type_key: type_key.into(),
            ..Self::default()
        }
    }

    /// Split host-provided values into plain and secret fields.
    ///
    /// Performs no required-field checks: whether a token is usable is
    /// decided at request time. Only sensitive fields holding something
    /// other than a string are rejected.
    pub fn from_values(
        description: &CredentialDescription,
        values: ParameterValues,
    ) -> Result<Self, CredentialError> {
        let mut resolved = Self::new(&description.key);
        for key in values.keys() {
            let Some(value) = values.get(key) else {
                continue;
            };
            if !description.is_sensitive(key) {
                resolved.plain.set(key, value.clone());
                continue;
            }
            match value {
                Value::String(s) => {
                    resolved.secrets.insert(key.to_owned(), SecretString::new(s.as_str()));
                }
                Value::Null => {}
                other => {
                    return Err(CredentialError::InvalidField {
                        credential: description.key.clone(),
                        source: ParameterError::InvalidType {
                            key: key.to_owned(),
                            expected_type: "string".into(),
                            actual_details: kind_of(other).into(),
                        },
                    });
                }
            }
        }
        Ok(resolved)
    }

    /// Builder-style plain field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.plain.set(key, value);
        self
    }

    /// Builder-style secret field.
    #[must_use]
    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<SecretString>) -> Self {
        self.secrets.insert(key.into(), value.into());
        self
    }

    /// The credential type key (e.g. `"whinApi"`).
    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    /// A secret field, if present.
    pub fn secret(&self, key: &str) -> Option<&SecretString> {
        self.secrets.get(key)
    }

    /// A plain string field, if present and a string.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.plain.get_string(key)
    }

    /// A plain field as raw JSON.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.plain.get(key)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut secret_keys: Vec<&str> = self.secrets.keys().map(String::as_str).collect();
        secret_keys.sort_unstable();
        f.debug_struct("ResolvedCredential")
            .field("type_key", &self.type_key)
            .field("plain", &self.plain)
            .field("secret_keys", &secret_keys)
            .finish()
    }
}
