use serde::{Deserialize, Serialize};

use crate::def::ParameterDef;
use crate::error::ParameterError;
use crate::values::ParameterValues;

/// An ordered collection of parameter definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterCollection {
    parameters: Vec<ParameterDef>,
}

impl ParameterCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter definition to the collection.
    pub fn add(&mut self, param: impl Into<ParameterDef>) -> &mut Self {
        self.parameters.push(param.into());
        self
    }

    /// Add a parameter definition (builder-style, consuming).
    #[must_use]
    pub fn with(mut self, param: impl Into<ParameterDef>) -> Self {
        self.parameters.push(param.into());
        self
    }

    /// Get a parameter by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ParameterDef> {
        self.parameters.get(index)
    }

    /// Get a parameter by its key.
    #[must_use]
    pub fn get_by_key(&self, key: &str) -> Option<&ParameterDef> {
        self.parameters.iter().find(|p| p.key() == key)
    }

    /// Check whether a parameter with the given key exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.parameters.iter().any(|p| p.key() == key)
    }

    /// Iterate over all parameter keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(ParameterDef::key)
    }

    /// The number of parameters in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterate over all parameter definitions.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterDef> {
        self.parameters.iter()
    }

    /// Values a fresh node starts with: every declared default.
    #[must_use]
    pub fn defaults(&self) -> ParameterValues {
        self.parameters
            .iter()
            .filter_map(|p| p.default_value().map(|v| (p.key().to_owned(), v)))
            .collect()
    }

    /// Validate one value against the definition registered under `key`.
    pub fn validate_value(
        &self,
        key: &str,
        value: Option<&serde_json::Value>,
    ) -> Result<(), ParameterError> {
        self.get_by_key(key)
            .ok_or_else(|| ParameterError::NotFound {
                key: key.to_owned(),
            })?
            .validate(value)
    }

    /// Validate a whole value set. Stops at the first failing parameter.
    pub fn validate(&self, values: &ParameterValues) -> Result<(), ParameterError> {
        self.parameters
            .iter()
            .try_for_each(|p| p.validate(values.get(p.key())))
    }
}

impl IntoIterator for ParameterCollection {
    type Item = ParameterDef;
    type IntoIter = std::vec::IntoIter<ParameterDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParameterCollection {
    type Item = &'a ParameterDef;
    type IntoIter = std::slice::Iter<'a, ParameterDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

impl FromIterator<ParameterDef> for ParameterCollection {
    fn from_iter<I: IntoIterator<Item = ParameterDef>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().collect(),
        }
    }
}
