//! Host port traits for parameters and credentials.
//!
//! These traits decouple actions from the host's expression engine and
//! credential store so actions can be tested and executed in different
//! environments without modification. The in-memory adapters here are what
//! tests and the demo host use.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use whin_credential::{CredentialError, ResolvedCredential};
use whin_parameter::values::ParameterValues;

use crate::error::ActionError;

/// Port trait for reading node parameters.
///
/// Values are returned after the host has evaluated expressions for the
/// given item, so they may differ between items.
pub trait ParameterAccessor: Send + Sync {
    /// Value of parameter `key` for input item `item_index`.
    ///
    /// `Ok(None)` means the parameter is unset and has no default.
    fn parameter(&self, key: &str, item_index: usize) -> Result<Option<Value>, ActionError>;
}

/// Port trait for providing credentials to actions.
///
/// Implemented by the host to inject credential resolution into actions
/// without coupling them to the credential storage backend.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Resolve the credential of the given type for the current node.
    async fn credential(&self, type_key: &str) -> Result<ResolvedCredential, ActionError>;
}

/// Parameter values held in memory: node-level values plus per-item overrides.
#[derive(Debug, Clone, Default)]
pub struct InMemoryParameters {
    node: ParameterValues,
    items: Vec<ParameterValues>,
}

impl InMemoryParameters {
    /// Same values for every item.
    pub fn new(node: ParameterValues) -> Self {
        Self {
            node,
            items: Vec::new(),
        }
    }

    /// Override values for one item. Items without overrides see the node values.
    #[must_use]
    pub fn with_item(mut self, index: usize, values: ParameterValues) -> Self {
        if self.items.len() <= index {
            self.items.resize_with(index + 1, ParameterValues::default);
        }
        self.items[index] = values;
        self
    }
}

impl ParameterAccessor for InMemoryParameters {
    fn parameter(&self, key: &str, item_index: usize) -> Result<Option<Value>, ActionError> {
        let per_item = self.items.get(item_index).and_then(|v| v.get(key));
        Ok(per_item.or_else(|| self.node.get(key)).cloned())
    }
}

/// Credentials held in memory, keyed by type.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    credentials: HashMap<String, ResolvedCredential>,
}

impl InMemoryCredentials {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential, keyed by its type.
    #[must_use]
    pub fn with(mut self, credential: ResolvedCredential) -> Self {
        self.credentials
            .insert(credential.type_key().to_owned(), credential);
        self
    }
}

#[async_trait]
impl CredentialProvider for InMemoryCredentials {
    async fn credential(&self, type_key: &str) -> Result<ResolvedCredential, ActionError> {
        self.credentials
            .get(type_key)
            .cloned()
            .ok_or_else(|| CredentialError::NotFound(type_key.to_owned()).into())
    }
}
