//! Plugin packaging.
//!
//! A **plugin** is the unit a host installs, for example "Whin". It bundles
//! [`PluginMetadata`] with the actions and credential descriptions it
//! registers into [`PluginComponents`].

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use whin_credential::CredentialDescription;

use crate::action::ItemAction;
use crate::registry::ActionRegistry;

/// Error type for plugin metadata.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginError {
    /// The key is empty or contains characters outside `[a-z0-9_.-]`.
    #[error("invalid plugin key: {0:?}")]
    InvalidKey(String),
}

/// Static metadata describing a plugin.
///
/// Built via the builder API:
///
/// ```
/// use whin_action::PluginMetadata;
///
/// let meta = PluginMetadata::builder("whin", "Whin")
///     .description("Send WhatsApp messages through Whin")
///     .group(vec!["output".into()])
///     .build()
///     .unwrap();
///
/// assert_eq!(meta.key(), "whin");
/// assert_eq!(meta.version(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetadata {
    key: String,
    name: String,
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    group: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    documentation_url: Option<String>,
}

fn default_version() -> u32 {
    1
}

impl PluginMetadata {
    /// Start building metadata with the minimum required fields.
    pub fn builder(key: impl Into<String>, name: impl Into<String>) -> PluginMetadataBuilder {
        PluginMetadataBuilder {
            key: key.into(),
            name: name.into(),
            version: 1,
            group: Vec::new(),
            description: String::new(),
            icon: None,
            documentation_url: None,
        }
    }

    /// The plugin key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human-readable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version number (1-based).
    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Group hierarchy for UI categorization.
    #[inline]
    pub fn group(&self) -> &[String] {
        &self.group
    }

    /// Short description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Optional icon identifier.
    #[inline]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Optional documentation URL.
    #[inline]
    pub fn documentation_url(&self) -> Option<&str> {
        self.documentation_url.as_deref()
    }
}

/// Builder for [`PluginMetadata`].
#[derive(Debug)]
pub struct PluginMetadataBuilder {
    key: String,
    name: String,
    version: u32,
    group: Vec<String>,
    description: String,
    icon: Option<String>,
    documentation_url: Option<String>,
}

impl PluginMetadataBuilder {
    /// Set the version number (defaults to 1).
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Set the group hierarchy.
    pub fn group(mut self, group: Vec<String>) -> Self {
        self.group = group;
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set an icon identifier.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set a documentation URL.
    pub fn documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Validate and build the metadata.
    pub fn build(self) -> Result<PluginMetadata, PluginError> {
        let valid = !self.key.is_empty()
            && self
                .key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "_.-".contains(c));
        if !valid {
            return Err(PluginError::InvalidKey(self.key));
        }

        Ok(PluginMetadata {
            key: self.key,
            name: self.name,
            version: self.version,
            group: self.group,
            description: self.description,
            icon: self.icon,
            documentation_url: self.documentation_url,
        })
    }
}

/// Components a plugin registers with the host.
#[derive(Debug, Default)]
pub struct PluginComponents {
    actions: ActionRegistry,
    credentials: Vec<CredentialDescription>,
}

impl PluginComponents {
    /// Empty component set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action.
    pub fn action(&mut self, action: Arc<dyn ItemAction>) -> &mut Self {
        self.actions.register(action);
        self
    }

    /// Register a credential description.
    pub fn credential(&mut self, description: CredentialDescription) -> &mut Self {
        self.credentials.push(description);
        self
    }

    /// Registered actions.
    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Registered credential descriptions.
    pub fn credentials(&self) -> &[CredentialDescription] {
        &self.credentials
    }

    /// Credential description by key.
    pub fn credential_by_key(&self, key: &str) -> Option<&CredentialDescription> {
        self.credentials.iter().find(|c| c.key == key)
    }
}

/// Base trait for all plugins.
///
/// This trait is **object-safe** so plugins can be stored as `Arc<dyn Plugin>`.
pub trait Plugin: Send + Sync + Debug + 'static {
    /// Returns the static metadata for this plugin.
    fn metadata(&self) -> &PluginMetadata;

    /// Register actions and credential descriptions into `components`.
    fn register(&self, components: &mut PluginComponents);

    /// The unique key identifying this plugin.
    fn key(&self) -> &str {
        self.metadata().key()
    }

    /// Human-readable display name.
    fn name(&self) -> &str {
        self.metadata().name()
    }

    /// Version number (1-based).
    fn version(&self) -> u32 {
        self.metadata().version()
    }

    /// Collect this plugin's components into a fresh set.
    fn components(&self) -> PluginComponents {
        let mut components = PluginComponents::new();
        self.register(&mut components);
        components
    }
}
