use serde::{Deserialize, Serialize};
use whin_parameter::collection::ParameterCollection;

use super::CredentialError;

/// Describes a credential type (API token, OAuth2 client, ...).
///
/// This is the static schema that defines what fields a credential type
/// requires. Hosts use it to render the credential form, decide which
/// fields to mask, and match nodes to the credentials they declare.
///
/// ```
/// use whin_credential::CredentialDescription;
/// use whin_parameter::collection::ParameterCollection;
/// use whin_parameter::types::SecretParameter;
///
/// let description = CredentialDescription::builder()
///     .key("exampleApi")
///     .name("Example API")
///     .properties(ParameterCollection::new().with(SecretParameter::new("token", "Token")))
///     .build()
///     .unwrap();
///
/// assert_eq!(description.key, "exampleApi");
/// assert!(description.is_sensitive("token"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescription {
    /// Unique identifier for this credential type (e.g. `"whinApi"`).
    pub key: String,

    /// Human-readable name (e.g. `"Whin API"`).
    pub name: String,

    /// Description of what this credential is used for.
    #[serde(default)]
    pub description: String,

    /// Optional icon identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Optional documentation URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    /// The fields this credential type requires.
    pub properties: ParameterCollection,
}

impl CredentialDescription {
    /// Create a new credential description builder.
    pub fn builder() -> CredentialDescriptionBuilder {
        CredentialDescriptionBuilder::default()
    }

    /// Whether the field `key` must be masked and kept out of logs.
    #[must_use]
    pub fn is_sensitive(&self, key: &str) -> bool {
        self.properties
            .get_by_key(key)
            .is_some_and(whin_parameter::def::ParameterDef::is_sensitive)
    }
}

/// Builder for [`CredentialDescription`].
#[derive(Debug, Default)]
pub struct CredentialDescriptionBuilder {
    key: Option<String>,
    name: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    documentation_url: Option<String>,
    properties: Option<ParameterCollection>,
}

impl CredentialDescriptionBuilder {
    /// Set the unique identifier for this credential type.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the human-readable name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the icon identifier.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the documentation URL.
    pub fn documentation_url(mut self, documentation_url: impl Into<String>) -> Self {
        self.documentation_url = Some(documentation_url.into());
        self
    }

    /// Set the field schema.
    pub fn properties(mut self, properties: ParameterCollection) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Build the [`CredentialDescription`].
    ///
    /// Fails if `key`, `name` or `properties` were not set.
    pub fn build(self) -> Result<CredentialDescription, CredentialError> {
        Ok(CredentialDescription {
            key: self.key.ok_or(CredentialError::IncompleteDescription("key"))?,
            name: self
                .name
                .ok_or(CredentialError::IncompleteDescription("name"))?,
            description: self.description.unwrap_or_default(),
            icon: self.icon,
            documentation_url: self.documentation_url,
            properties: self
                .properties
                .ok_or(CredentialError::IncompleteDescription("properties"))?,
        })
    }
}
