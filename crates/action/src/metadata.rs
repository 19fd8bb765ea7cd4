use serde::{Deserialize, Serialize};
use whin_parameter::collection::ParameterCollection;

use crate::port::{InputPort, OutputPort};

/// A credential type a node asks the host to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRequirement {
    /// Credential type key (e.g. `"whinApi"`).
    pub name: String,
    /// Whether the node refuses to run without it.
    pub required: bool,
}

impl CredentialRequirement {
    /// A credential the node cannot run without.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    /// A credential the node can run without.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

/// Static metadata describing a node type.
///
/// Used by the host for discovery, editor rendering and credential
/// resolution. Pure data; nothing here runs at execution time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMetadata {
    /// Unique key identifying this node type (e.g. `"whin"`).
    pub key: String,
    /// Human-readable display name.
    pub name: String,
    /// Short description of what this node does.
    pub description: String,
    /// Group for editor placement (e.g. `"output"`).
    pub group: String,
    /// Node version. Bumped only when parameters change incompatibly.
    pub version: u32,
    /// Icon reference understood by the host editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Subtitle template shown under the node name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Input connection points.
    pub inputs: Vec<InputPort>,
    /// Output connection points.
    pub outputs: Vec<OutputPort>,
    /// User-facing configuration parameters.
    pub parameters: ParameterCollection,
    /// Credential types this node requires, referenced by key.
    pub credentials: Vec<CredentialRequirement>,
}

impl ActionMetadata {
    /// Create metadata with the minimum required fields.
    ///
    /// Defaults to version 1 with a single main input and output.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            group: String::new(),
            version: 1,
            icon: None,
            subtitle: None,
            inputs: vec![InputPort::main()],
            outputs: vec![OutputPort::main()],
            parameters: ParameterCollection::new(),
            credentials: Vec::new(),
        }
    }

    /// Set the editor group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the node version.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Set the icon reference.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the subtitle template.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Replace the input ports.
    pub fn with_inputs(mut self, inputs: Vec<InputPort>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Replace the output ports.
    pub fn with_outputs(mut self, outputs: Vec<OutputPort>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Set user-facing configuration parameters.
    pub fn with_parameters(mut self, parameters: ParameterCollection) -> Self {
        self.parameters = parameters;
        self
    }

    /// Add a credential requirement.
    pub fn with_credential(mut self, requirement: CredentialRequirement) -> Self {
        self.credentials.push(requirement);
        self
    }

    /// Returns `true` if the node declares a required credential of this type.
    pub fn requires_credential(&self, name: &str) -> bool {
        self.credentials
            .iter()
            .any(|c| c.required && c.name == name)
    }
}
