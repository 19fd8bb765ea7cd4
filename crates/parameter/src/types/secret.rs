use serde::{Deserialize, Serialize};

use crate::metadata::ParameterMetadata;

/// A masked text input for sensitive values like passwords and API tokens.
///
/// Always sets `metadata.sensitive = true`. Secrets carry no default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretParameter {
    #[serde(flatten)]
    pub metadata: ParameterMetadata,
}

impl SecretParameter {
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        let mut metadata = ParameterMetadata::new(key, name);
        metadata.sensitive = true;
        Self { metadata }
    }
}
