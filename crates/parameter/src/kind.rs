use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a parameter, determining its UI widget and value semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Text,
    Secret,
    Number,
    Select,
    Json,
}

impl ParameterKind {
    /// Stable lowercase name, matching the serde tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Secret => "secret",
            Self::Number => "number",
            Self::Select => "select",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_serde_tag() {
        for kind in [
            ParameterKind::Text,
            ParameterKind::Secret,
            ParameterKind::Number,
            ParameterKind::Select,
            ParameterKind::Json,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
