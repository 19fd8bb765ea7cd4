/// Error type for parameter operations.
///
/// Covers lookups, type mismatches, and constraint violations found while
/// checking a value against its definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// Parameter with the given key was not found.
    #[error("parameter not found: `{key}`")]
    NotFound { key: String },

    /// Value type does not match the expected parameter type.
    #[error("invalid type for `{key}`: expected {expected_type}, got {actual_details}")]
    InvalidType {
        key: String,
        expected_type: String,
        actual_details: String,
    },

    /// Value is present but invalid for the parameter's constraints.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },

    /// A required parameter has no value.
    #[error("missing value for required parameter `{key}`")]
    MissingValue { key: String },
}

impl ParameterError {
    /// The key of the parameter this error is about.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::NotFound { key }
            | Self::InvalidType { key, .. }
            | Self::InvalidValue { key, .. }
            | Self::MissingValue { key } => key,
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::NotFound { .. } => "PARAM_NOT_FOUND",
            Self::InvalidType { .. } => "PARAM_INVALID_TYPE",
            Self::InvalidValue { .. } => "PARAM_INVALID_VALUE",
            Self::MissingValue { .. } => "PARAM_MISSING_VALUE",
        }
    }
}

/// Short description of a JSON value for error messages.
///
/// Never includes string contents, which may be secrets.
pub(crate) fn describe_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_owned(),
        serde_json::Value::Bool(_) => "boolean".to_owned(),
        serde_json::Value::Number(n) => format!("number {n}"),
        serde_json::Value::String(s) => format!("string of length {}", s.chars().count()),
        serde_json::Value::Array(a) => format!("array of {} elements", a.len()),
        serde_json::Value::Object(_) => "object".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_messages() {
        let err = ParameterError::NotFound {
            key: "payload".into(),
        };
        assert_eq!(err.to_string(), "parameter not found: `payload`");

        let err = ParameterError::InvalidType {
            key: "timeoutMs".into(),
            expected_type: "number".into(),
            actual_details: "boolean".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid type for `timeoutMs`: expected number, got boolean"
        );

        let err = ParameterError::MissingValue {
            key: "token".into(),
        };
        assert_eq!(
            err.to_string(),
            "missing value for required parameter `token`"
        );
    }

    #[test]
    fn key_and_code() {
        let err = ParameterError::InvalidValue {
            key: "timeoutMs".into(),
            reason: "must be at least 1000".into(),
        };
        assert_eq!(err.key(), "timeoutMs");
        assert_eq!(err.code(), "PARAM_INVALID_VALUE");
    }

    #[test]
    fn describe_value_hides_string_contents() {
        let described = describe_value(&json!("super-secret"));
        assert_eq!(described, "string of length 12");
        assert!(!described.contains("secret"));
        assert_eq!(describe_value(&json!([1, 2])), "array of 2 elements");
    }
}
