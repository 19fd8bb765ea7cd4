use whin_parameter::error::ParameterError;

/// Errors raised while describing or resolving credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// A description was built without a mandatory field.
    #[error("credential description is missing `{0}`")]
    IncompleteDescription(&'static str),

    /// A resolved field does not fit its declared parameter.
    #[error("credential `{credential}` field is invalid: {source}")]
    InvalidField {
        credential: String,
        #[source]
        source: ParameterError,
    },

    /// The host has no credential of the requested type.
    #[error("credential `{0}` is not available")]
    NotFound(String),
}
