use whin_credential::CredentialError;

/// Batch-level failure reported to the host.
///
/// Item-level failures tolerated under continue-on-fail never become an
/// `ActionError`; they are emitted as output records instead. The host owns
/// retry policy, so actions only classify.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ActionError {
    /// Transient failure; the host may retry based on its policy.
    #[error("retryable: {error}")]
    Retryable {
        /// Human-readable error message.
        error: String,
        /// Optional structured details about the failure.
        details: Option<serde_json::Value>,
    },

    /// Permanent failure — never retry.
    ///
    /// Invalid credentials, schema mismatch, business logic rejection.
    #[error("fatal: {error}")]
    Fatal {
        /// Human-readable error message.
        error: String,
        /// Optional structured details about the failure.
        details: Option<serde_json::Value>,
    },

    /// Input or parameter validation failed before any side effect.
    #[error("validation: {0}")]
    Validation(String),

    /// Execution cancelled via cancellation token.
    #[error("cancelled")]
    Cancelled,
}

impl ActionError {
    /// Create a retryable error.
    pub fn retryable(msg: impl Into<String>) -> Self {
        Self::Retryable {
            error: msg.into(),
            details: None,
        }
    }

    /// Create a retryable error carrying structured details.
    pub fn retryable_with_details(msg: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Retryable {
            error: msg.into(),
            details: Some(details),
        }
    }

    /// Create a fatal (non-retryable) error.
    pub fn fatal(msg: impl Into<String>) -> Self {
        Self::Fatal {
            error: msg.into(),
            details: None,
        }
    }

    /// Create a fatal error with structured details.
    pub fn fatal_with_details(msg: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Fatal {
            error: msg.into(),
            details: Some(details),
        }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns `true` if the host should consider retrying this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable { .. })
    }

    /// Returns `true` if this error is permanent and should never be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. } | Self::Validation(_))
    }

    /// Structured details attached to the error, if any.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Retryable { details, .. } | Self::Fatal { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

impl From<CredentialError> for ActionError {
    fn from(err: CredentialError) -> Self {
        Self::fatal(err.to_string())
    }
}
