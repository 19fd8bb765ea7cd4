use whin_credential::{ResolvedCredential, SecretString};

use crate::credentials::TOKEN;
use crate::error::SendError;

/// Effective token for one item.
///
/// A non-blank override wins; otherwise the credential token is used. Both
/// are trimmed. Blank on both sides is [`SendError::MissingToken`].
pub fn resolve_token(
    token_override: Option<&SecretString>,
    credential: &ResolvedCredential,
) -> Result<SecretString, SendError> {
    if let Some(token) = token_override
        && !token.is_blank()
    {
        return Ok(token.expose_secret(|t| SecretString::new(t.trim())));
    }

    let stored = credential
        .secret(TOKEN)
        .cloned()
        .or_else(|| credential.string(TOKEN).map(SecretString::from));
    match stored {
        Some(token) if !token.is_blank() => Ok(token.expose_secret(|t| SecretString::new(t.trim()))),
        _ => Err(SendError::MissingToken),
    }
}
