//! Outbound request shaping.

use std::time::Duration;

use url::Url;
use whin_action::HttpRequest;
use whin_credential::{ResolvedCredential, SecretString};

use crate::config::NodeConfig;
use crate::credentials::BASE_URL;
use crate::error::SendError;
use crate::payload::ContentPayload;

/// Parse an absolute http(s) URL, describing what is wrong otherwise.
pub fn parse_endpoint(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme `{other}`")),
    }
}

/// The credential `baseUrl` when set, else the configured default.
pub fn resolve_endpoint(
    credential: &ResolvedCredential,
    config: &NodeConfig,
) -> Result<Url, SendError> {
    let endpoint = credential
        .string(BASE_URL)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(config.default_endpoint.as_str());
    parse_endpoint(endpoint).map_err(|reason| SendError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        reason,
    })
}

/// Build the POST for one item.
///
/// The same token goes into the bearer header and the body.
pub fn build_request(
    endpoint: Url,
    token: &SecretString,
    content: ContentPayload,
    timeout: Duration,
    user_agent: Option<&str>,
) -> HttpRequest {
    let mut request = HttpRequest::post(endpoint)
        .with_header("Content-Type", "application/json")
        .with_header(
            "Authorization",
            token.expose_secret(|t| format!("Bearer {t}")),
        )
        .with_json(content.into_body(token))
        .with_timeout(timeout);
    if let Some(agent) = user_agent {
        request = request.with_header("User-Agent", agent);
    }
    request
}
