use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::credentials::WHIN_ENDPOINT;
use crate::request::parse_endpoint;

/// Node-wide settings, fixed when the node is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Endpoint used when the credential has no `baseUrl`.
    pub default_endpoint: String,
    /// `User-Agent` header sent with every request; `None` sends none.
    pub user_agent: Option<String>,
    /// Timeout applied when the item sets none.
    pub default_timeout_ms: u64,
    /// Smallest timeout an item may request.
    pub min_timeout_ms: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            default_endpoint: WHIN_ENDPOINT.to_owned(),
            user_agent: Some(concat!("whin-node/", env!("CARGO_PKG_VERSION")).to_owned()),
            default_timeout_ms: 10_000,
            min_timeout_ms: 1_000,
        }
    }
}

impl NodeConfig {
    /// Check the endpoint and timeout bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_endpoint(&self.default_endpoint).map_err(|reason| ConfigError::InvalidEndpoint {
            endpoint: self.default_endpoint.clone(),
            reason,
        })?;
        if self.min_timeout_ms == 0 {
            return Err(ConfigError::ZeroMinimumTimeout);
        }
        if self.default_timeout_ms < self.min_timeout_ms {
            return Err(ConfigError::TimeoutBelowMinimum {
                default_ms: self.default_timeout_ms,
                min_ms: self.min_timeout_ms,
            });
        }
        Ok(())
    }

    /// [`default_timeout_ms`](Self::default_timeout_ms) as a duration.
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}

/// Invalid [`NodeConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `default_endpoint` is not an absolute http(s) URL.
    #[error("invalid default endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// `min_timeout_ms` is zero.
    #[error("minimum timeout must be positive")]
    ZeroMinimumTimeout,

    /// `default_timeout_ms` is below `min_timeout_ms`.
    #[error("default timeout {default_ms}ms is below the minimum of {min_ms}ms")]
    TimeoutBelowMinimum { default_ms: u64, min_ms: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let config = NodeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_endpoint, WHIN_ENDPOINT);
        assert_eq!(config.default_timeout(), Duration::from_secs(10));
        assert!(config.user_agent.as_deref().unwrap().starts_with("whin-node/"));
    }

    #[test]
    fn deserializes_partial_config() {
        let config: NodeConfig =
            serde_json::from_str(r#"{"default_timeout_ms": 5000, "user_agent": null}"#).unwrap();
        assert_eq!(config.default_timeout_ms, 5000);
        assert_eq!(config.min_timeout_ms, 1000);
        assert_eq!(config.user_agent, None);
        assert_eq!(config.default_endpoint, WHIN_ENDPOINT);
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let config = NodeConfig {
            default_endpoint: "ftp://whin.example/send".into(),
            ..NodeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn rejects_default_below_minimum() {
        let config = NodeConfig {
            default_timeout_ms: 500,
            ..NodeConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TimeoutBelowMinimum {
                default_ms: 500,
                min_ms: 1000
            })
        );
    }
}
