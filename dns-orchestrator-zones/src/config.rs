//! Client configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::log_sanitizer::mask_secret;

/// Cloudflare API v4 base URL.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Retries for transient failures (network, timeout, 429, 502-504).
const DEFAULT_MAX_RETRIES: u32 = 2;

pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
pub const ENV_API_BASE: &str = "CLOUDFLARE_API_BASE";
pub const ENV_MAX_RETRIES: &str = "CLOUDFLARE_MAX_RETRIES";
pub const ENV_REQUEST_TIMEOUT: &str = "CLOUDFLARE_REQUEST_TIMEOUT_SECS";

/// Errors raised while building a [`ZonesClient`](crate::ZonesClient).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API token is missing or empty")]
    MissingToken,

    #[error("Invalid API base URL '{0}'")]
    InvalidApiBase(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// Settings for the Cloudflare-backed client.
///
/// ```rust
/// use dns_orchestrator_zones::ZonesConfig;
///
/// let config = ZonesConfig::new("your-token").with_max_retries(0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonesConfig {
    /// Bearer token with `Zone:Edit` permission.
    pub api_token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Retries for transient failures. Zone creation is never retried.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl ZonesConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_base: default_api_base(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the API base (mainly for tests against a mock server).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, connect_secs: u64, request_secs: u64) -> Self {
        self.connect_timeout_secs = connect_secs;
        self.request_timeout_secs = request_secs;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Read the configuration from `CLOUDFLARE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_API_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let mut config = Self::new(token);

        if let Some(base) = lookup(ENV_API_BASE).filter(|b| !b.trim().is_empty()) {
            config.api_base = base;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = parse_number(ENV_MAX_RETRIES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            config.request_timeout_secs = parse_number(ENV_REQUEST_TIMEOUT, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let url = reqwest::Url::parse(&self.api_base)
            .map_err(|_| ConfigError::InvalidApiBase(self.api_base.clone()))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiBase(self.api_base.clone()));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "connect_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// API base without a trailing slash, ready for `format!("{base}{path}")`.
    pub(crate) fn base_url(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

impl std::fmt::Debug for ZonesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZonesConfig")
            .field("api_token", &mask_secret(&self.api_token))
            .field("api_base", &self.api_base)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ZonesConfig::new("token");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_retries, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let config = ZonesConfig::from_lookup(lookup(&[
            (ENV_API_TOKEN, "secret-token"),
            (ENV_API_BASE, "http://127.0.0.1:8080/"),
            (ENV_MAX_RETRIES, "0"),
            (ENV_REQUEST_TIMEOUT, " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.api_token, "secret-token");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn from_lookup_requires_token() {
        assert_eq!(
            ZonesConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingToken)
        );
        assert_eq!(
            ZonesConfig::from_lookup(lookup(&[(ENV_API_TOKEN, "  ")])),
            Err(ConfigError::MissingToken)
        );
    }

    #[test]
    fn from_lookup_rejects_bad_numbers() {
        let err = ZonesConfig::from_lookup(lookup(&[
            (ENV_API_TOKEN, "t"),
            (ENV_MAX_RETRIES, "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == ENV_MAX_RETRIES));
    }

    #[test]
    fn validate_rejects_bad_base() {
        for base in ["not a url", "ftp://example.com", "mailto:ops@example.com"] {
            let config = ZonesConfig::new("t").with_api_base(base);
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidApiBase(_))),
                "{base}"
            );
        }
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = ZonesConfig::new("t").with_timeouts(1, 0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_connect_timeout() {
        let config = ZonesConfig::new("t").with_timeouts(0, 30);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "connect_timeout_secs"
        ));
    }

    #[test]
    fn debug_masks_token() {
        let rendered = format!("{:?}", ZonesConfig::new("abcdefghijklmnop"));
        assert!(rendered.contains("abcd****"));
        assert!(!rendered.contains("abcdefghijklmnop"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ZonesConfig = serde_json::from_str(r#"{"apiToken":"t"}"#).unwrap();
        assert_eq!(config, ZonesConfig::new("t"));
    }
}
