//! Client configuration.
//!
//! Values come from defaults, then either environment variables (native
//! hosts, build-time for the wasm bundle) or a JSON document injected by the
//! host page.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hirelens_auth::RedirectPolicy;

pub const ENV_API_URL: &str = "HIRELENS_API_URL";
pub const ENV_DENIED_REDIRECT: &str = "HIRELENS_DENIED_REDIRECT";
pub const ENV_PROBE_TIMEOUT_MS: &str = "HIRELENS_PROBE_TIMEOUT_MS";

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("malformed config document: {0}")]
    Malformed(String),
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the AI engine; the health probe targets its root.
    pub api_base_url: String,
    /// Where denied guarded routes redirect to.
    pub redirect_policy: RedirectPolicy,
    /// Optional bound on the health probe. `None` lets the transport decide.
    pub probe_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            redirect_policy: RedirectPolicy::default(),
            probe_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (process env, `option_env!`, tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.api_base_url = url;
        }

        if let Some(policy) = lookup(ENV_DENIED_REDIRECT) {
            config.redirect_policy = policy
                .parse()
                .map_err(|e| ConfigError::invalid(ENV_DENIED_REDIRECT, format!("{e}")))?;
        }

        if let Some(ms) = lookup(ENV_PROBE_TIMEOUT_MS) {
            let ms = ms.trim().parse::<u64>().map_err(|e| {
                ConfigError::invalid(ENV_PROBE_TIMEOUT_MS, format!("not a number: {e}"))
            })?;
            config.probe_timeout_ms = Some(ms);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(document).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::invalid("api_base_url", "must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "api_base_url",
                format!("must start with http:// or https://, got '{url}'"),
            ));
        }
        if self.probe_timeout_ms == Some(0) {
            return Err(ConfigError::invalid("probe_timeout_ms", "must be greater than zero"));
        }
        Ok(())
    }

    /// `GET` target of the health probe: the base URL's root.
    pub fn health_endpoint(&self) -> String {
        format!("{}/", self.api_base_url.trim().trim_end_matches('/'))
    }

    pub fn probe_timeout(&self) -> Option<Duration> {
        self.probe_timeout_ms.map(Duration::from_millis)
    }
}
