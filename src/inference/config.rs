//! Configuration for the hosted inference capabilities.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::inference::errors::{ConfigError, ConfigResult};

/// Default inference endpoint.
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";

/// Environment variable overriding the inference endpoint.
pub const INFERENCE_URL_ENV: &str = "AI_SERVICE_INFERENCE_URL";
/// Environment variable holding the bearer token.
pub const API_TOKEN_ENV: &str = "AI_SERVICE_API_TOKEN";
/// Fallback token variable shared with other Hugging Face tooling.
pub const HF_TOKEN_ENV: &str = "HF_TOKEN";
/// Environment variable for the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "AI_SERVICE_TIMEOUT_SECS";
/// Environment variable toggling the startup warm-up call.
pub const WARMUP_ENV: &str = "AI_SERVICE_WARMUP";

/// Settings for reaching the inference endpoint.
#[derive(Clone)]
pub struct InferenceConfig {
    /// Base URL of the inference endpoint.
    pub base_url: String,
    /// Optional bearer token.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Issue one warm-up inference call when a capability is provisioned.
    pub warmup: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_INFERENCE_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            warmup: true,
        }
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("warmup", &self.warmup)
            .finish()
    }
}

impl InferenceConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Enable or disable the warm-up call.
    #[must_use]
    pub const fn with_warmup(mut self, warmup: bool) -> Self {
        self.warmup = warmup;
        self
    }

    /// Build a config from the process environment.
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns an error if a value is unparseable or the result fails validation.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(INFERENCE_URL_ENV) {
            config.base_url = url.trim_end_matches('/').to_string();
        }

        config.api_token = lookup(API_TOKEN_ENV)
            .or_else(|| lookup(HF_TOKEN_ENV))
            .filter(|token| !token.trim().is_empty());

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{TIMEOUT_ENV} must be a number of seconds, got {raw:?}"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(WARMUP_ENV) {
            config.warmup = parse_bool(&raw).ok_or_else(|| {
                ConfigError::Invalid(format!("{WARMUP_ENV} must be a boolean, got {raw:?}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> ConfigResult<()> {
        Url::parse(&self.base_url)?;

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "request_timeout must be > 0".to_string(),
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "connect_timeout must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
