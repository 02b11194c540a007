//! Process-level configuration: listening port plus the inference endpoint settings.

use crate::inference::config::InferenceConfig;
use crate::inference::errors::{ConfigError, ConfigResult};
use crate::server::DEFAULT_PORT;

/// Environment variable for the listening port.
pub const PORT_ENV: &str = "AI_SERVICE_PORT";

/// Everything the service reads from its environment at startup.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// TCP port the HTTP server binds on all interfaces.
    pub port: u16,
    /// Inference endpoint settings.
    pub inference: InferenceConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            inference: InferenceConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Build a config from the process environment.
    ///
    /// # Errors
    /// Returns an error if any variable is set to an invalid value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns an error if the port is unparseable or zero, or the inference settings are invalid.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_ENV) {
            None => DEFAULT_PORT,
            Some(raw) => parse_port(&raw)?,
        };
        let inference = InferenceConfig::from_lookup(&lookup)?;
        Ok(Self { port, inference })
    }
}

fn parse_port(raw: &str) -> ConfigResult<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::Invalid(format!(
            "{PORT_ENV} must be a port between 1 and 65535, got {raw:?}"
        ))),
    }
}
