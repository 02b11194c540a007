//! Startup helpers for the AI service.
//!
//! Order matters: logging, configuration, model provisioning, then serving.
//! Provisioning always completes before the listener accepts traffic.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use crate::config::ServiceConfig;
use crate::inference::{HostedModelLoader, InferenceConfig};
use crate::server::{self, AppState};

/// Run the service until shutdown (used by the `ai-service` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting AI service v{}", env!("CARGO_PKG_VERSION"));

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let (state, port) = match rt.block_on(initialize()) {
        Ok(initialized) => initialized,
        Err(e) => {
            tracing::error!("Failed to initialize: {e:#}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::run_server(state, port)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Load configuration and provision models without starting the server.
///
/// Returns the shared state together with the port to listen on.
///
/// # Errors
/// Returns an error if the configuration is invalid or the HTTP client cannot be built.
/// Model loading failures are not errors; they leave the feature unavailable.
pub async fn initialize() -> anyhow::Result<(Arc<AppState>, u16)> {
    let config = ServiceConfig::from_env().context("invalid service configuration")?;
    let state = provision_state(config.inference).await?;
    Ok((state, config.port))
}

async fn provision_state(config: InferenceConfig) -> anyhow::Result<Arc<AppState>> {
    tracing::info!(
        endpoint = %config.base_url,
        warmup = config.warmup,
        authenticated = config.api_token.is_some(),
        "Inference endpoint configured"
    );

    let loader = HostedModelLoader::new(config).context("failed to build inference client")?;
    Ok(AppState::provision(&loader).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_still_starts() {
        let config = InferenceConfig::new()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(std::time::Duration::from_secs(2));

        let state = provision_state(config).await.unwrap();
        let availability = state.inference.availability();
        assert!(!availability.summarizer_ready);
        assert!(!availability.sentiment_ready);
    }
}
