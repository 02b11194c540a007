//! Error types for the inference layer.

use thiserror::Error;

/// Errors raised while constructing or calling an inference capability.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// HTTP transport error talking to the inference endpoint.
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Inference endpoint answered with a non-success status.
    #[error("inference endpoint returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },
    /// Response body could not be decoded into the expected records.
    #[error("failed to decode inference response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Response decoded but did not have the expected arity.
    #[error("unexpected inference response shape: {0}")]
    UnexpectedShape(String),
    /// Capability returned no result at all.
    #[error("inference returned an empty result")]
    EmptyResult,
    /// Model could not be constructed.
    #[error("failed to load model {model}: {reason}")]
    Load {
        /// Model identifier.
        model: String,
        /// Human-readable reason.
        reason: String,
    },
}

/// Convenience result alias for inference operations.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value is out of range or otherwise invalid.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// URL parse error.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Convenience result alias for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;
