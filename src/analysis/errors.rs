//! Error types for the request orchestrators.

use thiserror::Error;

use crate::inference::errors::InferenceError;

/// Failure of a summarize or sentiment request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The capability was not provisioned at startup.
    #[error("{0}")]
    Unavailable(&'static str),
    /// The capability raised during the call.
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Convenience result alias for orchestrator operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
