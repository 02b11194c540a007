//! Inference capabilities and their one-time provisioning.
//!
//! - `capabilities`: the narrow traits the orchestrators call, plus typed results.
//! - `hosted`: implementations backed by a remote inference endpoint.
//! - `provisioner`: primary/fallback acquisition at startup.
//! - `context`: the immutable handle shared with every request.

pub mod capabilities;
pub mod config;
pub mod context;
pub mod errors;
pub mod hosted;
pub mod provisioner;

#[cfg(test)]
#[allow(missing_docs)]
pub(crate) mod testing;

pub use capabilities::{
    ModelLoader, SentimentClassifier, SentimentLabel, SentimentPrediction, SummaryCandidate,
    SummaryParams, Summarizer,
};
pub use config::InferenceConfig;
pub use context::{InferenceContext, ModelAvailability};
pub use errors::{ConfigError, InferenceError, InferenceResult};
pub use hosted::HostedModelLoader;
pub use provisioner::provision;
