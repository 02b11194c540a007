//! Capability interfaces and the typed records they exchange.
//!
//! The orchestrators only ever see these traits. Real models sit behind
//! [`crate::inference::hosted`]; tests plug in stubs.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::inference::errors::InferenceResult;

/// Generation bounds passed to a summarization capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SummaryParams {
    /// Maximum output length, in model units.
    pub max_length: u32,
    /// Minimum output length, in model units.
    pub min_length: u32,
    /// Sample during decoding. `false` means deterministic decoding.
    pub do_sample: bool,
    /// Let the capability truncate over-long input.
    pub truncation: bool,
}

/// One summary produced by a summarization capability.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SummaryCandidate {
    /// Generated summary text.
    pub summary_text: String,
}

/// Label assigned by a sentiment capability.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    /// `POSITIVE`.
    Positive,
    /// `NEGATIVE`.
    Negative,
    /// Anything else the capability emitted.
    Other(String),
}

impl SentimentLabel {
    /// Parse a raw label as emitted by the model.
    ///
    /// Only the exact uppercase labels map to the binary buckets; any other
    /// spelling is kept verbatim as [`SentimentLabel::Other`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "POSITIVE" => Self::Positive,
            "NEGATIVE" => Self::Negative,
            other => Self::Other(other.to_string()),
        }
    }

    /// Stable string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-item sentiment prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct SentimentPrediction {
    /// Predicted label.
    pub label: SentimentLabel,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

/// Abstractive summarization capability.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Identifier of the underlying model.
    fn model_id(&self) -> &str;

    /// Summarize `text` within the given bounds.
    ///
    /// # Errors
    /// Returns an error if inference fails.
    async fn summarize(
        &self,
        text: &str,
        params: &SummaryParams,
    ) -> InferenceResult<Vec<SummaryCandidate>>;
}

/// Binary sentiment classification capability.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Identifier of the underlying model.
    fn model_id(&self) -> &str;

    /// Classify every text in one batched call. One prediction per input, in order.
    ///
    /// # Errors
    /// Returns an error if inference fails.
    async fn classify_sentiment(&self, texts: &[String]) -> InferenceResult<Vec<SentimentPrediction>>;
}

/// Constructs capabilities by model identifier.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Build a summarization capability.
    ///
    /// # Errors
    /// Returns an error if the model cannot be acquired.
    async fn load_summarizer(&self, model_id: &str) -> InferenceResult<Arc<dyn Summarizer>>;

    /// Build a sentiment capability.
    ///
    /// # Errors
    /// Returns an error if the model cannot be acquired.
    async fn load_sentiment_classifier(
        &self,
        model_id: &str,
    ) -> InferenceResult<Arc<dyn SentimentClassifier>>;
}
