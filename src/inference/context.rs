//! Process-wide inference context, built once at startup and read-only afterwards.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::inference::capabilities::{SentimentClassifier, Summarizer};

/// Which capabilities are usable for the lifetime of the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ModelAvailability {
    /// A summarization capability (primary or fallback) was provisioned.
    pub summarizer_ready: bool,
    /// The sentiment capability was provisioned.
    pub sentiment_ready: bool,
    /// Only the fallback summarizer could be provisioned.
    pub using_fallback_summarizer: bool,
}

/// Capabilities acquired at startup plus their availability flags.
///
/// The flags are derived from which capabilities are present, so they
/// can never disagree with them.
#[derive(Clone, Default)]
pub struct InferenceContext {
    summarizer: Option<Arc<dyn Summarizer>>,
    sentiment: Option<Arc<dyn SentimentClassifier>>,
    using_fallback_summarizer: bool,
}

impl InferenceContext {
    /// Assemble a context from already-constructed capabilities.
    #[must_use]
    pub fn new(
        summarizer: Option<Arc<dyn Summarizer>>,
        sentiment: Option<Arc<dyn SentimentClassifier>>,
        using_fallback_summarizer: bool,
    ) -> Self {
        let using_fallback_summarizer = using_fallback_summarizer && summarizer.is_some();
        Self {
            summarizer,
            sentiment,
            using_fallback_summarizer,
        }
    }

    /// Context with nothing available.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Current availability flags.
    #[must_use]
    pub fn availability(&self) -> ModelAvailability {
        ModelAvailability {
            summarizer_ready: self.summarizer.is_some(),
            sentiment_ready: self.sentiment.is_some(),
            using_fallback_summarizer: self.using_fallback_summarizer,
        }
    }

    /// Summarization capability, if provisioned.
    #[must_use]
    pub fn summarizer(&self) -> Option<&dyn Summarizer> {
        self.summarizer.as_deref()
    }

    /// Sentiment capability, if provisioned.
    #[must_use]
    pub fn sentiment(&self) -> Option<&dyn SentimentClassifier> {
        self.sentiment.as_deref()
    }
}

impl fmt::Debug for InferenceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceContext")
            .field("summarizer", &self.summarizer.as_ref().map(|s| s.model_id()))
            .field("sentiment", &self.sentiment.as_ref().map(|s| s.model_id()))
            .field("using_fallback_summarizer", &self.using_fallback_summarizer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_context() {
        let ctx = InferenceContext::unavailable();
        assert_eq!(ctx.availability(), ModelAvailability::default());
        assert!(ctx.summarizer().is_none());
        assert!(ctx.sentiment().is_none());
    }

    #[test]
    fn test_fallback_flag_requires_summarizer() {
        let ctx = InferenceContext::new(None, None, true);
        assert!(!ctx.availability().using_fallback_summarizer);
    }
}
