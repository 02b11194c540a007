//! One-shot model provisioning with primary/fallback summarizer selection.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::inference::capabilities::{ModelLoader, SentimentClassifier, Summarizer};
use crate::inference::context::InferenceContext;

/// Higher-quality summarization model, tried first.
pub const PRIMARY_SUMMARIZER_MODEL: &str = "sshleifer/distilbart-cnn-12-6";
/// Lighter summarization model used when the primary cannot be acquired.
pub const FALLBACK_SUMMARIZER_MODEL: &str = "sshleifer/distilbart-cnn-6-6";
/// Binary sentiment model.
pub const SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Acquire all capabilities. Never fails: anything that cannot be loaded is
/// logged and left unavailable for the lifetime of the returned context.
pub async fn provision(loader: &dyn ModelLoader) -> InferenceContext {
    let (summarizer, using_fallback) = provision_summarizer(loader).await;
    let sentiment = provision_sentiment(loader).await;

    let ctx = InferenceContext::new(summarizer, sentiment, using_fallback);
    let availability = ctx.availability();
    info!(
        summarizer_ready = availability.summarizer_ready,
        sentiment_ready = availability.sentiment_ready,
        using_fallback_summarizer = availability.using_fallback_summarizer,
        "Model provisioning finished"
    );
    ctx
}

async fn provision_summarizer(loader: &dyn ModelLoader) -> (Option<Arc<dyn Summarizer>>, bool) {
    info!(model = PRIMARY_SUMMARIZER_MODEL, "Loading summarization model...");
    match loader.load_summarizer(PRIMARY_SUMMARIZER_MODEL).await {
        Ok(summarizer) => {
            info!(model = PRIMARY_SUMMARIZER_MODEL, "Summarization model loaded successfully.");
            return (Some(summarizer), false);
        }
        Err(e) => warn!(
            model = PRIMARY_SUMMARIZER_MODEL,
            "Primary summarization model unavailable, trying fallback: {e}"
        ),
    }

    match loader.load_summarizer(FALLBACK_SUMMARIZER_MODEL).await {
        Ok(summarizer) => {
            info!(model = FALLBACK_SUMMARIZER_MODEL, "Fallback summarization model loaded.");
            (Some(summarizer), true)
        }
        Err(e) => {
            error!(
                model = FALLBACK_SUMMARIZER_MODEL,
                "Error loading fallback summarization model, summarization disabled: {e}"
            );
            (None, false)
        }
    }
}

async fn provision_sentiment(loader: &dyn ModelLoader) -> Option<Arc<dyn SentimentClassifier>> {
    info!(model = SENTIMENT_MODEL, "Loading sentiment analysis model...");
    match loader.load_sentiment_classifier(SENTIMENT_MODEL).await {
        Ok(classifier) => {
            info!(model = SENTIMENT_MODEL, "Sentiment analysis model loaded successfully.");
            Some(classifier)
        }
        Err(e) => {
            error!(
                model = SENTIMENT_MODEL,
                "Error loading sentiment model, sentiment analysis disabled: {e}"
            );
            None
        }
    }
}
