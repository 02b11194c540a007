//! Summarization orchestration: availability check, length gates, normalization, inference.

use tracing::{error, info};

use crate::analysis::errors::{AnalysisError, AnalysisResult};
use crate::analysis::normalizer::normalize_text;
use crate::inference::capabilities::SummaryParams;
use crate::inference::context::InferenceContext;
use crate::inference::errors::InferenceError;

/// Minimum number of characters worth summarizing, before and after normalization.
pub const MIN_SUMMARY_INPUT_CHARS: usize = 50;

/// Generation bounds for every summarization request.
pub const SUMMARY_PARAMS: SummaryParams = SummaryParams {
    max_length: 150,
    min_length: 40,
    do_sample: false,
    truncation: true,
};

/// Returned in place of a summary when the raw input is too short.
pub const TOO_SHORT_SUMMARY: &str = "Text is too short to summarize.";
/// Returned when normalization leaves too little meaningful content.
pub const INSUFFICIENT_CONTENT_SUMMARY: &str = "Not enough meaningful content to summarize.";
/// Detail reported when no summarizer was provisioned.
pub const SUMMARIZER_UNAVAILABLE: &str = "Summarization model not available.";

/// Successful summarization result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Summary produced by the model.
    Summary(String),
    /// Trimmed input below the minimum; no inference was made.
    TooShort,
    /// Normalized input below the minimum; no inference was made.
    InsufficientContent,
}

impl SummaryOutcome {
    /// Text returned to the caller.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Summary(text) => text,
            Self::TooShort => TOO_SHORT_SUMMARY.to_string(),
            Self::InsufficientContent => INSUFFICIENT_CONTENT_SUMMARY.to_string(),
        }
    }
}

/// Summarize raw text with the provisioned summarizer.
///
/// # Errors
/// Returns [`AnalysisError::Unavailable`] if no summarizer was provisioned and
/// [`AnalysisError::Inference`] if the model call fails.
pub async fn summarize(ctx: &InferenceContext, text: &str) -> AnalysisResult<SummaryOutcome> {
    let Some(summarizer) = ctx.summarizer() else {
        return Err(AnalysisError::Unavailable(SUMMARIZER_UNAVAILABLE));
    };

    if text.trim().chars().count() < MIN_SUMMARY_INPUT_CHARS {
        return Ok(SummaryOutcome::TooShort);
    }

    let normalized = normalize_text(text);
    let normalized_len = normalized.chars().count();
    if normalized_len < MIN_SUMMARY_INPUT_CHARS {
        return Ok(SummaryOutcome::InsufficientContent);
    }

    info!(
        raw_len = text.chars().count(),
        normalized_len,
        model = summarizer.model_id(),
        "Summarizing text"
    );

    let candidates = summarizer
        .summarize(&normalized, &SUMMARY_PARAMS)
        .await
        .map_err(|e| {
            error!(model = summarizer.model_id(), "Error during summarization: {e}");
            AnalysisError::from(e)
        })?;

    let Some(best) = candidates.into_iter().next() else {
        error!(model = summarizer.model_id(), "Summarization returned no candidates");
        return Err(InferenceError::EmptyResult.into());
    };

    info!("Summarization complete.");
    Ok(SummaryOutcome::Summary(best.summary_text))
}
