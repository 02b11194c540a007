//! Sentiment aggregation: one batched inference call, label tally, percentage verdict.
//!
//! Notes:
//! - Percentages are rounded independently (round-half-to-even on the exact
//!   ratio), so they need not sum to 100.
//! - `overall` is `POSITIVE` only when the positive share is strictly larger;
//!   ties resolve to `NEGATIVE`. `NEUTRAL` is only produced for an empty batch.
//! - Labels other than `POSITIVE`/`NEGATIVE` count toward the total only.

use std::fmt;

use serde::Serialize;
use tracing::{error, info};

use crate::analysis::errors::{AnalysisError, AnalysisResult};
use crate::inference::capabilities::{SentimentLabel, SentimentPrediction};
use crate::inference::context::InferenceContext;
use crate::inference::errors::InferenceError;

/// Detail reported when no sentiment model was provisioned.
pub const SENTIMENT_UNAVAILABLE: &str = "Sentiment analysis model not available.";

/// Population-level sentiment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallSentiment {
    /// More positive than negative items.
    Positive,
    /// Not more positive than negative items.
    Negative,
    /// No items at all.
    Neutral,
}

impl OverallSentiment {
    /// Stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for OverallSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label counts over one batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SentimentTally {
    /// Items labelled `POSITIVE`.
    pub positive: usize,
    /// Items labelled `NEGATIVE`.
    pub negative: usize,
    /// Number of predictions returned.
    pub total: usize,
}

impl SentimentTally {
    /// Count labels in a set of predictions.
    #[must_use]
    pub fn from_predictions(predictions: &[SentimentPrediction]) -> Self {
        predictions.iter().fold(
            Self {
                total: predictions.len(),
                ..Self::default()
            },
            |mut tally, prediction| {
                match prediction.label {
                    SentimentLabel::Positive => tally.positive += 1,
                    SentimentLabel::Negative => tally.negative += 1,
                    SentimentLabel::Other(_) => {}
                }
                tally
            },
        )
    }

    /// Derive percentages and the overall verdict. An empty tally is neutral.
    #[must_use]
    pub fn verdict(&self) -> AggregateVerdict {
        if self.total == 0 {
            return AggregateVerdict::NO_COMMENTS;
        }

        let positive_percent = percent_half_even(self.positive, self.total);
        let negative_percent = percent_half_even(self.negative, self.total);
        let overall = if positive_percent > negative_percent {
            OverallSentiment::Positive
        } else {
            OverallSentiment::Negative
        };

        AggregateVerdict {
            positive_percent,
            negative_percent,
            overall,
        }
    }
}

/// Aggregated verdict for a comment batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AggregateVerdict {
    /// Share of positive items, 0 to 100.
    pub positive_percent: u8,
    /// Share of negative items, 0 to 100.
    pub negative_percent: u8,
    /// Overall sentiment.
    pub overall: OverallSentiment,
}

impl AggregateVerdict {
    /// Verdict for an empty batch.
    pub const NO_COMMENTS: Self = Self {
        positive_percent: 0,
        negative_percent: 0,
        overall: OverallSentiment::Neutral,
    };
}

/// `round(100 * count / total)` with ties going to the even integer.
///
/// Computed in integers so exact halves such as 1/8 (12.5) are detected.
#[must_use]
pub fn percent_half_even(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = count.saturating_mul(100);
    let quotient = scaled / total;
    let twice_remainder = (scaled % total) * 2;

    let rounded = if twice_remainder > total || (twice_remainder == total && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Classify every comment in one batched call and aggregate the labels.
///
/// # Errors
/// Returns [`AnalysisError::Unavailable`] if no sentiment model was provisioned and
/// [`AnalysisError::Inference`] if the model call fails or returns nothing.
pub async fn aggregate(ctx: &InferenceContext, comments: &[String]) -> AnalysisResult<AggregateVerdict> {
    let Some(classifier) = ctx.sentiment() else {
        return Err(AnalysisError::Unavailable(SENTIMENT_UNAVAILABLE));
    };

    if comments.is_empty() {
        return Ok(AggregateVerdict::NO_COMMENTS);
    }

    info!(
        count = comments.len(),
        model = classifier.model_id(),
        "Analyzing sentiment for comments"
    );

    let predictions = classifier.classify_sentiment(comments).await.map_err(|e| {
        error!(model = classifier.model_id(), "Error during sentiment analysis: {e}");
        AnalysisError::from(e)
    })?;

    if predictions.is_empty() {
        error!(model = classifier.model_id(), "Sentiment analysis returned no predictions");
        return Err(InferenceError::EmptyResult.into());
    }

    let tally = SentimentTally::from_predictions(&predictions);
    let verdict = tally.verdict();
    info!(
        positive = tally.positive,
        negative = tally.negative,
        total = tally.total,
        overall = %verdict.overall,
        "Sentiment analysis complete."
    );
    Ok(verdict)
}
