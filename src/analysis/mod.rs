//! Request orchestration on top of the inference context.

pub mod errors;
pub mod normalizer;
pub mod sentiment;
pub mod summarization;

pub use errors::{AnalysisError, AnalysisResult};
pub use normalizer::normalize_text;
pub use sentiment::{AggregateVerdict, OverallSentiment, SentimentTally, aggregate};
pub use summarization::{SummaryOutcome, summarize};
