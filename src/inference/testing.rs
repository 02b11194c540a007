//! Deterministic test doubles for the capability traits.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::inference::capabilities::{
    ModelLoader, SentimentClassifier, SentimentLabel, SentimentPrediction, SummaryCandidate,
    SummaryParams, Summarizer,
};
use crate::inference::context::InferenceContext;
use crate::inference::errors::{InferenceError, InferenceResult};

/// Summarizer returning a fixed reply and recording what it was asked.
pub struct StubSummarizer {
    model_id: String,
    reply: Result<Vec<String>, String>,
    calls: Mutex<Vec<(String, SummaryParams)>>,
}

impl StubSummarizer {
    pub fn replying(reply: &str) -> Arc<Self> {
        Self::with_reply("stub/summarizer", Ok(vec![reply.to_string()]))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::with_reply("stub/summarizer", Err(message.to_string()))
    }

    pub fn empty() -> Arc<Self> {
        Self::with_reply("stub/summarizer", Ok(Vec::new()))
    }

    fn with_reply(model_id: &str, reply: Result<Vec<String>, String>) -> Arc<Self> {
        Arc::new(Self {
            model_id: model_id.to_string(),
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(String, SummaryParams)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn summarize(
        &self,
        text: &str,
        params: &SummaryParams,
    ) -> InferenceResult<Vec<SummaryCandidate>> {
        self.calls.lock().unwrap().push((text.to_string(), *params));
        match &self.reply {
            Ok(texts) => Ok(texts
                .iter()
                .map(|t| SummaryCandidate {
                    summary_text: t.clone(),
                })
                .collect()),
            Err(message) => Err(InferenceError::UnexpectedShape(message.clone())),
        }
    }
}

/// Sentiment classifier cycling through fixed labels.
pub struct StubSentiment {
    labels: Result<Vec<SentimentLabel>, String>,
    calls: Mutex<Vec<usize>>,
}

impl StubSentiment {
    pub fn labelling(labels: Vec<SentimentLabel>) -> Arc<Self> {
        Arc::new(Self {
            labels: Ok(labels),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            labels: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Number of calls made, not number of texts.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SentimentClassifier for StubSentiment {
    fn model_id(&self) -> &str {
        "stub/sentiment"
    }

    async fn classify_sentiment(&self, texts: &[String]) -> InferenceResult<Vec<SentimentPrediction>> {
        self.calls.lock().unwrap().push(texts.len());
        let labels = self
            .labels
            .as_ref()
            .map_err(|message| InferenceError::UnexpectedShape(message.clone()))?;
        if labels.is_empty() {
            return Ok(Vec::new());
        }
        Ok(texts
            .iter()
            .zip(labels.iter().cycle())
            .map(|(_, label)| SentimentPrediction {
                label: label.clone(),
                score: 0.99,
            })
            .collect())
    }
}

/// Loader that succeeds for every model id except the ones marked failing.
#[derive(Default)]
pub struct StubLoader {
    failing: HashSet<String>,
    summarizer_attempts: Mutex<Vec<String>>,
}

impl StubLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, model_id: &str) -> Self {
        self.failing.insert(model_id.to_string());
        self
    }

    pub fn summarizer_attempts(&self) -> Vec<String> {
        self.summarizer_attempts.lock().unwrap().clone()
    }

    fn check(&self, model_id: &str) -> InferenceResult<()> {
        if self.failing.contains(model_id) {
            return Err(InferenceError::Load {
                model: model_id.to_string(),
                reason: "stub configured to fail".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ModelLoader for StubLoader {
    async fn load_summarizer(&self, model_id: &str) -> InferenceResult<Arc<dyn Summarizer>> {
        self.summarizer_attempts
            .lock()
            .unwrap()
            .push(model_id.to_string());
        self.check(model_id)?;
        Ok(StubSummarizer::with_reply(model_id, Ok(vec!["stub summary".to_string()])))
    }

    async fn load_sentiment_classifier(
        &self,
        model_id: &str,
    ) -> InferenceResult<Arc<dyn SentimentClassifier>> {
        self.check(model_id)?;
        Ok(StubSentiment::labelling(vec![SentimentLabel::Positive]))
    }
}

/// Context holding the given stubs.
pub fn context_with(
    summarizer: Option<Arc<StubSummarizer>>,
    sentiment: Option<Arc<StubSentiment>>,
) -> InferenceContext {
    InferenceContext::new(
        summarizer.map(|s| s as Arc<dyn Summarizer>),
        sentiment.map(|s| s as Arc<dyn SentimentClassifier>),
        false,
    )
}
