//! Capabilities backed by a hosted, Hugging Face style inference endpoint.
//!
//! Behaviour:
//! - `POST {base_url}/models/{model_id}` with an optional bearer token.
//! - Summarization sends `{"inputs": text, "parameters": {...}}` and reads `[{"summary_text"}]`.
//! - Sentiment sends `{"inputs": [texts]}` and reads either one `{"label","score"}` per input
//!   or a ranked list of them per input (highest score wins).
//! - Every request carries `"options": {"wait_for_model": true}`, so a cold model is
//!   loaded and answered in the same call instead of failing with 503.
//! - Provisioning optionally issues one tiny warm-up call so a missing or cold model
//!   fails at startup instead of on the first request.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::inference::capabilities::{
    ModelLoader, SentimentClassifier, SentimentLabel, SentimentPrediction, SummaryCandidate,
    SummaryParams, Summarizer,
};
use crate::inference::config::InferenceConfig;
use crate::inference::errors::{InferenceError, InferenceResult};

/// Warm-up input for summarization models.
const WARMUP_TEXT: &str = "The service is starting and checks that the model responds.";

/// Warm-up generation bounds: as small as the model accepts.
const WARMUP_PARAMS: SummaryParams = SummaryParams {
    max_length: 8,
    min_length: 1,
    do_sample: false,
    truncation: true,
};

/// Maximum number of characters of an error body kept in [`InferenceError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

const REQUEST_OPTIONS: RequestOptions = RequestOptions {
    wait_for_model: true,
};

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: &'a SummaryParams,
    options: &'a RequestOptions,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a [String],
    options: &'a RequestOptions,
}

#[derive(Deserialize)]
struct RawPrediction {
    label: String,
    score: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSentimentResponse {
    Ranked(Vec<Vec<RawPrediction>>),
    Flat(Vec<RawPrediction>),
}

/// One model on the hosted endpoint.
#[derive(Clone)]
struct HostedEndpoint {
    client: Client,
    url: String,
    api_token: Option<String>,
    model_id: String,
}

impl HostedEndpoint {
    fn new(client: Client, config: &InferenceConfig, model_id: &str) -> Self {
        Self {
            client,
            url: format!("{}/models/{model_id}", config.base_url.trim_end_matches('/')),
            api_token: config.api_token.clone(),
            model_id: model_id.to_string(),
        }
    }

    async fn post<B: Serialize + Sync>(&self, body: &B) -> InferenceResult<Vec<u8>> {
        let mut request = self.client.post(&self.url).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body: String = String::from_utf8_lossy(&bytes)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(bytes.to_vec())
    }
}

/// Summarization capability served by the hosted endpoint.
pub struct HostedSummarizer {
    endpoint: HostedEndpoint,
}

#[async_trait]
impl Summarizer for HostedSummarizer {
    fn model_id(&self) -> &str {
        &self.endpoint.model_id
    }

    async fn summarize(
        &self,
        text: &str,
        params: &SummaryParams,
    ) -> InferenceResult<Vec<SummaryCandidate>> {
        let body = self
            .endpoint
            .post(&SummarizeRequest {
                inputs: text,
                parameters: params,
                options: &REQUEST_OPTIONS,
            })
            .await?;
        parse_summary_response(&body)
    }
}

/// Sentiment capability served by the hosted endpoint.
pub struct HostedSentimentClassifier {
    endpoint: HostedEndpoint,
}

#[async_trait]
impl SentimentClassifier for HostedSentimentClassifier {
    fn model_id(&self) -> &str {
        &self.endpoint.model_id
    }

    async fn classify_sentiment(&self, texts: &[String]) -> InferenceResult<Vec<SentimentPrediction>> {
        let body = self
            .endpoint
            .post(&ClassifyRequest {
                inputs: texts,
                options: &REQUEST_OPTIONS,
            })
            .await?;
        parse_sentiment_response(&body, texts.len())
    }
}

/// Builds hosted capabilities sharing one HTTP client.
pub struct HostedModelLoader {
    client: Client,
    config: InferenceConfig,
}

impl HostedModelLoader {
    /// Create a loader for the configured endpoint.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: InferenceConfig) -> InferenceResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, model_id: &str) -> HostedEndpoint {
        HostedEndpoint::new(self.client.clone(), &self.config, model_id)
    }
}

#[async_trait]
impl ModelLoader for HostedModelLoader {
    async fn load_summarizer(&self, model_id: &str) -> InferenceResult<Arc<dyn Summarizer>> {
        let summarizer = HostedSummarizer {
            endpoint: self.endpoint(model_id),
        };

        if self.config.warmup {
            debug!(model = model_id, "warming up summarization model");
            summarizer
                .summarize(WARMUP_TEXT, &WARMUP_PARAMS)
                .await
                .map_err(|e| load_error(model_id, &e))?;
        }

        Ok(Arc::new(summarizer))
    }

    async fn load_sentiment_classifier(
        &self,
        model_id: &str,
    ) -> InferenceResult<Arc<dyn SentimentClassifier>> {
        let classifier = HostedSentimentClassifier {
            endpoint: self.endpoint(model_id),
        };

        if self.config.warmup {
            debug!(model = model_id, "warming up sentiment model");
            classifier
                .classify_sentiment(&[WARMUP_TEXT.to_string()])
                .await
                .map_err(|e| load_error(model_id, &e))?;
        }

        Ok(Arc::new(classifier))
    }
}

fn load_error(model_id: &str, err: &InferenceError) -> InferenceError {
    InferenceError::Load {
        model: model_id.to_string(),
        reason: err.to_string(),
    }
}

fn parse_summary_response(body: &[u8]) -> InferenceResult<Vec<SummaryCandidate>> {
    let candidates: Vec<SummaryCandidate> = serde_json::from_slice(body)?;
    Ok(candidates)
}

fn parse_sentiment_response(
    body: &[u8],
    expected: usize,
) -> InferenceResult<Vec<SentimentPrediction>> {
    let raw: RawSentimentResponse = serde_json::from_slice(body)?;

    let predictions: Vec<SentimentPrediction> = match raw {
        RawSentimentResponse::Flat(items) => items.into_iter().map(to_prediction).collect(),
        RawSentimentResponse::Ranked(ranked) => ranked
            .into_iter()
            .map(|candidates| {
                candidates
                    .into_iter()
                    .max_by(|a, b| a.score.total_cmp(&b.score))
                    .map(to_prediction)
                    .ok_or_else(|| {
                        InferenceError::UnexpectedShape("empty candidate list".to_string())
                    })
            })
            .collect::<InferenceResult<_>>()?,
    };

    if predictions.len() != expected {
        return Err(InferenceError::UnexpectedShape(format!(
            "expected {expected} predictions, got {}",
            predictions.len()
        )));
    }

    Ok(predictions)
}

fn to_prediction(raw: RawPrediction) -> SentimentPrediction {
    SentimentPrediction {
        label: SentimentLabel::parse(&raw.label),
        score: raw.score,
    }
}
