//! HTTP route handlers for the AI service API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::analysis::{self, AggregateVerdict, AnalysisError, OverallSentiment};

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/health", get(health_check))
        .route("/summarize", post(get_summary))
        .route("/sentiment", post(get_sentiment))
        .with_state(state)
}

/// Liveness endpoint.
async fn read_root() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "AI service is running" }))
}

/// Health check endpoint, including which models are usable.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "ai-service",
        "version": env!("CARGO_PKG_VERSION"),
        "models": state.inference.availability(),
    }))
}

/// Summarization request.
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// Text to summarize.
    pub text: String,
}

/// Summarization response.
#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    /// Summary, or a canned sentence for trivial input.
    pub summary: String,
}

/// Error body for boundary-level failures.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Human-readable detail.
    pub detail: String,
}

/// Handle summarization requests.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, (StatusCode, Json<ErrorDetail>)> {
    let outcome = analysis::summarize(&state.inference, &request.text)
        .await
        .map_err(|e| {
            let status = match e {
                AnalysisError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                AnalysisError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(ErrorDetail {
                    detail: e.to_string(),
                }),
            )
        })?;

    Ok(Json(SummarizeResponse {
        summary: outcome.into_text(),
    }))
}

/// Sentiment request.
#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    /// Comments to classify.
    pub comments: Vec<String>,
}

/// Sentiment response. Failures are reported in-band with a 200 status.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SentimentResponse {
    /// Aggregated verdict.
    Verdict {
        /// Positive share, 0 to 100.
        positive: u8,
        /// Negative share, 0 to 100.
        negative: u8,
        /// Only present for an empty batch.
        #[serde(skip_serializing_if = "Option::is_none")]
        neutral: Option<u8>,
        /// Overall sentiment.
        overall: OverallSentiment,
    },
    /// Failure description.
    Error {
        /// Human-readable error.
        error: String,
    },
}

impl From<AggregateVerdict> for SentimentResponse {
    fn from(verdict: AggregateVerdict) -> Self {
        Self::Verdict {
            positive: verdict.positive_percent,
            negative: verdict.negative_percent,
            neutral: (verdict.overall == OverallSentiment::Neutral).then_some(0),
            overall: verdict.overall,
        }
    }
}

/// Handle sentiment requests.
async fn get_sentiment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SentimentRequest>,
) -> Json<SentimentResponse> {
    match analysis::aggregate(&state.inference, &request.comments).await {
        Ok(verdict) => Json(verdict.into()),
        Err(e) => Json(SentimentResponse::Error {
            error: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::summarization::{SUMMARIZER_UNAVAILABLE, TOO_SHORT_SUMMARY};
    use crate::inference::InferenceContext;
    use crate::inference::SentimentLabel::{Negative, Positive};
    use crate::inference::testing::{StubSentiment, StubSummarizer, context_with};

    const LONG_TEXT: &str = "The library extended its opening hours after a survey showed strong demand from students during exam season.";

    async fn call(ctx: InferenceContext, request: Request<Body>) -> (StatusCode, Value) {
        let app = create_router(AppState::new(ctx));
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_root() {
        let (status, body) = call(InferenceContext::unavailable(), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "AI service is running" }));
    }

    #[tokio::test]
    async fn test_health_reports_availability() {
        let ctx = context_with(Some(StubSummarizer::replying("s")), None);
        let (status, body) = call(ctx, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["models"]["summarizer_ready"], true);
        assert_eq!(body["models"]["sentiment_ready"], false);
        assert_eq!(body["models"]["using_fallback_summarizer"], false);
    }

    #[tokio::test]
    async fn test_summarize_success() {
        let ctx = context_with(Some(StubSummarizer::replying("Library hours extended.")), None);
        let (status, body) = call(ctx, post_json("/summarize", &json!({ "text": LONG_TEXT }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "summary": "Library hours extended." }));
    }

    #[tokio::test]
    async fn test_summarize_short_text_is_ok_with_sentinel() {
        let stub = StubSummarizer::replying("unused");
        let ctx = context_with(Some(stub.clone()), None);
        let (status, body) = call(ctx, post_json("/summarize", &json!({ "text": "hi" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "summary": TOO_SHORT_SUMMARY }));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_summarize_unavailable_is_503() {
        let (status, body) = call(
            InferenceContext::unavailable(),
            post_json("/summarize", &json!({ "text": LONG_TEXT })),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({ "detail": SUMMARIZER_UNAVAILABLE }));
    }

    #[tokio::test]
    async fn test_summarize_inference_failure_is_500() {
        let ctx = context_with(Some(StubSummarizer::failing("tensor shape mismatch")), None);
        let (status, body) = call(ctx, post_json("/summarize", &json!({ "text": LONG_TEXT }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("tensor shape mismatch"));
    }

    #[tokio::test]
    async fn test_sentiment_verdict() {
        let ctx = context_with(None, Some(StubSentiment::labelling(vec![Positive, Positive, Negative])));
        let (status, body) = call(
            ctx,
            post_json("/sentiment", &json!({ "comments": ["great", "love it", "meh"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "positive": 67, "negative": 33, "overall": "POSITIVE" }));
    }

    #[tokio::test]
    async fn test_sentiment_empty_batch() {
        let ctx = context_with(None, Some(StubSentiment::labelling(vec![Positive])));
        let (status, body) = call(ctx, post_json("/sentiment", &json!({ "comments": [] }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "positive": 0, "negative": 0, "neutral": 0, "overall": "NEUTRAL" })
        );
    }

    #[tokio::test]
    async fn test_sentiment_errors_are_in_band() {
        let (status, body) = call(
            InferenceContext::unavailable(),
            post_json("/sentiment", &json!({ "comments": ["fine"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "Sentiment analysis model not available." }));

        let ctx = context_with(None, Some(StubSentiment::failing("batch too large")));
        let (status, body) = call(ctx, post_json("/sentiment", &json!({ "comments": ["fine"] }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].as_str().unwrap().contains("batch too large"));
    }
}
