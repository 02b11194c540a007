//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::inference::{InferenceContext, ModelLoader, provision};

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Capabilities acquired at startup. Read-only for the process lifetime.
    pub inference: InferenceContext,
}

impl AppState {
    /// Wrap an already-built inference context.
    #[must_use]
    pub fn new(inference: InferenceContext) -> Arc<Self> {
        Arc::new(Self { inference })
    }

    /// Provision every capability through `loader` and build the state.
    ///
    /// Never fails: missing models only degrade the matching endpoint.
    pub async fn provision(loader: &dyn ModelLoader) -> Arc<Self> {
        Self::new(provision(loader).await)
    }
}
