//! Binary entrypoint for the AI service.

use std::process::ExitCode;

use ai_service::start_ai_service;

/// Provision the models, then serve the summarization and sentiment API.
fn main() -> ExitCode {
    start_ai_service::run()
}
