//! Inference-serving facade: text summarization and comment sentiment aggregation over HTTP.

// Strict lint policy for the whole crate
#![deny(unsafe_code)] // No unsafe code anywhere
#![deny(missing_docs)] // Every public item must be documented
#![deny(non_camel_case_types)]
#![deny(unused_must_use)] // Results and Options must be handled explicitly
#![deny(nonstandard_style)]
#![forbid(unsafe_op_in_unsafe_fn)]
// Clippy discipline
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)] // No unwrap() outside tests
#![deny(clippy::expect_used)] // No expect() outside tests
#![deny(clippy::panic)]
#![deny(clippy::print_stdout)] // Logging goes through tracing
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::shadow_unrelated)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

/// Text normalization and the two request orchestrators.
pub mod analysis;
/// Service-level configuration loaded from the environment.
pub mod config;
/// Inference capabilities, provisioning, and the shared inference context.
pub mod inference;
/// HTTP server and API routes.
#[allow(clippy::missing_errors_doc, clippy::unused_async)]
pub mod server;
/// Entry helpers to start the AI service.
pub mod start_ai_service;
