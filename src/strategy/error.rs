//! Error taxonomy for the strategy core.
//!
//! None of these reach the caller of `execute`: the orchestrator turns
//! every one of them into a fallback response whose `notes` carry the
//! Display text.

use thiserror::Error;

/// Failure talking to the generative backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Response contained no text candidates")]
    NoText,
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum StrategyError {
    /// No extraction strategy could recover a JSON object.
    #[error("Could not parse valid JSON from AI response.")]
    Parse { raw: String },
    #[error(transparent)]
    Backend(#[from] BackendError),
}
