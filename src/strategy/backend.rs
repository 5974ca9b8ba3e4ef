//! Backend seam: what the orchestrator hands to a generative service.
//!
//! The orchestrator only knows this trait. `gemini::GeminiBackend` is the
//! real transport; tests plug in scripted backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::BackendError;
use super::selector::GenerationConfig;

/// Base64 payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// One content part: either text or inline binary data.
///
/// Serializes in Gemini's shape (`{"text": ..}` / `{"inlineData": ..}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::InlineData { .. } => None,
        }
    }
}

/// Everything needed for a single backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub parts: Vec<Part>,
    pub config: GenerationConfig,
}

/// A generative backend. One attempt per call, no retry; returns the raw
/// model text.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError>;
}
