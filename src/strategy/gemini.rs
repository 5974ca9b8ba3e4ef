//! Gemini REST transport via the Google AI `generateContent` endpoint.
//!
//! - API key in the `x-goog-api-key` header, never in the URL
//! - One non-streaming call per request, no retry
//! - Reply text is every `candidates[0].content.parts[*].text` joined
//! - Token usage in `usageMetadata`

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::backend::{Backend, GenerationRequest};
use super::error::BackendError;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiBackend {
    api_key: String,
    api_base: String,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base(api_key, DEFAULT_API_BASE)
    }

    /// Point the transport at a different host (proxies, local mocks).
    pub fn with_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, model
        )
    }
}

/// Build the JSON body for one `generateContent` call.
///
/// Output-shaping and thinking keys go under `generationConfig`; tools and
/// tool config sit at the top level.
pub fn request_body(request: &GenerationRequest) -> Value {
    let config = &request.config;

    let mut generation_config = Map::new();
    let wire = config.to_wire();
    for key in ["responseMimeType", "responseSchema", "thinkingConfig"] {
        if let Some(value) = wire.get(key) {
            generation_config.insert(key.to_string(), value.clone());
        }
    }

    let mut body = json!({
        "contents": [
            {
                "role": "user",
                "parts": request.parts
            }
        ],
        "systemInstruction": {
            "parts": [
                {
                    "text": config.system_instruction
                }
            ]
        },
        "generationConfig": generation_config
    });

    if let Some(tools) = config.tools_wire() {
        body["tools"] = tools;
    }
    if let Some(tool_config) = config.tool_config() {
        body["toolConfig"] = tool_config;
    }
    body
}

/// Join the text parts of the first candidate.
///
/// Grounded replies can split the answer across several parts.
pub fn response_text(json: &Value) -> Option<String> {
    let parts = json
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl Backend for GeminiBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        log::info!("[GEMINI] Model: {}", request.model);
        log::info!(
            "[GEMINI] Parts: {}, strict schema: {}, tools: {:?}",
            request.parts.len(),
            request.config.is_strict(),
            request.config.tools()
        );

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("content-type", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| e.without_url())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[GEMINI] API returned {}: {}", status, body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await.map_err(|e| e.without_url())?;
        log::info!("[GEMINI] Response: {}ms", start.elapsed().as_millis());

        if let Some(usage) = json.get("usageMetadata") {
            log::info!(
                "[GEMINI] Input tokens: {}",
                usage["promptTokenCount"].as_u64().unwrap_or(0)
            );
            log::info!(
                "[GEMINI] Output tokens: {}",
                usage["candidatesTokenCount"].as_u64().unwrap_or(0)
            );
            if let Some(thoughts) = usage["thoughtsTokenCount"].as_u64() {
                log::info!("[GEMINI] Thinking tokens: {}", thoughts);
            }
        }

        response_text(&json).ok_or_else(|| {
            log::warn!("[GEMINI] No text in first candidate");
            BackendError::NoText
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::backend::Part;
    use crate::strategy::selector;
    use crate::strategy::types::{Location, Mode, Platform, StrategyRequest};

    fn generation(request: &StrategyRequest) -> GenerationRequest {
        let model = selector::select_model(request);
        GenerationRequest {
            model: model.to_string(),
            parts: vec![Part::text("directive"), Part::inline("image/png", "AAAA")],
            config: selector::build_config(request, model),
        }
    }

    #[test]
    fn strict_body_puts_schema_in_generation_config() {
        let req = StrategyRequest::new(Platform::Instagram, Mode::Creator, "Coffee");
        let body = request_body(&generation(&req));

        assert_eq!(body["contents"][0]["parts"][0]["text"], "directive");
        assert_eq!(
            body["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .is_some_and(|s| !s.is_empty()));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert!(body["generationConfig"].get("responseSchema").is_some());
        assert!(body.get("tools").is_none());
        assert!(body.get("toolConfig").is_none());
    }

    #[test]
    fn grounded_body_moves_tools_to_top_level() {
        let req = StrategyRequest::new(Platform::Instagram, Mode::Creator, "Cafes")
            .with_thinking(true)
            .with_maps(Some(Location { lat: 51.5, lng: -0.12 }));
        let body = request_body(&generation(&req));

        assert!(body["generationConfig"].get("responseSchema").is_none());
        assert!(body["generationConfig"].get("responseMimeType").is_none());
        assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingBudget"], 24_576);
        assert_eq!(body["tools"], json!([{ "googleMaps": {} }]));
        assert_eq!(body["toolConfig"]["retrievalConfig"]["latLng"]["latitude"], 51.5);
        assert_eq!(body["toolConfig"]["retrievalConfig"]["latLng"]["longitude"], -0.12);
    }

    #[test]
    fn response_text_joins_parts() {
        let reply = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"hook\": " }, { "text": "\"Hey there\"}" }] }
            }]
        });
        assert_eq!(response_text(&reply).as_deref(), Some("{\"hook\": \"Hey there\"}"));
    }

    #[test]
    fn response_without_text_is_none() {
        assert!(response_text(&json!({ "candidates": [] })).is_none());
        assert!(response_text(&json!({
            "candidates": [{ "content": { "parts": [{ "functionCall": {} }] } }]
        }))
        .is_none());
    }

    #[test]
    fn endpoint_carries_model_but_not_key() {
        let backend = GeminiBackend::with_base("k123", "http://localhost:8080/");
        assert_eq!(
            backend.endpoint("gemini-2.5-flash"),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(!backend.endpoint("gemini-2.5-flash").contains("k123"));
    }
}
