//! Strategy orchestrator: runs one submission end to end.
//!
//! compile → select → backend → extract → normalize. Always returns a
//! complete `StrategyResponse`; any backend or parse failure becomes a
//! fallback record.

use std::sync::Arc;

use super::backend::{Backend, GenerationRequest};
use super::compiler;
use super::defaults;
use super::error::StrategyError;
use super::extract;
use super::gemini::GeminiBackend;
use super::normalize::normalize;
use super::response::{RawStrategy, ResponseStatus, StrategyResponse};
use super::selector;
use super::types::StrategyRequest;

/// Holds only the backend handle; safe to share across tasks.
#[derive(Clone)]
pub struct StrategyOrchestrator {
    backend: Arc<dyn Backend>,
}

impl StrategyOrchestrator {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Orchestrator talking to the public Gemini API.
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::new(Arc::new(GeminiBackend::new(api_key)))
    }

    /// Gemini transport against a custom API host.
    pub fn gemini_with_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self::new(Arc::new(GeminiBackend::with_base(api_key, api_base)))
    }

    /// Run one strategy request. Never fails.
    pub async fn execute(&self, request: &StrategyRequest) -> StrategyResponse {
        log::info!(
            "[STRATEGY] {} / {} / {} (action: {}, niche: '{}')",
            request.platform,
            request.mode,
            request.goal,
            request.action,
            request.niche
        );

        let start = std::time::Instant::now();

        let response = match self.generate(request).await {
            Ok(raw) => {
                log::info!("[STRATEGY] Parse result: success");
                normalize(raw, request, ResponseStatus::Generated)
            }
            Err(e) => {
                log::error!("[STRATEGY] Generation failed: {}", e);
                log::info!("[STRATEGY] Parse result: fallback");
                normalize(
                    defaults::fallback_raw(request, &e.to_string()),
                    request,
                    ResponseStatus::Fallback,
                )
            }
        };

        log::info!(
            "[STRATEGY] Done in {}ms (virality score {})",
            start.elapsed().as_millis(),
            response.virality_score
        );
        response
    }

    async fn generate(&self, request: &StrategyRequest) -> Result<RawStrategy, StrategyError> {
        let prompt = compiler::compile(request);
        let model = selector::select_model(request);
        let config = selector::build_config(request, model);

        log::debug!("[STRATEGY] Directive:\n{}", prompt.directive);

        let generation = GenerationRequest {
            model: model.to_string(),
            parts: prompt.parts,
            config,
        };
        let text = self.backend.generate(&generation).await?;
        let object = extract::extract_json(&text)?;
        Ok(RawStrategy::from_json(object))
    }
}
