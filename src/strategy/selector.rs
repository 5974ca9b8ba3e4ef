//! Model and tool selection plus generation-config resolution.
//!
//! Grounding tools and strict structured output are mutually exclusive on
//! the Gemini side. Instead of building a strict config and deleting keys
//! afterwards, the request's toggles resolve once into an `OutputMode`.

use serde_json::{json, Map, Value};

use super::prompts::{
    self, FLASH_THINKING_BUDGET, MAPS_MODEL, PRO_MODEL, PRO_THINKING_BUDGET, SYSTEM_INSTRUCTION,
};
use super::types::{Location, StrategyRequest};

/// A grounding capability the backend may invoke during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundingTool {
    GoogleSearch,
    GoogleMaps,
}

impl GroundingTool {
    fn to_wire(self) -> Value {
        match self {
            GroundingTool::GoogleSearch => json!({ "googleSearch": {} }),
            GroundingTool::GoogleMaps => json!({ "googleMaps": {} }),
        }
    }
}

/// How the backend is asked to shape its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// JSON MIME type + response schema enforced by the backend.
    StrictSchema,
    /// Grounding tools active; the schema cannot be enforced and the
    /// response text must go through the extractor.
    Grounded(Vec<GroundingTool>),
}

/// Fully resolved configuration for one backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub system_instruction: &'static str,
    pub output: OutputMode,
    /// Only set for maps grounding with a known location.
    pub location: Option<Location>,
    pub thinking_budget: Option<u32>,
}

/// Pick the backend model for a request.
pub fn select_model(request: &StrategyRequest) -> &'static str {
    if request.use_maps {
        MAPS_MODEL
    } else {
        PRO_MODEL
    }
}

/// Resolve the feature toggles into a single output mode.
pub fn resolve_output_mode(request: &StrategyRequest) -> OutputMode {
    let mut tools = Vec::new();
    if request.wants_search() {
        tools.push(GroundingTool::GoogleSearch);
    }
    if request.use_maps {
        tools.push(GroundingTool::GoogleMaps);
    }
    if tools.is_empty() {
        OutputMode::StrictSchema
    } else {
        OutputMode::Grounded(tools)
    }
}

/// Reasoning budget for the selected model, only when thinking is on.
pub fn thinking_budget(request: &StrategyRequest, model: &str) -> Option<u32> {
    if !request.use_thinking {
        return None;
    }
    Some(if model == PRO_MODEL {
        PRO_THINKING_BUDGET
    } else {
        FLASH_THINKING_BUDGET
    })
}

pub fn build_config(request: &StrategyRequest, model: &str) -> GenerationConfig {
    let output = resolve_output_mode(request);
    let location = match &output {
        OutputMode::Grounded(tools) if tools.contains(&GroundingTool::GoogleMaps) => {
            request.location
        }
        _ => None,
    };
    GenerationConfig {
        system_instruction: SYSTEM_INSTRUCTION,
        output,
        location,
        thinking_budget: thinking_budget(request, model),
    }
}

impl GenerationConfig {
    pub fn is_strict(&self) -> bool {
        self.output == OutputMode::StrictSchema
    }

    pub fn tools(&self) -> &[GroundingTool] {
        match &self.output {
            OutputMode::StrictSchema => &[],
            OutputMode::Grounded(tools) => tools.as_slice(),
        }
    }

    /// `toolConfig` payload pinning maps grounding to the user's location.
    pub fn tool_config(&self) -> Option<Value> {
        self.location.map(|loc| {
            json!({
                "retrievalConfig": {
                    "latLng": { "latitude": loc.lat, "longitude": loc.lng }
                }
            })
        })
    }

    pub fn tools_wire(&self) -> Option<Value> {
        let tools = self.tools();
        if tools.is_empty() {
            None
        } else {
            Some(Value::Array(tools.iter().map(|t| t.to_wire()).collect()))
        }
    }

    /// Render the configuration object the way the backend contract names
    /// its keys. Optional keys are omitted, never set to null.
    pub fn to_wire(&self) -> Value {
        let mut config = Map::new();
        config.insert(
            "systemInstruction".into(),
            Value::String(self.system_instruction.to_string()),
        );
        if self.is_strict() {
            config.insert("responseMimeType".into(), json!("application/json"));
            config.insert("responseSchema".into(), prompts::response_schema());
        }
        if let Some(tools) = self.tools_wire() {
            config.insert("tools".into(), tools);
        }
        if let Some(tool_config) = self.tool_config() {
            config.insert("toolConfig".into(), tool_config);
        }
        if let Some(budget) = self.thinking_budget {
            config.insert("thinkingConfig".into(), json!({ "thinkingBudget": budget }));
        }
        Value::Object(config)
    }
}
