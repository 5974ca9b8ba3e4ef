//! Strategy domain: request shaping and response normalization for Gemini.
//!
//! Public API of the core. External code should only use what is
//! exported here.
//!
//! Pipeline:
//!   - selector.rs: model + output mode + generation config
//!   - compiler.rs: directive text and ordered parts
//!   - extract.rs: JSON recovery from raw model text
//!   - normalize.rs: complete, UI-safe response
//!   - orchestrator.rs: ties the above together, fallback on failure

pub mod backend;
pub mod compiler;
pub mod defaults;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod normalize;
pub mod orchestrator;
pub mod prompts;
pub mod response;
pub mod selector;
pub mod types;

pub use backend::{Backend, GenerationRequest, InlineData, Part};
pub use error::{BackendError, StrategyError};
pub use normalize::normalize;
pub use orchestrator::StrategyOrchestrator;
pub use response::{RawStrategy, ResponseStatus, StrategyResponse};
pub use selector::{GenerationConfig, GroundingTool, OutputMode};
pub use types::{
    Action, HookStyle, Location, MediaAsset, Mode, Platform, PrimaryGoal, StrategyRequest,
};
