//! Prompt compiler: renders a request into one directive plus the ordered
//! part list sent to the backend.
//!
//! Layout of the directive:
//!   1. JSON-only demand, action, mode
//!   2. Mandatory-field checklist (audit vs generate)
//!   3. Mode block (one builder per mode)
//!   4. Request parameters, hook style, targeting, brand, hashtags, trends
//!   5. JSON-only demand again
//!
//! The repetition is part of the protocol: explicit field lists at the top
//! and the JSON constraint at both ends reduce field omission.

use std::fmt::Write;

use super::backend::Part;
use super::types::{Action, Mode, StrategyRequest};

pub const KEYFRAME_MARKER: &str = "Analyze these video keyframes.";
pub const KEYFRAME_MIME: &str = "image/jpeg";

const TARGETING_OPEN: &str = "=== CRITICAL TARGETING INTELLIGENCE ===";
const TARGETING_CLOSE: &str = "=======================================";

/// Compiled directive and the full part list (directive first).
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPrompt {
    pub directive: String,
    pub parts: Vec<Part>,
}

/// Builds the mode-specific block of the directive.
type ModeFragment = fn(&StrategyRequest) -> String;

/// Context the backend always receives, even when the user typed nothing.
pub fn effective_input(request: &StrategyRequest) -> String {
    if request.context_input.trim().is_empty() {
        format!(
            "Generate a high-performing viral post for the {} niche.",
            request.niche
        )
    } else {
        request.context_input.clone()
    }
}

pub fn compile(request: &StrategyRequest) -> CompiledPrompt {
    let directive = render_directive(request);

    let mut parts = Vec::with_capacity(
        2 + request.media_assets.len() + request.video_frames.len(),
    );
    parts.push(Part::text(directive.clone()));
    for asset in &request.media_assets {
        parts.push(Part::inline(asset.mime_type.clone(), asset.data.clone()));
    }
    if !request.video_frames.is_empty() {
        parts.push(Part::text(KEYFRAME_MARKER));
        for frame in &request.video_frames {
            parts.push(Part::inline(KEYFRAME_MIME, frame.clone()));
        }
    }

    CompiledPrompt { directive, parts }
}

fn render_directive(request: &StrategyRequest) -> String {
    let mut out = String::new();

    out.push_str(
        "STRICT OUTPUT REQUIREMENT: You must respond with valid JSON only. \
         Do not include markdown formatting or conversational text.\n\n",
    );
    let _ = writeln!(out, "ACTION MODE: {}", request.action.as_str().to_uppercase());
    let _ = writeln!(out, "CURRENT MODE: {}", request.mode.as_str().to_uppercase());
    out.push('\n');
    out.push_str(&checklist(request.action));

    out.push_str(&mode_fragment(request.mode)(request));

    let _ = write!(
        out,
        "\nRequest Parameters:\nPlatform: {}\nMode: {}\nNiche: {}\nUser Input: {}\n",
        request.platform,
        request.mode,
        request.niche,
        effective_input(request)
    );

    if let Some(style) = request.hook_style {
        let _ = write!(out, "\nSelected Hook Style: {}", style);
    }

    if let Some(block) = targeting_block(request) {
        out.push_str("\n\n");
        out.push_str(&block);
    }

    if !request.brand_dna.trim().is_empty() {
        let _ = write!(out, "\nBrand Guidelines: {}", request.brand_dna);
    }

    let _ = write!(
        out,
        "\n\nHashtag Strategy: Mix Broad, Niche, and Community tags suitable for {}.",
        request.platform
    );

    if request.wants_search() {
        out.push_str("\n- LIVE TREND INJECTION: Use 'google_search' to find current viral topics.");
    }

    out.push_str(
        "\n\nFINAL INSTRUCTION: RESPONSE MUST BE A SINGLE VALID JSON OBJECT. NO TEXT BEFORE OR AFTER.",
    );
    out
}

fn checklist(action: Action) -> String {
    let mut list = String::from(
        "MANDATORY FIELD CHECKLIST (DO NOT SKIP):\n\
         - [ ] virality_score (0-100)\n\
         - [ ] posting_strategy (MUST include specific 'recommended_posting_time_local')\n\
         - [ ] competitor_insights\n\
         - [ ] alt_text\n\
         - [ ] seo_keywords\n",
    );
    match action {
        Action::Audit => list.push_str("- [ ] critique (Detailed analysis)\n"),
        Action::Generate => list.push_str(
            "- [ ] hook (Strong, psychology-based hook)\n\
             - [ ] caption (Engaging body text)\n",
        ),
    }
    list
}

fn mode_fragment(mode: Mode) -> ModeFragment {
    match mode {
        Mode::TrendHunter => trend_hunter_block,
        Mode::CompetitorSpy => competitor_spy_block,
        Mode::Editor => editor_block,
        Mode::Creator => creator_block,
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn trend_hunter_block(request: &StrategyRequest) -> String {
    let keywords = or_default(
        &request.context_input,
        or_default(&request.niche, "Trending News"),
    );
    let geo = or_default(&request.geo_focus, "Global");
    let audience = or_default(&request.target_audience, "General");
    let search_geo = request.geo_focus.trim();

    format!(
        "- [ ] trend_hunter_ideas (MUST populate this array with 3-5 items)\n\
         \n\
         *** TREND HUNTER MODE ACTIVE ***\n\
         - INPUT KEYWORDS: \"{keywords}\"\n\
         - NICHE: \"{niche}\"\n\
         - TARGETING: Location: {geo}, Audience: {audience}\n\
         \n\
         - CORE TASK: Act as a Viral News Aggregator. Use 'google_search' to find BREAKING NEWS and HOT TOPICS right now (Current Date).\n\
         - SEARCH STRATEGY: Search for \"Latest trending news {niche} {keywords} {search_geo}\".\n\
         - OUTPUT MAPPING:\n\
         \x20 - 'idea_title' -> The Specific News Topic (e.g. \"Release of New AI Model\")\n\
         \x20 - 'idea_description' -> The Context (What happened?)\n\
         \x20 - 'why_it_works' -> Virality Factor (Why people care)\n",
        niche = request.niche,
    )
}

fn competitor_spy_block(_request: &StrategyRequest) -> String {
    "\n*** COMPETITOR SPY MODE ACTIVE ***\n\
     - CORE TASK: Analyze inputs as COMPETITOR DATA.\n\
     - REQUIRED INSIGHTS (Populate 'competitor_insights' object fully):\n\
     \x20 - 'cta_strategy', 'visual_theme', 'keywords_detected', 'hook_patterns', 'video_style', 'caption_structure', 'competitor_hashtags'\n"
        .to_string()
}

fn editor_block(_request: &StrategyRequest) -> String {
    "\n*** EDITOR MODE ACTIVE ***\n\
     - CORE TASK: Refine the user's draft.\n\
     - FIELD 'critique': Explain improvements.\n\
     - FIELD 'hook': Generate a stronger version.\n\
     - FIELD 'caption': Rewrite for maximum engagement.\n"
        .to_string()
}

fn creator_block(_request: &StrategyRequest) -> String {
    "\n*** CREATOR MODE ACTIVE ***\n\
     - CORE TASK: Generate new creative content from scratch.\n\
     - FIELD 'hook': Generate a scroll-stopping hook.\n\
     - FIELD 'caption': Write a full engaging caption.\n"
        .to_string()
}

/// Targeting section, only when at least one targeting field is set.
fn targeting_block(request: &StrategyRequest) -> Option<String> {
    let lines: Vec<String> = [
        ("Target Audience", &request.target_audience),
        ("Demographics", &request.demographics),
        ("Geographic Focus", &request.geo_focus),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(label, value)| format!("- {label}: {value}"))
    .collect();

    if lines.is_empty() {
        return None;
    }
    Some(format!(
        "{TARGETING_OPEN}\n{}\n{TARGETING_CLOSE}\n",
        lines.join("\n")
    ))
}
