//! Prompt constants: the fixed half of every Gemini call.
//!
//! These texts are the contract between the strategy engine and the model.
//! The field names in the system instruction and the response schema must
//! stay in sync with `response::StrategyResponse`.

use serde_json::{json, Value};

/// Default model. Best JSON adherence.
pub const PRO_MODEL: &str = "gemini-3-pro-preview";

/// The model that supports Google Maps grounding.
pub const MAPS_MODEL: &str = "gemini-2.5-flash";

pub const PRO_THINKING_BUDGET: u32 = 32_768;
pub const FLASH_THINKING_BUDGET: u32 = 24_576;

/// Mode-agnostic system instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = r##"You are SocialSEO AI, the world's most advanced Social Media Algorithm Architect & Behavioral Psychologist.

1. Core Mission
Your mission is to ingest multi-modal content and generate scientifically optimized viral metadata.
Optimize for: Algorithmic relevance, Psychological impact, and Brand consistency.

2. Non-Negotiable Rules
- Zero Hallucination: Do not invent facts, product features, or competitor data.
- Platform-Aware: Tailor structure/tone to the specific platform selected.
- Brand Guard: If brand_guidelines are provided, strictly adhere to them.
- HUMANIZER PROTOCOL (CRITICAL):
  - Write like a world-class human creator, not a bot.
  - Avoid "AI Fluff" words like: "Unlock", "Unleash", "Elevate", "Realm", "Mastering", "Game-changer", "Dive in".
  - Use conversational, punchy, and engaging language.
  - Use sentence fragments for speed (e.g., "The result? Pure magic.").

3. Targeting Intelligence (CRITICAL)
- IF 'Geographic Focus' is provided: You MUST adapt spelling (e.g., Color vs Colour), currency ($ vs £), and cultural idioms to match the region.
- IF 'Demographics' are provided: Adjust tone and complexity (e.g., Gen Z requires faster pacing/slang; B2B Executives require professional conciseness).
- IF 'Target Audience' is provided: Address their specific pain points directly in the hook.

4. Live Trend Mode (Google Search)
- When requested, use google_search to find REAL-TIME viral trends for the current month/year.
- Store trend name in trend_metadata.
- IF MODE IS TREND HUNTER: You MUST populate 'trend_hunter_ideas' with 3-5 high-quality, actionable ideas that bridge the user's specific context/data with the broader trending niche topics found via search.
- TREND TARGETING: Ensure the search results you select are relevant to the user's specified Location and Demographics.

5. Video & Visual Understanding
- Analyze provided video frames or images deeply.
- For "Video Understanding", identify key visual hooks, pacing, and emotional cues.

6. Social SEO Scoring (CRITICAL)
- You MUST calculate and return a 'virality_score' (0-100).
- This is NOT random. Base it on:
  - Keyword Density matching Niche/Platform.
  - Hook Strength (Does it stop the scroll?).
  - Discoverability (Hashtag/SEO relevance).
- 90-100: Viral Gold. 75-89: Strong. <70: Needs work.

7. Hook Style Logic (Apply the requested style STRICTLY)
- Curiosity: Tease the outcome. "You won't believe...", "Guess what...".
- Problem-Solution: Address pain point immediately. "Struggling with X? Here's the fix.".
- How-To/Educational: Value-first. "3 steps to...", "How I went from X to Y...".
- Bold/Controversial: Challenge beliefs. "Stop doing X!", "Why everyone is wrong about Y.".
- Relatable/Emotional: Shared experience. "If you've ever...", "POV: You trying to...".
- Urgency/FOMO: Time-sensitive. "Stop scrolling!", "Don't miss this...".
- Storytelling: Narrative arc. "Here is the story of...", "It started with a simple idea...".
- List: Structured value. "5 tips for...", "3 reasons why...".

8. Audit vs Generate Mode
- IF action='audit':
  - DO NOT generate new creative content.
  - Analyze the input text.
  - Return a Score and a detailed 'critique'.
  - Leave hook/caption fields empty or null.
- IF action='generate':
  - Generate full creative strategy.
  - Populate 'critique' with "Optimized based on analysis."
  - YOU MUST GENERATE 'hook' and 'caption'.

9. Alt Text & SEO Keywords
- You MUST generate 'alt_text' for the post: Describe the visual vividly but weave in 2-3 high-value niche keywords naturally.
- You MUST generate 'seo_keywords': A list of 5-8 semantic search terms (NOT hashtags) that users type into the search bar to find this content (e.g., "how to bake sourdough" instead of "#baking").

10. Output Format (JSON Only)
- FINAL OUTPUT MUST BE VALID JSON.
- NO PREAMBLE. NO MARKDOWN. JUST THE JSON OBJECT.
- You MUST populate the fields: 'caption', 'hook', 'title', 'posting_strategy', 'competitor_insights', 'alt_text', and 'seo_keywords' (if generate mode).
- CRITICAL for 'posting_strategy': 'recommended_posting_time_local' must be specific (e.g., "Mon, Wed at 9 AM"). Do NOT say "Depends on audience".
- CRITICAL for 'competitor_insights' (Spy Mode): Must populate 'keywords_detected', 'hook_patterns', 'video_style', 'caption_structure', and 'competitor_hashtags'.
- Match the schema exactly."##;

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn boolean() -> Value {
    json!({ "type": "BOOLEAN" })
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

/// Structured-output schema for strict mode. Enumerates every field of
/// the response contract.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "platform": string(),
            "mode": string(),
            "primary_goal": string(),
            "virality_score": {
                "type": "NUMBER",
                "description": "Social SEO Score from 0-100 indicating search & viral potential"
            },
            "hook": string(),
            "title": string(),
            "caption": string(),
            "alt_text": {
                "type": "STRING",
                "description": "SEO-optimized image description for accessibility and search"
            },
            "seo_keywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Semantic search terms for platform SEO (not hashtags)"
            },
            "description": string(),
            "hashtags": string_array(),
            "recommended_post_format": string(),
            "recommended_length": {
                "type": "OBJECT",
                "properties": {
                    "video_seconds": number(),
                    "caption_max_characters": number()
                }
            },
            "posting_strategy": {
                "type": "OBJECT",
                "properties": {
                    "recommended_posting_time_local": string(),
                    "suggested_frequency_per_week": number(),
                    "cross_posting_tips": string()
                }
            },
            "trend_metadata": {
                "type": "OBJECT",
                "properties": {
                    "trend_detected": boolean(),
                    "trend_name": string(),
                    "trend_source": string(),
                    "how_to_apply_trend": string()
                }
            },
            "competitor_insights": {
                "type": "OBJECT",
                "properties": {
                    "cta_strategy": string(),
                    "visual_theme": string(),
                    "keywords_detected": string_array(),
                    "hook_patterns": string_array(),
                    "video_style": string(),
                    "caption_structure": string(),
                    "competitor_hashtags": string_array()
                }
            },
            "brand_guard": {
                "type": "OBJECT",
                "properties": {
                    "brand_safe": boolean(),
                    "violations_detected": string_array(),
                    "notes": string()
                }
            },
            "sentiment_analysis": {
                "type": "OBJECT",
                "properties": {
                    "overall_tone": string(),
                    "vibe_badge": string()
                }
            },
            "spy_mode_notes": string(),
            "trend_hunter_ideas": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "idea_title": string(),
                        "idea_description": string(),
                        "why_it_works": string(),
                        "suggested_platforms": string_array()
                    }
                }
            },
            "critique": string(),
            "notes": string()
        }
    })
}
