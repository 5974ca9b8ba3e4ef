//! Response normalizer: turns a partial model answer into a complete
//! `StrategyResponse`.
//!
//! Never fails. Gaps are repaired silently and logged at debug level.
//! Running the output back through `normalize` yields the same record.

use super::defaults;
use super::response::{
    lenient, BrandGuard, CompetitorInsights, PostingStrategy, RawCompetitorInsights,
    RawPostingStrategy, RawStrategy, RawTrendHunterIdea, RecommendedLength, ResponseStatus,
    SentimentAnalysis, StrategyResponse, TrendHunterIdea, TrendMetadata,
};
use super::types::{Mode, Platform, StrategyRequest};

pub const HOOK_PLACEHOLDER: &str = "Hook generation unavailable. Please refine input context.";
pub const CAPTION_PLACEHOLDER: &str =
    "Caption generation unavailable. Please refine input context.";

/// Hooks and captions shorter than this are treated as missing.
const MIN_CREATIVE_CHARS: usize = 5;

const MAX_VIRALITY: f64 = 100.0;

pub fn normalize(
    raw: RawStrategy,
    request: &StrategyRequest,
    status: ResponseStatus,
) -> StrategyResponse {
    let mut trend_metadata = trend_metadata_of(&raw);
    let mut ideas: Vec<TrendHunterIdea> = raw.trend_hunter_ideas.into_iter().map(idea).collect();

    if request.mode == Mode::TrendHunter && ideas.is_empty() {
        log::debug!(
            "[NORMALIZE] No trend ideas returned, synthesizing from niche '{}'",
            request.niche
        );
        ideas = synthetic_ideas(&request.niche);
        trend_metadata.trend_detected = true;
        trend_metadata.trend_name = "Niche High Activity".to_string();
    }

    let (hook, caption) = if request.mode.produces_creative() {
        (
            creative_or(raw.hook, HOOK_PLACEHOLDER, "hook"),
            creative_or(raw.caption, CAPTION_PLACEHOLDER, "caption"),
        )
    } else {
        (raw.hook.unwrap_or_default(), raw.caption.unwrap_or_default())
    };

    let virality_score = match raw.virality_score {
        Some(score) if score.is_finite() => score.clamp(0.0, MAX_VIRALITY),
        _ => {
            log::debug!("[NORMALIZE] virality_score missing or non-numeric, using 0");
            0.0
        }
    };

    let posting_strategy = merge_posting_strategy(raw.posting_strategy, request.platform);
    let competitor_insights = match raw.competitor_insights {
        Some(partial) => competitor_insights(partial),
        None => {
            log::debug!("[NORMALIZE] competitor_insights absent, using platform default");
            defaults::platform_defaults(request.platform).competitor_insights
        }
    };

    let recommended_length = raw.recommended_length.unwrap_or_default();
    let brand_guard = raw.brand_guard.unwrap_or_default();
    let sentiment = raw.sentiment_analysis.unwrap_or_default();

    StrategyResponse {
        status,
        platform: request.platform,
        mode: request.mode,
        primary_goal: request.goal,
        virality_score,
        hook,
        title: raw.title.unwrap_or_default(),
        caption,
        alt_text: raw.alt_text.unwrap_or_default(),
        seo_keywords: raw.seo_keywords,
        description: raw.description.unwrap_or_default(),
        hashtags: raw.hashtags,
        recommended_post_format: raw.recommended_post_format.unwrap_or_default(),
        recommended_length: RecommendedLength {
            video_seconds: recommended_length.video_seconds.map_or(0, lenient::count),
            caption_max_characters: recommended_length
                .caption_max_characters
                .map_or(0, lenient::count),
        },
        posting_strategy,
        trend_metadata,
        competitor_insights,
        brand_guard: BrandGuard {
            brand_safe: brand_guard.brand_safe.unwrap_or(true),
            violations_detected: brand_guard.violations_detected,
            notes: brand_guard.notes.unwrap_or_default(),
        },
        sentiment_analysis: SentimentAnalysis {
            overall_tone: sentiment.overall_tone.unwrap_or_default(),
            vibe_badge: sentiment.vibe_badge.unwrap_or_default(),
        },
        spy_mode_notes: raw.spy_mode_notes.unwrap_or_default(),
        trend_hunter_ideas: ideas,
        critique: raw.critique.unwrap_or_default(),
        notes: raw.notes,
    }
}

fn creative_or(value: Option<String>, placeholder: &str, field: &str) -> String {
    match value {
        Some(text) if text.chars().count() >= MIN_CREATIVE_CHARS => text,
        _ => {
            log::debug!("[NORMALIZE] {} missing or too short, using placeholder", field);
            placeholder.to_string()
        }
    }
}

fn trend_metadata_of(raw: &RawStrategy) -> TrendMetadata {
    let Some(meta) = raw.trend_metadata.clone() else {
        return TrendMetadata::default();
    };
    TrendMetadata {
        trend_detected: meta.trend_detected.unwrap_or(false),
        trend_name: meta.trend_name.unwrap_or_default(),
        trend_source: meta.trend_source.unwrap_or_default(),
        how_to_apply_trend: meta.how_to_apply_trend.unwrap_or_default(),
    }
}

fn idea(raw: RawTrendHunterIdea) -> TrendHunterIdea {
    TrendHunterIdea {
        idea_title: raw.idea_title.unwrap_or_default(),
        idea_description: raw.idea_description.unwrap_or_default(),
        why_it_works: raw.why_it_works.unwrap_or_default(),
        suggested_platforms: raw.suggested_platforms,
    }
}

fn synthetic_ideas(niche: &str) -> Vec<TrendHunterIdea> {
    vec![
        TrendHunterIdea {
            idea_title: format!("Trending News in {}", niche),
            idea_description: format!(
                "Search results indicate high interest in {}. Capitalize on this by sharing your unique perspective on recent industry shifts.",
                niche
            ),
            why_it_works: "Newsjacking leverages existing search traffic.".to_string(),
            suggested_platforms: vec![Platform::TwitterX, Platform::LinkedIn],
        },
        TrendHunterIdea {
            idea_title: "Community Debate Topic".to_string(),
            idea_description:
                "Start a conversation about a common controversial opinion in your niche."
                    .to_string(),
            why_it_works: "Engagement bait drives algorithmic reach.".to_string(),
            suggested_platforms: vec![Platform::Instagram, Platform::TikTok],
        },
    ]
}

/// Platform default underneath, model fields on top. Blank model strings
/// keep the default.
fn merge_posting_strategy(
    partial: Option<RawPostingStrategy>,
    platform: Platform,
) -> PostingStrategy {
    let base = defaults::posting_strategy_for(platform);
    let Some(partial) = partial else {
        log::debug!("[NORMALIZE] posting_strategy absent, using {} default", platform);
        return base;
    };
    PostingStrategy {
        recommended_posting_time_local: non_blank(partial.recommended_posting_time_local)
            .unwrap_or(base.recommended_posting_time_local),
        suggested_frequency_per_week: partial
            .suggested_frequency_per_week
            .map_or(base.suggested_frequency_per_week, lenient::count),
        cross_posting_tips: non_blank(partial.cross_posting_tips)
            .unwrap_or(base.cross_posting_tips),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn competitor_insights(partial: RawCompetitorInsights) -> CompetitorInsights {
    CompetitorInsights {
        cta_strategy: partial.cta_strategy.unwrap_or_default(),
        visual_theme: partial.visual_theme.unwrap_or_default(),
        keywords_detected: partial.keywords_detected,
        hook_patterns: partial.hook_patterns,
        video_style: partial.video_style.unwrap_or_default(),
        caption_structure: partial.caption_structure.unwrap_or_default(),
        competitor_hashtags: partial.competitor_hashtags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawStrategy {
        match value {
            serde_json::Value::Object(map) => RawStrategy::from_json(map),
            other => panic!("not an object: {other}"),
        }
    }

    fn renormalize(response: &StrategyResponse, request: &StrategyRequest) -> StrategyResponse {
        normalize(RawStrategy::from_response(response), request, response.status)
    }

    #[test]
    fn trend_hunter_without_ideas_gets_two_synthetic_ones() {
        let request = StrategyRequest::new(Platform::TikTok, Mode::TrendHunter, "Sustainable Fashion");
        let out = normalize(raw(json!({})), &request, ResponseStatus::Generated);

        assert_eq!(out.trend_hunter_ideas.len(), 2);
        assert_eq!(
            out.trend_hunter_ideas[0].idea_title,
            "Trending News in Sustainable Fashion"
        );
        assert!(out.trend_hunter_ideas[0]
            .idea_description
            .contains("high interest in Sustainable Fashion"));
        assert_eq!(
            out.trend_hunter_ideas[0].suggested_platforms,
            vec![Platform::TwitterX, Platform::LinkedIn]
        );
        assert_eq!(out.trend_hunter_ideas[1].idea_title, "Community Debate Topic");
        assert_eq!(
            out.trend_hunter_ideas[1].suggested_platforms,
            vec![Platform::Instagram, Platform::TikTok]
        );
        assert!(out.trend_metadata.trend_detected);
        assert_eq!(out.trend_metadata.trend_name, "Niche High Activity");
        // Trend hunting is not a creative mode: no placeholders.
        assert_eq!(out.hook, "");
        assert_eq!(out.caption, "");
    }

    #[test]
    fn trend_hunter_keeps_model_ideas() {
        let request = StrategyRequest::new(Platform::LinkedIn, Mode::TrendHunter, "Fintech");
        let out = normalize(
            raw(json!({
                "trend_hunter_ideas": [{
                    "idea_title": "Open banking explainer",
                    "idea_description": "Break down the new rules.",
                    "why_it_works": "Timely.",
                    "suggested_platforms": ["linkedin"]
                }],
                "trend_metadata": {"trend_detected": false}
            })),
            &request,
            ResponseStatus::Generated,
        );
        assert_eq!(out.trend_hunter_ideas.len(), 1);
        assert_eq!(out.trend_hunter_ideas[0].idea_title, "Open banking explainer");
        assert!(!out.trend_metadata.trend_detected);
    }

    #[test]
    fn short_hook_and_missing_caption_get_placeholders() {
        let request = StrategyRequest::new(Platform::Instagram, Mode::Creator, "Coffee");
        let out = normalize(raw(json!({"hook": "Hi"})), &request, ResponseStatus::Generated);

        assert_eq!(out.hook, HOOK_PLACEHOLDER);
        assert_eq!(out.caption, CAPTION_PLACEHOLDER);
        assert_eq!(out.virality_score, 0.0);
        assert_eq!(
            out.posting_strategy,
            defaults::posting_strategy_for(Platform::Instagram)
        );
        assert_eq!(out.competitor_insights, defaults::default_competitor_insights());
        assert!(out.brand_guard.brand_safe);
        assert_eq!(out.platform, Platform::Instagram);
        assert_eq!(out.mode, Mode::Creator);
        assert!(out.notes.is_none());
    }

    #[test]
    fn creative_length_counts_characters_not_bytes() {
        let request = StrategyRequest::new(Platform::Instagram, Mode::Editor, "Cafe");
        // 4 characters, 8 bytes.
        let out = normalize(
            raw(json!({"hook": "éééé", "caption": "ünïcödé caption"})),
            &request,
            ResponseStatus::Generated,
        );
        assert_eq!(out.hook, HOOK_PLACEHOLDER);
        assert_eq!(out.caption, "ünïcödé caption");
    }

    #[test]
    fn competitor_spy_leaves_short_hook_alone() {
        let request = StrategyRequest::new(Platform::YouTube, Mode::CompetitorSpy, "Gaming");
        let out = normalize(raw(json!({"hook": "Hi"})), &request, ResponseStatus::Generated);
        assert_eq!(out.hook, "Hi");
    }

    #[test]
    fn virality_score_is_clamped() {
        let request = StrategyRequest::new(Platform::TikTok, Mode::Creator, "Pets");
        let high = normalize(raw(json!({"virality_score": 140})), &request, ResponseStatus::Generated);
        let low = normalize(raw(json!({"virality_score": -3.5})), &request, ResponseStatus::Generated);
        let text = normalize(raw(json!({"virality_score": "85"})), &request, ResponseStatus::Generated);
        assert_eq!(high.virality_score, 100.0);
        assert_eq!(low.virality_score, 0.0);
        assert_eq!(text.virality_score, 0.0);
    }

    #[test]
    fn posting_strategy_merges_over_platform_default() {
        let request = StrategyRequest::new(Platform::LinkedIn, Mode::Creator, "SaaS");
        let out = normalize(
            raw(json!({
                "posting_strategy": {
                    "recommended_posting_time_local": "Wed, 7:30 AM",
                    "cross_posting_tips": "   "
                }
            })),
            &request,
            ResponseStatus::Generated,
        );
        let base = defaults::posting_strategy_for(Platform::LinkedIn);
        assert_eq!(out.posting_strategy.recommended_posting_time_local, "Wed, 7:30 AM");
        assert_eq!(
            out.posting_strategy.suggested_frequency_per_week,
            base.suggested_frequency_per_week
        );
        assert_eq!(out.posting_strategy.cross_posting_tips, base.cross_posting_tips);
    }

    #[test]
    fn partial_competitor_insights_are_not_backfilled() {
        let request = StrategyRequest::new(Platform::TikTok, Mode::CompetitorSpy, "Fitness");
        let out = normalize(
            raw(json!({"competitor_insights": {"cta_strategy": "Comment 'PLAN' for the PDF"}})),
            &request,
            ResponseStatus::Generated,
        );
        assert_eq!(out.competitor_insights.cta_strategy, "Comment 'PLAN' for the PDF");
        assert_eq!(out.competitor_insights.visual_theme, "");
        assert!(out.competitor_insights.competitor_hashtags.is_empty());
    }

    #[test]
    fn platform_and_mode_come_from_request() {
        let request = StrategyRequest::new(Platform::Facebook, Mode::Editor, "Bakery");
        let out = normalize(
            raw(json!({"platform": "tiktok", "mode": "creator", "primary_goal": "followers"})),
            &request,
            ResponseStatus::Generated,
        );
        assert_eq!(out.platform, Platform::Facebook);
        assert_eq!(out.mode, Mode::Editor);
        assert_eq!(out.primary_goal, request.goal);
    }

    #[test]
    fn normalization_is_idempotent() {
        let cases = [
            (
                StrategyRequest::new(Platform::Instagram, Mode::Creator, "Coffee"),
                json!({"hook": "Hi", "virality_score": 250, "posting_strategy": {"suggested_frequency_per_week": 2.6}}),
            ),
            (
                StrategyRequest::new(Platform::TikTok, Mode::TrendHunter, "Sustainable Fashion"),
                json!({"hashtags": "#nope"}),
            ),
            (
                StrategyRequest::new(Platform::YouTube, Mode::CompetitorSpy, "Gaming"),
                json!({"competitor_insights": {"hook_patterns": ["Cold open"]}, "notes": "n"}),
            ),
        ];
        for (request, value) in cases {
            let once = normalize(raw(value), &request, ResponseStatus::Generated);
            assert_eq!(renormalize(&once, &request), once);
        }
    }

    #[test]
    fn fallback_record_is_stable_under_normalization() {
        let request = StrategyRequest::new(Platform::Instagram, Mode::Creator, "Coffee");
        let once = normalize(
            defaults::fallback_raw(&request, "boom"),
            &request,
            ResponseStatus::Fallback,
        );
        assert_eq!(once.status, ResponseStatus::Fallback);
        assert_eq!(once.hook, "Generation unavailable.");
        assert_eq!(once.hashtags, vec!["#instagram", "#SocialStrategy"]);
        assert_eq!(once.notes.as_deref(), Some("Error Details: boom"));
        assert_eq!(renormalize(&once, &request), once);
    }
}
