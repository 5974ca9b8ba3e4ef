//! Platform defaults and the synthetic fallback answer.

use super::response::{
    CompetitorInsights, PostingStrategy, RawBrandGuard, RawCompetitorInsights,
    RawPostingStrategy, RawRecommendedLength, RawSentimentAnalysis, RawStrategy,
    RawTrendMetadata,
};
use super::types::{Platform, StrategyRequest};

/// Safety-net values for one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDefaults {
    pub posting_strategy: PostingStrategy,
    pub competitor_insights: CompetitorInsights,
}

fn posting(time: &str, per_week: u32, tip: &str) -> PostingStrategy {
    PostingStrategy {
        recommended_posting_time_local: time.to_string(),
        suggested_frequency_per_week: per_week,
        cross_posting_tips: tip.to_string(),
    }
}

/// Generic posting strategy, used when no platform override applies.
pub fn generic_posting_strategy() -> PostingStrategy {
    posting(
        "9:00 AM - 11:00 AM",
        3,
        "Adapt caption length and remove watermarks.",
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Shared competitor-insight default. No platform overrides it.
pub fn default_competitor_insights() -> CompetitorInsights {
    CompetitorInsights {
        cta_strategy: "Direct value-add with save-for-later hook.".into(),
        visual_theme: "High contrast text overlays with quick pacing.".into(),
        keywords_detected: strings(&["Growth", "Strategy", "Tips"]),
        hook_patterns: strings(&["Curiosity Loop", "Negative Hook"]),
        video_style: "Fast-paced, talking head with B-roll".into(),
        caption_structure: "Hook - Value - CTA".into(),
        competitor_hashtags: strings(&["#fyp", "#trending"]),
    }
}

pub fn posting_strategy_for(platform: Platform) -> PostingStrategy {
    match platform {
        Platform::LinkedIn => posting(
            "Tue-Thu, 8:00 AM - 10:00 AM",
            3,
            "Expand into a longer article or carousel PDF.",
        ),
        Platform::Instagram => posting(
            "Daily, 11:00 AM or 7:00 PM",
            5,
            "Share to Story with a poll sticker for engagement.",
        ),
        Platform::TikTok => posting(
            "Daily, 6:00 PM - 9:00 PM",
            7,
            "Remove watermark before reposting to Reels/Shorts.",
        ),
        Platform::TwitterX => posting(
            "Weekdays, 9:00 AM & 1:00 PM",
            10,
            "Screenshot tweet for IG Stories/LinkedIn.",
        ),
        Platform::YouTube => posting(
            "Fri-Sat, 3:00 PM - 6:00 PM",
            1,
            "Cut highlights into Shorts linking to full video.",
        ),
        Platform::Facebook => posting(
            "Daily, 1:00 PM - 4:00 PM",
            5,
            "Share to Groups for community reach.",
        ),
    }
}

pub fn platform_defaults(platform: Platform) -> PlatformDefaults {
    PlatformDefaults {
        posting_strategy: posting_strategy_for(platform),
        competitor_insights: default_competitor_insights(),
    }
}

/// Synthetic answer used when the backend call or extraction fails.
///
/// Still goes through the normalizer like a real answer.
pub fn fallback_raw(request: &StrategyRequest, error_message: &str) -> RawStrategy {
    let defaults = platform_defaults(request.platform);
    let strategy = defaults.posting_strategy;
    let insights = defaults.competitor_insights;

    RawStrategy {
        virality_score: Some(0.0),
        hook: Some("Generation unavailable.".into()),
        title: Some("Strategy Snapshot".into()),
        caption: Some("We encountered a connection issue. Please try again.".into()),
        alt_text: Some("Placeholder.".into()),
        seo_keywords: Vec::new(),
        description: Some("Generation failed.".into()),
        hashtags: vec![format!("#{}", request.platform), "#SocialStrategy".into()],
        recommended_post_format: Some("Standard Post".into()),
        recommended_length: Some(RawRecommendedLength {
            video_seconds: Some(0.0),
            caption_max_characters: Some(0.0),
        }),
        posting_strategy: Some(RawPostingStrategy {
            recommended_posting_time_local: Some(strategy.recommended_posting_time_local),
            suggested_frequency_per_week: Some(f64::from(strategy.suggested_frequency_per_week)),
            cross_posting_tips: Some(strategy.cross_posting_tips),
        }),
        trend_metadata: Some(RawTrendMetadata {
            trend_detected: Some(false),
            ..Default::default()
        }),
        competitor_insights: Some(RawCompetitorInsights {
            cta_strategy: Some(insights.cta_strategy),
            visual_theme: Some(insights.visual_theme),
            keywords_detected: insights.keywords_detected,
            hook_patterns: insights.hook_patterns,
            video_style: Some(insights.video_style),
            caption_structure: Some(insights.caption_structure),
            competitor_hashtags: insights.competitor_hashtags,
        }),
        brand_guard: Some(RawBrandGuard {
            brand_safe: Some(true),
            violations_detected: Vec::new(),
            notes: Some("Fallback mode active.".into()),
        }),
        sentiment_analysis: Some(RawSentimentAnalysis {
            overall_tone: Some("Neutral".into()),
            vibe_badge: Some("System Alert".into()),
        }),
        spy_mode_notes: None,
        trend_hunter_ideas: Vec::new(),
        critique: Some("Analysis failed.".into()),
        notes: Some(format!("Error Details: {}", error_message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_platform_has_a_distinct_schedule() {
        let times: std::collections::HashSet<String> = Platform::ALL
            .iter()
            .map(|p| posting_strategy_for(*p).recommended_posting_time_local)
            .collect();
        assert_eq!(times.len(), Platform::ALL.len());
        assert!(!times.contains(&generic_posting_strategy().recommended_posting_time_local));
    }

    #[test]
    fn competitor_default_is_shared() {
        assert_eq!(
            platform_defaults(Platform::YouTube).competitor_insights,
            platform_defaults(Platform::LinkedIn).competitor_insights
        );
    }

    #[test]
    fn twitter_posts_most_often() {
        let twitter = posting_strategy_for(Platform::TwitterX);
        assert_eq!(twitter.suggested_frequency_per_week, 10);
        assert_eq!(twitter.recommended_posting_time_local, "Weekdays, 9:00 AM & 1:00 PM");
    }
}
