//! Strategy response types.
//!
//! Two layers:
//! - `RawStrategy`: whatever the model sent, every field optional and
//!   decoded leniently (a wrong JSON type counts as "absent").
//! - `StrategyResponse`: the complete record handed to the UI. Only the
//!   normalizer builds one.

use serde::{Deserialize, Serialize};

use super::types::{Mode, Platform, PrimaryGoal};

/// Whether a response came from the model or from fallback synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedLength {
    pub video_seconds: u32,
    pub caption_max_characters: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingStrategy {
    pub recommended_posting_time_local: String,
    pub suggested_frequency_per_week: u32,
    pub cross_posting_tips: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendMetadata {
    pub trend_detected: bool,
    pub trend_name: String,
    pub trend_source: String,
    pub how_to_apply_trend: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompetitorInsights {
    pub cta_strategy: String,
    pub visual_theme: String,
    pub keywords_detected: Vec<String>,
    pub hook_patterns: Vec<String>,
    pub video_style: String,
    pub caption_structure: String,
    pub competitor_hashtags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandGuard {
    pub brand_safe: bool,
    pub violations_detected: Vec<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub overall_tone: String,
    pub vibe_badge: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendHunterIdea {
    pub idea_title: String,
    pub idea_description: String,
    pub why_it_works: String,
    pub suggested_platforms: Vec<Platform>,
}

/// The normalized output contract. Every field is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResponse {
    pub status: ResponseStatus,
    pub platform: Platform,
    pub mode: Mode,
    pub primary_goal: PrimaryGoal,
    /// Social SEO score, 0-100.
    pub virality_score: f64,
    pub hook: String,
    pub title: String,
    pub caption: String,
    pub alt_text: String,
    pub seo_keywords: Vec<String>,
    pub description: String,
    pub hashtags: Vec<String>,
    pub recommended_post_format: String,
    pub recommended_length: RecommendedLength,
    pub posting_strategy: PostingStrategy,
    pub trend_metadata: TrendMetadata,
    pub competitor_insights: CompetitorInsights,
    pub brand_guard: BrandGuard,
    pub sentiment_analysis: SentimentAnalysis,
    pub spy_mode_notes: String,
    pub trend_hunter_ideas: Vec<TrendHunterIdea>,
    pub critique: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ── Raw (model-side) layer ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecommendedLength {
    #[serde(default, deserialize_with = "lenient::number")]
    pub video_seconds: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub caption_max_characters: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPostingStrategy {
    #[serde(default, deserialize_with = "lenient::string")]
    pub recommended_posting_time_local: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub suggested_frequency_per_week: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cross_posting_tips: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrendMetadata {
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub trend_detected: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub trend_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub trend_source: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub how_to_apply_trend: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCompetitorInsights {
    #[serde(default, deserialize_with = "lenient::string")]
    pub cta_strategy: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub visual_theme: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub keywords_detected: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub hook_patterns: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub video_style: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub caption_structure: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub competitor_hashtags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBrandGuard {
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub brand_safe: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub violations_detected: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSentimentAnalysis {
    #[serde(default, deserialize_with = "lenient::string")]
    pub overall_tone: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub vibe_badge: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrendHunterIdea {
    #[serde(default, deserialize_with = "lenient::string")]
    pub idea_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub idea_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub why_it_works: Option<String>,
    #[serde(default, deserialize_with = "lenient::platform_list")]
    pub suggested_platforms: Vec<Platform>,
}

/// The parsed, possibly incomplete model answer.
///
/// `platform`, `mode`, `primary_goal` and `status` are deliberately not
/// read: they come from the request and the orchestrator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStrategy {
    #[serde(default, deserialize_with = "lenient::number")]
    pub virality_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub hook: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub caption: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub alt_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub seo_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub hashtags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub recommended_post_format: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub recommended_length: Option<RawRecommendedLength>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub posting_strategy: Option<RawPostingStrategy>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub trend_metadata: Option<RawTrendMetadata>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub competitor_insights: Option<RawCompetitorInsights>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub brand_guard: Option<RawBrandGuard>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub sentiment_analysis: Option<RawSentimentAnalysis>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub spy_mode_notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::object_list")]
    pub trend_hunter_ideas: Vec<RawTrendHunterIdea>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub critique: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: Option<String>,
}

impl RawStrategy {
    /// Decode a JSON object from the model. Never fails: every field is
    /// lenient, so the worst case is an empty raw record.
    pub fn from_json(object: serde_json::Map<String, serde_json::Value>) -> Self {
        serde_json::from_value(serde_json::Value::Object(object)).unwrap_or_else(|e| {
            log::warn!("[NORMALIZE] Raw strategy decode failed, starting empty: {}", e);
            RawStrategy::default()
        })
    }

    /// Re-read a normalized response as raw input (used to re-normalize).
    pub fn from_response(response: &StrategyResponse) -> Self {
        match serde_json::to_value(response) {
            Ok(serde_json::Value::Object(map)) => Self::from_json(map),
            _ => RawStrategy::default(),
        }
    }
}

/// Tolerant field decoders. A value of the wrong JSON type decodes as
/// "absent" instead of failing the whole object.
pub(crate) mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::strategy::types::Platform;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            _ => None,
        })
    }

    pub fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => Some(b),
            _ => None,
        })
    }

    /// Non-arrays become empty; non-string items are dropped.
    pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Unknown platform names are dropped.
    pub fn platform_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Platform>, D::Error> {
        Ok(string_list(d)?
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect())
    }

    pub fn object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            v @ Value::Object(_) => serde_json::from_value(v).ok(),
            _ => None,
        })
    }

    pub fn object_list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Round a model-supplied count into a non-negative integer.
    pub fn count(n: f64) -> u32 {
        if n.is_finite() && n > 0.0 {
            n.round().min(u32::MAX as f64) as u32
        } else {
            0
        }
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

    #[test]
    fn wrong_types_decode_as_absent() {
        let r = raw(json!({
            "hook": 42,
            "hashtags": "#one #two",
            "virality_score": "85",
            "posting_strategy": "whenever",
            "trend_hunter_ideas": {"idea_title": "x"}
        }));
        assert!(r.hook.is_none());
        assert!(r.hashtags.is_empty());
        assert!(r.virality_score.is_none());
        assert!(r.posting_strategy.is_none());
        assert!(r.trend_hunter_ideas.is_empty());
    }

    #[test]
    fn list_items_are_filtered_not_rejected() {
        let r = raw(json!({
            "hashtags": ["#ok", 7, null, "#fine"],
            "trend_hunter_ideas": [
                "junk",
                {"idea_title": "Real idea", "suggested_platforms": ["tiktok", "myspace"]}
            ]
        }));
        assert_eq!(r.hashtags, vec!["#ok", "#fine"]);
        assert_eq!(r.trend_hunter_ideas.len(), 1);
        assert_eq!(
            r.trend_hunter_ideas[0].suggested_platforms,
            vec![Platform::TikTok]
        );
    }

    #[test]
    fn null_object_counts_as_absent() {
        let r = raw(json!({"competitor_insights": null, "brand_guard": {}}));
        assert!(r.competitor_insights.is_none());
        assert!(r.brand_guard.is_some());
    }

    #[test]
    fn count_rounds_and_floors_at_zero() {
        assert_eq!(lenient::count(3.4), 3);
        assert_eq!(lenient::count(6.5), 7);
        assert_eq!(lenient::count(-2.0), 0);
    }
}
