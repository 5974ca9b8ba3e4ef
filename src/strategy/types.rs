//! Request model: one strategy submission from the front-end.
//!
//! Pure data. The wire names (camelCase, `brandDNA`) match the JSON the UI
//! layer sends, so a request can be deserialized straight from a file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target social platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "instagram")]
    Instagram,
    #[serde(rename = "tiktok")]
    TikTok,
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "linkedin")]
    LinkedIn,
    #[serde(rename = "twitter_x")]
    TwitterX,
    #[serde(rename = "facebook")]
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Instagram,
        Platform::TikTok,
        Platform::YouTube,
        Platform::LinkedIn,
        Platform::TwitterX,
        Platform::Facebook,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::YouTube => "youtube",
            Platform::LinkedIn => "linkedin",
            Platform::TwitterX => "twitter_x",
            Platform::Facebook => "facebook",
        }
    }
}

/// Task framing. Selects both the prompt block and the normalization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Creator,
    Editor,
    CompetitorSpy,
    TrendHunter,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Creator,
        Mode::Editor,
        Mode::CompetitorSpy,
        Mode::TrendHunter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Creator => "creator",
            Mode::Editor => "editor",
            Mode::CompetitorSpy => "competitor_spy",
            Mode::TrendHunter => "trend_hunter",
        }
    }

    /// Modes whose output must carry a usable hook and caption.
    pub fn produces_creative(self) -> bool {
        matches!(self, Mode::Creator | Mode::Editor)
    }
}

/// Primary goal of the post. Advisory only; echoed into the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    Views,
    Saves,
    Shares,
    Comments,
    ProfileVisits,
    LinkClicks,
    Followers,
}

impl PrimaryGoal {
    pub const ALL: [PrimaryGoal; 7] = [
        PrimaryGoal::Views,
        PrimaryGoal::Saves,
        PrimaryGoal::Shares,
        PrimaryGoal::Comments,
        PrimaryGoal::ProfileVisits,
        PrimaryGoal::LinkClicks,
        PrimaryGoal::Followers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrimaryGoal::Views => "views",
            PrimaryGoal::Saves => "saves",
            PrimaryGoal::Shares => "shares",
            PrimaryGoal::Comments => "comments",
            PrimaryGoal::ProfileVisits => "profile_visits",
            PrimaryGoal::LinkClicks => "link_clicks",
            PrimaryGoal::Followers => "followers",
        }
    }
}

/// Requested hook style. Only ever rendered into the prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStyle {
    Curiosity,
    ProblemSolution,
    HowToEducational,
    BoldControversial,
    RelatableEmotional,
    UrgencyFomo,
    Storytelling,
    List,
}

impl HookStyle {
    pub const ALL: [HookStyle; 8] = [
        HookStyle::Curiosity,
        HookStyle::ProblemSolution,
        HookStyle::HowToEducational,
        HookStyle::BoldControversial,
        HookStyle::RelatableEmotional,
        HookStyle::UrgencyFomo,
        HookStyle::Storytelling,
        HookStyle::List,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HookStyle::Curiosity => "curiosity",
            HookStyle::ProblemSolution => "problem_solution",
            HookStyle::HowToEducational => "how_to_educational",
            HookStyle::BoldControversial => "bold_controversial",
            HookStyle::RelatableEmotional => "relatable_emotional",
            HookStyle::UrgencyFomo => "urgency_fomo",
            HookStyle::Storytelling => "storytelling",
            HookStyle::List => "list",
        }
    }
}

/// Generate new creative content, or only critique what the user supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Audit,
    #[default]
    Generate,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Audit, Action::Generate];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Audit => "audit",
            Action::Generate => "generate",
        }
    }

    /// Caller-side routing for a first submission.
    ///
    /// Only an Editor draft with real content gets audited; every other
    /// mode always generates. A refine re-submission skips this and uses
    /// `Generate` directly.
    pub fn route(mode: Mode, context_input: &str) -> Action {
        if mode == Mode::Editor && context_input.trim().chars().count() > 10 {
            Action::Audit
        } else {
            Action::Generate
        }
    }
}

macro_rules! impl_wire_name {
    ($($ty:ident => $label:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    let wanted = s.trim().to_lowercase().replace('-', "_");
                    $ty::ALL
                        .iter()
                        .copied()
                        .find(|v| v.as_str() == wanted)
                        .ok_or_else(|| {
                            let valid: Vec<&str> = $ty::ALL.iter().map(|v| v.as_str()).collect();
                            format!("Unknown {} '{}'. Expected one of: {}", $label, s, valid.join(", "))
                        })
                }
            }
        )*
    };
}

impl_wire_name!(
    Platform => "platform",
    Mode => "mode",
    PrimaryGoal => "goal",
    HookStyle => "hook style",
    Action => "action",
);

/// One attached file, already base64-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub data: String,
    pub mime_type: String,
    pub name: String,
}

/// Device location used for maps grounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A single strategy request. Built fresh per submission and never mutated
/// after it is handed to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRequest {
    pub platform: Platform,
    pub mode: Mode,
    pub goal: PrimaryGoal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_style: Option<HookStyle>,
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub context_input: String,
    #[serde(default, rename = "brandDNA")]
    pub brand_dna: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub demographics: String,
    #[serde(default)]
    pub geo_focus: String,
    #[serde(default)]
    pub media_assets: Vec<MediaAsset>,
    /// Pre-sampled keyframes, base64 JPEG.
    #[serde(default)]
    pub video_frames: Vec<String>,
    #[serde(default)]
    pub use_thinking: bool,
    #[serde(default)]
    pub use_live_trends: bool,
    #[serde(default)]
    pub use_maps: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub action: Action,
}

impl StrategyRequest {
    pub fn new(platform: Platform, mode: Mode, niche: impl Into<String>) -> Self {
        Self {
            platform,
            mode,
            goal: PrimaryGoal::Views,
            hook_style: None,
            niche: niche.into(),
            context_input: String::new(),
            brand_dna: String::new(),
            target_audience: String::new(),
            demographics: String::new(),
            geo_focus: String::new(),
            media_assets: Vec::new(),
            video_frames: Vec::new(),
            use_thinking: false,
            use_live_trends: false,
            use_maps: false,
            location: None,
            action: Action::Generate,
        }
    }

    pub fn with_goal(mut self, goal: PrimaryGoal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_hook_style(mut self, style: HookStyle) -> Self {
        self.hook_style = Some(style);
        self
    }

    pub fn with_context(mut self, context_input: impl Into<String>) -> Self {
        self.context_input = context_input.into();
        self
    }

    pub fn with_brand_dna(mut self, brand_dna: impl Into<String>) -> Self {
        self.brand_dna = brand_dna.into();
        self
    }

    pub fn with_targeting(
        mut self,
        audience: impl Into<String>,
        demographics: impl Into<String>,
        geo_focus: impl Into<String>,
    ) -> Self {
        self.target_audience = audience.into();
        self.demographics = demographics.into();
        self.geo_focus = geo_focus.into();
        self
    }

    pub fn with_media(mut self, asset: MediaAsset) -> Self {
        self.media_assets.push(asset);
        self
    }

    pub fn with_video_frame(mut self, frame: impl Into<String>) -> Self {
        self.video_frames.push(frame.into());
        self
    }

    pub fn with_thinking(mut self, on: bool) -> Self {
        self.use_thinking = on;
        self
    }

    pub fn with_live_trends(mut self, on: bool) -> Self {
        self.use_live_trends = on;
        self
    }

    /// Enable maps grounding, optionally pinned to a location.
    pub fn with_maps(mut self, location: Option<Location>) -> Self {
        self.use_maps = true;
        self.location = location;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// True when web-search grounding must be enabled for this request.
    pub fn wants_search(&self) -> bool {
        self.use_live_trends || self.mode == Mode::TrendHunter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_wire_names_match_ui() {
        assert_eq!(serde_json::to_string(&Platform::TwitterX).unwrap(), "\"twitter_x\"");
        assert_eq!(serde_json::to_string(&Platform::YouTube).unwrap(), "\"youtube\"");
        assert_eq!("LinkedIn".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!("twitter-x".parse::<Platform>().unwrap(), Platform::TwitterX);
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn saves_goal_is_distinct_from_shares() {
        assert_eq!(PrimaryGoal::Saves.as_str(), "saves");
        assert_ne!(PrimaryGoal::Saves.as_str(), PrimaryGoal::Shares.as_str());
    }

    #[test]
    fn editor_with_draft_routes_to_audit() {
        assert_eq!(
            Action::route(Mode::Editor, "My draft caption about sourdough"),
            Action::Audit
        );
        assert_eq!(Action::route(Mode::Editor, "  short  "), Action::Generate);
        assert_eq!(
            Action::route(Mode::Creator, "My draft caption about sourdough"),
            Action::Generate
        );
    }

    #[test]
    fn request_deserializes_from_ui_json() {
        let json = r#"{
            "platform": "tiktok",
            "mode": "trend_hunter",
            "goal": "followers",
            "niche": "Sustainable Fashion",
            "brandDNA": "Playful, no slang",
            "useMaps": true,
            "location": {"lat": 51.5, "lng": -0.12}
        }"#;
        let req: StrategyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.platform, Platform::TikTok);
        assert_eq!(req.mode, Mode::TrendHunter);
        assert_eq!(req.brand_dna, "Playful, no slang");
        assert_eq!(req.action, Action::Generate);
        assert!(req.media_assets.is_empty());
        assert_eq!(req.location, Some(Location { lat: 51.5, lng: -0.12 }));
        assert!(req.wants_search());
    }
}
