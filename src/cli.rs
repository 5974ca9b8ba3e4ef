//! Command-line front-end.
//!
//! Builds a `StrategyRequest` from flags (or a JSON request file), routes
//! audit vs generate, manages brand guidelines and prints the normalized
//! response as JSON.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::brand::{BrandEntry, BrandStore};
use crate::media;
use crate::settings::Settings;
use crate::strategy::{
    Action, HookStyle, Location, Mode, Platform, PrimaryGoal, StrategyOrchestrator,
    StrategyRequest,
};

#[derive(Parser)]
#[command(name = "nebula-strategy")]
#[command(about = "Social media strategy generation backed by Gemini", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Brand profile file (overrides the default config location)
    #[arg(long, global = true)]
    pub brand_store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a strategy (or audit a draft in editor mode)
    Generate(GenerateArgs),

    /// Manage saved brand guidelines
    Brand {
        #[command(subcommand)]
        action: BrandCommands,
    },
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    #[arg(long, required_unless_present = "request")]
    pub platform: Option<Platform>,

    #[arg(long, required_unless_present = "request")]
    pub mode: Option<Mode>,

    #[arg(long)]
    pub goal: Option<PrimaryGoal>,

    #[arg(long)]
    pub hook_style: Option<HookStyle>,

    #[arg(long, default_value = "")]
    pub niche: String,

    /// Draft text, topic or competitor notes
    #[arg(long, default_value = "")]
    pub context: String,

    /// Brand guidelines; saved as the active guideline
    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long, default_value = "")]
    pub audience: String,

    #[arg(long, default_value = "")]
    pub demographics: String,

    #[arg(long, default_value = "")]
    pub geo: String,

    /// Image or video file to attach (repeatable)
    #[arg(long = "media")]
    pub media: Vec<PathBuf>,

    /// Pre-extracted JPEG keyframe (repeatable)
    #[arg(long = "frame")]
    pub frames: Vec<PathBuf>,

    #[arg(long)]
    pub thinking: bool,

    #[arg(long)]
    pub live_trends: bool,

    #[arg(long)]
    pub maps: bool,

    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Re-submit an edited draft as a fresh generation
    #[arg(long)]
    pub refine: bool,

    /// JSON request file; other flags are ignored except brand handling
    #[arg(long)]
    pub request: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum BrandCommands {
    /// List saved guidelines, newest first
    List,
    /// Case-insensitive search through saved guidelines
    Search { term: String },
    /// Make a saved guideline the active one
    Use { id: String },
    /// Delete a saved guideline
    Delete { id: String },
}

pub async fn dispatch(cli: Cli, settings: Settings) -> Result<(), String> {
    let store = BrandStore::new(
        cli.brand_store
            .clone()
            .unwrap_or_else(|| settings.brand_store_path.clone()),
    );
    match cli.command {
        Commands::Generate(args) => generate(args, &settings, &store).await,
        Commands::Brand { action } => brand(action, &store),
    }
}

async fn generate(args: GenerateArgs, settings: &Settings, store: &BrandStore) -> Result<(), String> {
    let api_key = settings
        .api_key
        .clone()
        .ok_or("No Gemini API key found. Set GEMINI_API_KEY in .env.local")?;

    let mut request = match &args.request {
        Some(path) => read_request(path)?,
        None => build_request(&args)?,
    };

    if let Some(text) = &args.brand {
        let profile = store.remember(text)?;
        request.brand_dna = profile.current;
    } else if request.brand_dna.trim().is_empty() {
        request.brand_dna = store.load().current;
    }

    let orchestrator = StrategyOrchestrator::gemini_with_base(api_key, settings.api_base.clone());
    let response = orchestrator.execute(&request).await;

    let json = serde_json::to_string_pretty(&response)
        .map_err(|e| format!("Failed to serialize response: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn read_request(path: &Path) -> Result<StrategyRequest, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("Invalid request file {}: {}", path.display(), e))
}

/// Turn generate flags into a request. Media files are read and encoded.
pub fn build_request(args: &GenerateArgs) -> Result<StrategyRequest, String> {
    let platform = args.platform.ok_or("--platform is required")?;
    let mode = args.mode.ok_or("--mode is required")?;

    let action = if args.refine {
        Action::Generate
    } else {
        Action::route(mode, &args.context)
    };

    let mut request = StrategyRequest::new(platform, mode, args.niche.clone())
        .with_context(args.context.clone())
        .with_targeting(
            args.audience.clone(),
            args.demographics.clone(),
            args.geo.clone(),
        )
        .with_thinking(args.thinking)
        .with_live_trends(args.live_trends)
        .with_action(action);

    if let Some(goal) = args.goal {
        request = request.with_goal(goal);
    }
    if let Some(style) = args.hook_style {
        request = request.with_hook_style(style);
    }
    if args.maps {
        let location = match (args.lat, args.lng) {
            (Some(lat), Some(lng)) => Some(Location { lat, lng }),
            _ => None,
        };
        request = request.with_maps(location);
    }
    for path in &args.media {
        request = request.with_media(media::load_asset(path)?);
    }
    for path in &args.frames {
        request = request.with_video_frame(media::load_keyframe(path)?);
    }
    Ok(request)
}

fn brand(action: BrandCommands, store: &BrandStore) -> Result<(), String> {
    match action {
        BrandCommands::List => {
            let profile = store.load();
            if profile.history.is_empty() {
                println!("No saved brand guidelines.");
            }
            for entry in &profile.history {
                print_entry(entry, entry.text == profile.current);
            }
        }
        BrandCommands::Search { term } => {
            let profile = store.load();
            let hits = profile.search(&term);
            if hits.is_empty() {
                println!("No guidelines match '{}'.", term);
            }
            for entry in hits {
                print_entry(entry, entry.text == profile.current);
            }
        }
        BrandCommands::Use { id } => {
            let entry = store.activate(&id)?;
            println!("Active brand guideline: {}", entry.text);
        }
        BrandCommands::Delete { id } => {
            store.delete(&id)?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

fn print_entry(entry: &BrandEntry, active: bool) {
    let marker = if active { "*" } else { " " };
    println!("{} {}  {}", marker, entry.id, entry.text);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["nebula-strategy", "generate"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Generate(args) => args,
            Commands::Brand { .. } => panic!("expected generate"),
        }
    }

    #[test]
    fn flags_build_a_request() {
        let request = build_request(&args(&[
            "--platform", "twitter_x",
            "--mode", "creator",
            "--goal", "link_clicks",
            "--hook-style", "urgency_fomo",
            "--niche", "Indie games",
            "--geo", "Berlin",
            "--thinking",
        ]))
        .unwrap();
        assert_eq!(request.platform, Platform::TwitterX);
        assert_eq!(request.goal, PrimaryGoal::LinkClicks);
        assert_eq!(request.hook_style, Some(HookStyle::UrgencyFomo));
        assert_eq!(request.geo_focus, "Berlin");
        assert!(request.use_thinking);
        assert!(!request.use_maps);
        assert_eq!(request.action, Action::Generate);
    }

    #[test]
    fn editor_with_draft_audits_unless_refining() {
        let draft = ["--platform", "instagram", "--mode", "editor", "--context", "My long draft caption here"];
        assert_eq!(build_request(&args(&draft)).unwrap().action, Action::Audit);

        let mut refine = draft.to_vec();
        refine.push("--refine");
        assert_eq!(build_request(&args(&refine)).unwrap().action, Action::Generate);
    }

    #[test]
    fn maps_with_coordinates() {
        let request = build_request(&args(&[
            "--platform", "instagram",
            "--mode", "creator",
            "--maps",
            "--lat", "-33.86",
            "--lng", "151.2",
        ]))
        .unwrap();
        assert!(request.use_maps);
        assert_eq!(request.location, Some(Location { lat: -33.86, lng: 151.2 }));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let parsed = Cli::try_parse_from([
            "nebula-strategy", "generate", "--platform", "myspace", "--mode", "creator",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn platform_required_without_request_file() {
        assert!(Cli::try_parse_from(["nebula-strategy", "generate", "--mode", "creator"]).is_err());
        assert!(Cli::try_parse_from(["nebula-strategy", "generate", "--request", "req.json"]).is_ok());
    }
}
