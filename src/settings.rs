//! Runtime settings and credential resolution.
//!
//! Handles:
//! - `.env.local` / `.env` loading at startup
//! - Gemini API key lookup (`GEMINI_API_KEY`, then `API_KEY`)
//! - API host override and brand-store location

use std::path::{Path, PathBuf};

use crate::strategy::gemini::DEFAULT_API_BASE;

/// Env vars checked for the Gemini key, in priority order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";

const APP_DIR: &str = "nebula-strategy";
const BRAND_FILE: &str = "brand-profile.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub brand_store_path: PathBuf,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = resolve_api_key(&lookup);
        let api_base = lookup(API_BASE_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if api_base != DEFAULT_API_BASE {
            log::info!("[SETTINGS] API base override: {}", api_base);
        }
        Self {
            api_key,
            api_base,
            brand_store_path: default_brand_store_path(),
        }
    }
}

/// First non-empty key among `API_KEY_VARS`.
pub fn resolve_api_key(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    for var in API_KEY_VARS {
        if let Some(key) = lookup(var).filter(|k| !k.trim().is_empty()) {
            log::info!("[SETTINGS] Using API key from {}", var);
            return Some(key.trim().to_string());
        }
    }
    log::warn!("[SETTINGS] No Gemini API key set ({})", API_KEY_VARS.join(" / "));
    None
}

/// `{config_dir}/nebula-strategy/brand-profile.json`.
pub fn default_brand_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(BRAND_FILE)
}

/// Load the first of `.env.local` / `.env` found under `root`.
///
/// Runs before the logger exists, so it reports on stderr. Returns the
/// file that was loaded.
pub fn load_env(root: &Path) -> Option<PathBuf> {
    for env_file in [".env.local", ".env"] {
        let path = root.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => {
                    eprintln!("[STARTUP] Loaded {}", path.display());
                    return Some(path);
                }
                Err(e) => {
                    eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e);
                    return None;
                }
            }
        }
    }
    None
}
