//! Brand profile persistence.
//!
//! One JSON file, by default at
//! `~/.config/nebula-strategy/brand-profile.json`. Last write wins.

use std::path::{Path, PathBuf};

use super::profile::{BrandEntry, BrandProfile};

pub struct BrandStore {
    path: PathBuf,
}

impl BrandStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile. Missing or unreadable files yield an empty one.
    pub fn load(&self) -> BrandProfile {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("[BRAND] Ignoring corrupt {}: {}", self.path.display(), e);
                BrandProfile::default()
            }),
            Err(_) => BrandProfile::default(),
        }
    }

    pub fn save(&self, profile: &BrandProfile) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config dir: {}", e))?;
        }
        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| format!("Failed to serialize brand profile: {}", e))?;
        std::fs::write(&self.path, json)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))?;
        log::info!(
            "[BRAND] Saved profile ({} history entries)",
            profile.history.len()
        );
        Ok(())
    }

    /// Make `text` the active guideline and record it in history.
    pub fn remember(&self, text: &str) -> Result<BrandProfile, String> {
        let mut profile = self.load();
        profile.set_current(text, now_ms());
        self.save(&profile)?;
        Ok(profile)
    }

    /// Re-activate a history entry by id.
    pub fn activate(&self, id: &str) -> Result<BrandEntry, String> {
        let mut profile = self.load();
        let entry = profile
            .find(id)
            .cloned()
            .ok_or_else(|| format!("No brand guideline with id {}", id))?;
        profile.current = entry.text.clone();
        self.save(&profile)?;
        Ok(entry)
    }

    pub fn delete(&self, id: &str) -> Result<(), String> {
        let mut profile = self.load();
        if !profile.delete(id) {
            return Err(format!("No brand guideline with id {}", id));
        }
        self.save(&profile)
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
