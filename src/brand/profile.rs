//! Brand-guideline profile: the active guideline plus a capped history.
//!
//! History is newest first, unique by trimmed text, at most
//! `MAX_HISTORY` entries.

use serde::{Deserialize, Serialize};

pub const MAX_HISTORY: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandEntry {
    pub id: String,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrandProfile {
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub history: Vec<BrandEntry>,
}

impl BrandProfile {
    /// Record `text` as the newest history entry. Blank text is ignored.
    ///
    /// An existing entry with the same trimmed text moves to the front
    /// with a fresh timestamp. Returns false when nothing changed.
    pub fn push_history(&mut self, text: &str, now_ms: u64) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.history.retain(|e| e.text.trim() != trimmed);

        let mut id = now_ms.to_string();
        let mut bump = now_ms;
        while self.history.iter().any(|e| e.id == id) {
            bump += 1;
            id = bump.to_string();
        }

        self.history.insert(
            0,
            BrandEntry {
                id,
                text: trimmed.to_string(),
                timestamp: now_ms,
            },
        );
        self.history.truncate(MAX_HISTORY);
        true
    }

    /// Set the active guideline and remember it.
    pub fn set_current(&mut self, text: &str, now_ms: u64) {
        self.current = text.trim().to_string();
        self.push_history(text, now_ms);
    }

    pub fn find(&self, id: &str) -> Option<&BrandEntry> {
        self.history.iter().find(|e| e.id == id)
    }

    /// Remove the entry with `id`. The active guideline is left alone.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.history.len();
        self.history.retain(|e| e.id != id);
        self.history.len() != before
    }

    /// Case-insensitive substring search. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&BrandEntry> {
        let needle = term.trim().to_lowercase();
        self.history
            .iter()
            .filter(|e| needle.is_empty() || e.text.to_lowercase().contains(&needle))
            .collect()
    }
}
