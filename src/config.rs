use crate::domain::DEFAULT_FOCUS_SECS;
use crate::persistence::{atomic_write, read_optional};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length of one focus session in minutes
    pub focus_minutes: u32,
    /// Owner recorded on new tasks
    pub user_id: String,
    /// Emoji glyphs in the task tree (ASCII otherwise)
    pub use_emoji: bool,
    /// Bell / desktop notification when a session finishes
    pub notifications: bool,
    /// Seed demo tasks when no task list has been stored
    pub seed_demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_SECS / 60,
            user_id: "user-1".to_string(),
            use_emoji: true,
            notifications: true,
            seed_demo: true,
        }
    }
}

impl Settings {
    /// Session length in seconds (at least one second)
    pub fn focus_secs(&self) -> u32 {
        self.focus_minutes.saturating_mul(60).max(1)
    }

    /// Apply command-line overrides
    pub fn with_focus_minutes(mut self, minutes: Option<u32>) -> Self {
        if let Some(minutes) = minutes {
            self.focus_minutes = minutes;
        }
        self
    }
}

/// Load settings; a missing file yields defaults
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    match read_optional(path)? {
        Some(content) => serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file: {}", path.display())),
        None => Ok(Settings::default()),
    }
}

/// Save settings to config.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)
}
