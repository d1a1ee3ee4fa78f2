//! Game settings and preferences
//!
//! Persisted as JSON next to the binary (or wherever `SORT_RACE_SETTINGS` points).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{ALGO_STEPS_PER_SEC, HIGHLIGHT_FADE_SECS};

/// Array size presets (keys 1/2/3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ArraySize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ArraySize {
    pub const ALL: [ArraySize; 3] = [ArraySize::Small, ArraySize::Medium, ArraySize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArraySize::Small => "Small",
            ArraySize::Medium => "Medium",
            ArraySize::Large => "Large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" | "s" | "12" => Some(ArraySize::Small),
            "medium" | "med" | "m" | "24" => Some(ArraySize::Medium),
            "large" | "l" | "36" => Some(ArraySize::Large),
            _ => None,
        }
    }

    /// Number of bars for this preset
    pub fn len(&self) -> usize {
        match self {
            ArraySize::Small => 12,
            ArraySize::Medium => 24,
            ArraySize::Large => 36,
        }
    }

    pub fn from_len(n: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.len() == n)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Array size used when a round starts
    pub size: ArraySize,

    // === Pacing ===
    /// QuickSort animation speed (higher = faster)
    pub algo_steps_per_sec: f32,
    /// How long the last compare/swap stays highlighted
    pub highlight_fade_secs: f32,
    /// Optional round time limit; the round ends even if a side is unfinished
    pub time_limit_secs: Option<f32>,

    // === Idle/demo mode ===
    /// Clicks per second made by the demo bot on the human side
    pub bot_clicks_per_sec: f32,

    /// Fixed session seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: ArraySize::Medium,
            algo_steps_per_sec: ALGO_STEPS_PER_SEC,
            highlight_fade_secs: HIGHLIGHT_FADE_SECS,
            time_limit_secs: None,
            bot_clicks_per_sec: 4.0,
            seed: None,
        }
    }
}

impl Settings {
    /// Environment variable overriding the settings file location
    pub const PATH_ENV: &'static str = "SORT_RACE_SETTINGS";
    /// Default settings file name
    const DEFAULT_FILE: &'static str = "sort-race.json";

    /// Create settings for a size preset (other fields default)
    pub fn from_size(size: ArraySize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Clamp values that would stall or break the race
    pub fn sanitized(mut self) -> Self {
        if !self.algo_steps_per_sec.is_finite() || self.algo_steps_per_sec <= 0.0 {
            self.algo_steps_per_sec = ALGO_STEPS_PER_SEC;
        }
        if !self.highlight_fade_secs.is_finite() || self.highlight_fade_secs < 0.0 {
            self.highlight_fade_secs = HIGHLIGHT_FADE_SECS;
        }
        if let Some(limit) = self.time_limit_secs {
            if !limit.is_finite() || limit <= 0.0 {
                self.time_limit_secs = None;
            }
        }
        if !self.bot_clicks_per_sec.is_finite() || self.bot_clicks_per_sec <= 0.0 {
            self.bot_clicks_per_sec = Self::default().bot_clicks_per_sec;
        }
        self
    }

    /// Settings file location
    pub fn path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE))
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
