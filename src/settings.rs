//! Game settings and player profile
//!
//! One flat record persisted under the `settings` key: preferences plus the
//! progress that survives between sessions (high score, coins, unlocks).

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persistence::{self, Storage};
use crate::tuning::Difficulty;

/// Background rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    #[default]
    Dynamic,
    Static,
    Minimal,
}

impl BackgroundStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundStyle::Dynamic => "Dynamic",
            BackgroundStyle::Static => "Static",
            BackgroundStyle::Minimal => "Minimal",
        }
    }

    /// Cycle to the next style (settings menu button)
    pub fn next(&self) -> Self {
        match self {
            BackgroundStyle::Dynamic => BackgroundStyle::Static,
            BackgroundStyle::Static => BackgroundStyle::Minimal,
            BackgroundStyle::Minimal => BackgroundStyle::Dynamic,
        }
    }
}

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Default,
    Dark,
    Neon,
    Pastel,
}

impl ColorTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::Default => "Default",
            ColorTheme::Dark => "Dark",
            ColorTheme::Neon => "Neon",
            ColorTheme::Pastel => "Pastel",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Default => ColorTheme::Dark,
            ColorTheme::Dark => ColorTheme::Neon,
            ColorTheme::Neon => ColorTheme::Pastel,
            ColorTheme::Pastel => ColorTheme::Default,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tier used for the next session
    pub difficulty: Difficulty,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Visual Effects ===
    pub particle_effects: bool,
    /// Screen shake on pipe hits
    pub screen_shake: bool,
    pub background_style: BackgroundStyle,
    pub color_theme: ColorTheme,

    // === Display ===
    pub show_fps: bool,
    pub fullscreen: bool,
    pub vsync: bool,

    // === Progress ===
    pub high_score: u32,
    /// Sum of all finished session scores
    pub total_score: u64,
    /// Wallet balance
    pub coins: u32,
    pub unlocked_birds: Vec<String>,
    pub unlocked_obstacles: Vec<String>,
    pub current_bird: String,
    pub current_obstacle: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            volume: 0.5,
            music_volume: 0.5,
            sfx_volume: 0.7,

            particle_effects: true,
            screen_shake: true,
            background_style: BackgroundStyle::Dynamic,
            color_theme: ColorTheme::Default,

            show_fps: true,
            fullscreen: false,
            vsync: true,

            high_score: 0,
            total_score: 0,
            coins: 0,
            unlocked_birds: vec!["default".to_string()],
            unlocked_obstacles: vec!["default".to_string()],
            current_bird: "default".to_string(),
            current_obstacle: "default".to_string(),
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "settings";

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// Effective music level after the master volume
    pub fn effective_music_volume(&self) -> f32 {
        self.volume * self.music_volume
    }

    /// Effective sound-effect level after the master volume
    pub fn effective_sfx_volume(&self) -> f32 {
        self.volume * self.sfx_volume
    }

    /// Record a finished session. Returns true on a new high score.
    pub fn record_session(&mut self, score: u32) -> bool {
        self.total_score += u64::from(score);
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Credit coins to the wallet
    pub fn add_coins(&mut self, coins: u32) {
        self.coins = self.coins.saturating_add(coins);
    }

    /// Load from storage, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        let mut settings: Self = persistence::load_or_default(storage, Self::STORAGE_KEY);
        settings.sanitize();
        settings
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), PersistenceError> {
        persistence::save(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Repair values a hand-edited or older file may carry
    fn sanitize(&mut self) {
        self.set_volume(self.volume);
        self.set_music_volume(self.music_volume);
        self.set_sfx_volume(self.sfx_volume);
        for list in [&mut self.unlocked_birds, &mut self.unlocked_obstacles] {
            if !list.iter().any(|s| s == "default") {
                list.insert(0, "default".to_string());
            }
        }
        if !self.unlocked_birds.contains(&self.current_bird) {
            self.current_bird = "default".to_string();
        }
        if !self.unlocked_obstacles.contains(&self.current_obstacle) {
            self.current_obstacle = "default".to_string();
        }
    }
}
