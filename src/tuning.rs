//! Data-driven game balance
//!
//! Difficulty tiers map to immutable physics/scoring profiles, and
//! `SessionConfig` holds the playfield geometry shared by every tier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Fixed simulation rate (one tick per rendered frame)
pub const TICK_RATE_HZ: u32 = 60;

/// Vertical margin kept free above and below every pipe gap
pub const GAP_MARGIN: u32 = 100;

/// Selectable difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hardcore,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hardcore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hardcore => "hardcore",
        }
    }

    /// Look up the profile for this tier
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                gravity: 0.35,
                jump_impulse: -7.0,
                initial_speed: 2.5,
                speed_increment: 0.3,
                gap: 220,
                score_multiplier: 1,
            },
            Difficulty::Normal => DifficultyProfile {
                gravity: 0.5,
                jump_impulse: -8.0,
                initial_speed: 3.5,
                speed_increment: 0.5,
                gap: 200,
                score_multiplier: 2,
            },
            Difficulty::Hardcore => DifficultyProfile {
                gravity: 0.65,
                jump_impulse: -9.0,
                initial_speed: 4.5,
                speed_increment: 0.7,
                gap: 180,
                score_multiplier: 3,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hardcore" => Ok(Difficulty::Hardcore),
            _ => Err(SessionError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Physics and scoring constants for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Added to velocity every tick (pixels/tick²)
    pub gravity: f32,
    /// Velocity set on a jump; negative is upward
    pub jump_impulse: f32,
    /// Pipe scroll speed at session start (pixels/tick)
    pub initial_speed: f32,
    /// Speed added each time the score crosses a multiple of 10
    pub speed_increment: f32,
    /// Vertical opening between upper and lower pipe
    pub gap: u32,
    pub score_multiplier: u32,
}

/// Playfield geometry and session rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub width: f32,
    pub height: f32,
    /// Left edge of the player's bounding box
    pub player_x: f32,
    /// Side length of the (square) player bounding box
    pub player_size: f32,
    pub obstacle_width: f32,
    /// A new pipe spawns once the newest one is this far from the right edge
    pub obstacle_spacing: f32,
    /// Pipe hits allowed before the session ends
    pub max_collisions: u32,
    pub invincibility_ticks: u32,
    pub shake_ticks: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            player_x: 85.0,
            player_size: 30.0,
            obstacle_width: 70.0,
            obstacle_spacing: 300.0,
            max_collisions: 1,
            invincibility_ticks: 60,
            shake_ticks: 20,
        }
    }
}

impl SessionConfig {
    /// Check that pipes can be placed for the given profile.
    ///
    /// Gap tops are drawn from `[100, height - gap - 100)`, which is only
    /// non-empty when `gap + 200 < height`.
    pub fn validate(&self, profile: &DifficultyProfile) -> Result<(), SessionError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(SessionError::InvalidPlayfield("dimensions must be positive"));
        }
        if !(self.obstacle_spacing > 0.0 && self.obstacle_width > 0.0) {
            return Err(SessionError::InvalidPlayfield(
                "obstacle width and spacing must be positive",
            ));
        }
        if self.max_collisions == 0 {
            return Err(SessionError::InvalidPlayfield("max_collisions must be at least 1"));
        }
        if (profile.gap + 2 * GAP_MARGIN) as f32 >= self.height {
            return Err(SessionError::UnplaceableGap {
                gap: profile.gap,
                height: self.height as u32,
            });
        }
        Ok(())
    }

    /// Half-open range of valid integer gap tops for a pipe gap.
    ///
    /// The upper bound is rounded up so a fractional height still admits
    /// every integer below `height - gap - 100`.
    pub fn gap_top_range(&self, gap: u32) -> (u32, u32) {
        let high = (self.height - (gap + GAP_MARGIN) as f32).ceil().max(0.0);
        (GAP_MARGIN, high as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_match_tiers() {
        let normal = Difficulty::Normal.profile();
        assert_eq!(normal.gravity, 0.5);
        assert_eq!(normal.jump_impulse, -8.0);
        assert_eq!(normal.initial_speed, 3.5);
        assert_eq!(normal.speed_increment, 0.5);
        assert_eq!(normal.gap, 200);
        assert_eq!(normal.score_multiplier, 2);

        assert_eq!(Difficulty::Easy.profile().score_multiplier, 1);
        assert_eq!(Difficulty::Hardcore.profile().gap, 180);
        assert_eq!(Difficulty::Hardcore.profile().score_multiplier, 3);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("Hardcore".parse::<Difficulty>(), Ok(Difficulty::Hardcore));
        assert_eq!(
            "nightmare".parse::<Difficulty>(),
            Err(SessionError::UnknownDifficulty("nightmare".into()))
        );
        for tier in Difficulty::ALL {
            assert_eq!(tier.as_str().parse::<Difficulty>(), Ok(tier));
        }
    }

    #[test]
    fn test_difficulty_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hardcore).unwrap();
        assert_eq!(json, "\"hardcore\"");
        let back: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(back, Difficulty::Easy);
    }

    #[test]
    fn test_validate_rejects_tight_playfield() {
        let profile = Difficulty::Normal.profile();
        let config = SessionConfig {
            height: 400.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(&profile),
            Err(SessionError::UnplaceableGap { gap: 200, height: 400 })
        );

        // 200 + 200 < 401 leaves exactly one valid gap top
        let config = SessionConfig {
            height: 401.0,
            ..Default::default()
        };
        assert!(config.validate(&profile).is_ok());
        assert_eq!(config.gap_top_range(200), (100, 101));
    }

    #[test]
    fn test_validate_fractional_height() {
        let profile = Difficulty::Normal.profile();
        let config = SessionConfig {
            height: 400.5,
            ..Default::default()
        };
        assert!(config.validate(&profile).is_ok());
        assert_eq!(config.gap_top_range(200), (100, 101));

        let config = SessionConfig {
            height: 399.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(&profile),
            Err(SessionError::UnplaceableGap { gap: 200, height: 399 })
        );
    }

    #[test]
    fn test_validate_rejects_degenerate_geometry() {
        let profile = Difficulty::Easy.profile();
        let config = SessionConfig {
            obstacle_spacing: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&profile),
            Err(SessionError::InvalidPlayfield(_))
        ));
        let config = SessionConfig {
            max_collisions: 0,
            ..Default::default()
        };
        assert!(config.validate(&profile).is_err());
    }

    #[test]
    fn test_default_config_fits_every_tier() {
        let config = SessionConfig::default();
        for tier in Difficulty::ALL {
            assert!(config.validate(&tier.profile()).is_ok());
        }
    }
}
