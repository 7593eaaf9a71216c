//! Session state and core simulation types
//!
//! Everything a play session mutates lives in `SessionState`. The random
//! source is passed in by the caller so the state stays plain data.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::error::SessionError;
use crate::tuning::{Difficulty, DifficultyProfile, SessionConfig};

/// Maximum visual tilt in degrees (either direction)
pub const MAX_TILT_DEGREES: f32 = 45.0;

/// Session lifecycle. `GameOver` is terminal; a new session replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Hit a pipe with no collisions left
    Pipe,
    /// Left the playfield vertically
    OutOfBounds,
}

/// How cleanly a pipe was passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassKind {
    /// Within 10px of the gap centre
    Perfect,
    /// Within 30px of the gap centre
    NearMiss,
    Plain,
}

/// Things that happened during a tick, for audio/particle/HUD layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Passed {
        kind: PassKind,
        points: u32,
        coins: u32,
        combo: u32,
    },
    SpeedUp {
        speed: f32,
    },
    Hit {
        collisions: u32,
    },
    GameOver {
        cause: GameOverCause,
    },
}

/// The bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top of the bounding box (pixels, down is positive)
    pub y: f32,
    pub velocity: f32,
    /// Tilt in degrees, derived from velocity
    pub angle: f32,
    /// Ticks left during which pipe hits are ignored
    pub invincibility: u32,
    /// Pipe hits taken this session
    pub collisions: u32,
}

impl Player {
    pub fn new(y: f32) -> Self {
        Self {
            y,
            velocity: 0.0,
            angle: 0.0,
            invincibility: 0,
            collisions: 0,
        }
    }

    /// Vertical centre of the bounding box
    #[inline]
    pub fn center(&self, size: f32) -> f32 {
        self.y + size / 2.0
    }
}

/// An upper/lower pipe pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the upper pipe; the gap opens below it
    pub gap_top: u32,
    /// Set once the pipe's trailing edge is behind the player
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: u32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }

    /// Vertical centre of the gap
    #[inline]
    pub fn gap_center(&self, gap: u32) -> f32 {
        self.gap_top as f32 + gap as f32 / 2.0
    }
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub config: SessionConfig,
    pub phase: GamePhase,
    pub player: Player,
    /// Oldest (leftmost) first
    pub obstacles: VecDeque<Obstacle>,
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub perfect_passes: u32,
    pub near_misses: u32,
    /// Coins earned this session (already credited to the wallet as earned)
    pub coins_earned: u32,
    /// Current pipe scroll speed; never decreases
    pub speed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub game_over_tick: Option<u64>,
    pub game_over_cause: Option<GameOverCause>,
    /// Hit feedback countdown (ticks)
    pub screen_shake: u32,
}

impl SessionState {
    /// Start a session for a difficulty tier on the default playfield
    pub fn new(difficulty: Difficulty, rng: &mut dyn RandomSource) -> Result<Self, SessionError> {
        Self::with_config(difficulty, SessionConfig::default(), rng)
    }

    /// Start a session with an explicit playfield configuration
    pub fn with_config(
        difficulty: Difficulty,
        config: SessionConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, SessionError> {
        let profile = difficulty.profile();
        config.validate(&profile)?;

        let mut state = Self {
            difficulty,
            profile,
            player: Player::new(config.height / 2.0),
            config,
            phase: GamePhase::Running,
            obstacles: VecDeque::new(),
            score: 0,
            combo: 0,
            max_combo: 0,
            perfect_passes: 0,
            near_misses: 0,
            coins_earned: 0,
            speed: profile.initial_speed,
            time_ticks: 0,
            game_over_tick: None,
            game_over_cause: None,
            screen_shake: 0,
        };

        // First pipe enters at the right edge
        state.spawn_obstacle(rng);

        Ok(state)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// End the session (idempotent)
    pub fn end(&mut self, cause: GameOverCause) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_tick = Some(self.time_ticks);
        self.game_over_cause = Some(cause);
        log::info!(
            "Game over ({:?}) on {} with score {}",
            cause,
            self.difficulty,
            self.score
        );
        true
    }

    /// Read-only HUD snapshot
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            combo: self.combo,
            perfect_passes: self.perfect_passes,
            near_misses: self.near_misses,
            speed: self.speed,
            coins_earned: self.coins_earned,
            player_y: self.player.y,
            player_angle: self.player.angle,
            invincible: self.player.invincibility > 0,
            obstacles: self.obstacles.iter().map(|o| (o.x, o.gap_top)).collect(),
            game_over: self.is_game_over(),
        }
    }

    /// Final tallies for the persistence layer
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            difficulty: self.difficulty,
            score: self.score,
            perfect_passes: self.perfect_passes,
            near_misses: self.near_misses,
            max_combo: self.max_combo,
            coins_earned: self.coins_earned,
            cause: self.game_over_cause,
        }
    }
}

/// Per-frame snapshot for presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub combo: u32,
    pub perfect_passes: u32,
    pub near_misses: u32,
    pub speed: f32,
    pub coins_earned: u32,
    pub player_y: f32,
    pub player_angle: f32,
    pub invincible: bool,
    /// `(x, gap_top)` per pipe, oldest first
    pub obstacles: Vec<(f32, u32)>,
    pub game_over: bool,
}

/// What a finished session reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub difficulty: Difficulty,
    pub score: u32,
    pub perfect_passes: u32,
    pub near_misses: u32,
    pub max_combo: u32,
    pub coins_earned: u32,
    pub cause: Option<GameOverCause>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;

    #[test]
    fn test_new_session_defaults() {
        let mut rng = ScriptedRng::constant(250);
        let state = SessionState::new(Difficulty::Normal, &mut rng).unwrap();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.y, 384.0);
        assert_eq!(state.player.velocity, 0.0);
        assert_eq!(state.speed, 3.5);
        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0], Obstacle::new(1024.0, 250));
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let mut rng = ScriptedRng::constant(100);
        let config = SessionConfig {
            height: 300.0,
            ..Default::default()
        };
        let err = SessionState::with_config(Difficulty::Easy, config, &mut rng).unwrap_err();
        assert_eq!(err, SessionError::UnplaceableGap { gap: 220, height: 300 });
    }

    #[test]
    fn test_end_is_one_way() {
        let mut rng = ScriptedRng::constant(100);
        let mut state = SessionState::new(Difficulty::Easy, &mut rng).unwrap();
        state.time_ticks = 12;
        assert!(state.end(GameOverCause::Pipe));
        assert!(!state.end(GameOverCause::OutOfBounds));
        assert_eq!(state.game_over_cause, Some(GameOverCause::Pipe));
        assert_eq!(state.game_over_tick, Some(12));
    }

    #[test]
    fn test_gap_center() {
        let pipe = Obstacle::new(500.0, 300);
        assert_eq!(pipe.gap_center(200), 400.0);
        assert_eq!(Player::new(385.0).center(30.0), 400.0);
    }

    #[test]
    fn test_summary_round_trips_through_json() {
        let mut rng = ScriptedRng::constant(100);
        let mut state = SessionState::new(Difficulty::Hardcore, &mut rng).unwrap();
        state.score = 27;
        state.max_combo = 4;
        state.end(GameOverCause::OutOfBounds);

        let json = serde_json::to_string(&state.summary()).unwrap();
        let back: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state.summary());
    }
}
