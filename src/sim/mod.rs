//! Play session simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Randomness only through an injected `RandomSource`
//! - Pipes kept in spawn order (oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod rng;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{Aabb, hits_obstacle, out_of_bounds};
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use scoring::classify;
pub use state::{
    GameEvent, GameOverCause, GamePhase, Hud, MAX_TILT_DEGREES, Obstacle, PassKind, Player,
    SessionState, SessionSummary,
};
pub use tick::{TickInput, autopilot_wants_jump, tick};
