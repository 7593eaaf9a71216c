//! Flappy Drift - A side-scrolling one-button arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, scoring)
//! - `app`: Screen state machine, game-over flush, shop and settings
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Versioned save data over pluggable storage
//! - `tuning`: Difficulty tiers and playfield configuration

pub mod app;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod shop;
pub mod sim;
pub mod tuning;

pub use app::{App, Command, Screen};
pub use error::{AppError, PersistenceError, SessionError, ShopError};
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Difficulty, SessionConfig};
