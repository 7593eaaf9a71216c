//! Error types
//!
//! The simulation itself never fails once a session is constructed; errors
//! only come from configuration, persistence, the shop, and screen changes.

use thiserror::Error;

use crate::app::{Command, Screen};

/// Session construction failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// Obstacle placement needs `gap + 200 < height`
    #[error("pipe gap {gap} leaves no room for placement in a playfield {height} high")]
    UnplaceableGap { gap: u32, height: u32 },
    #[error("invalid playfield: {0}")]
    InvalidPlayfield(&'static str),
    #[error("unknown difficulty tier: {0:?}")]
    UnknownDifficulty(String),
}

/// Storage and save-file failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("storage backend unavailable")]
    Unavailable,
}

/// Shop purchase/equip failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("no such item: {0:?}")]
    UnknownItem(String),
    #[error("{0:?} is already unlocked")]
    AlreadyOwned(String),
    #[error("{0:?} has not been unlocked")]
    NotOwned(String),
    #[error("need {price} coins, have {balance}")]
    InsufficientCoins { price: u32, balance: u32 },
}

/// Application-level failures
#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot apply {command:?} while in {screen:?}")]
    IllegalTransition { screen: Screen, command: Command },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Shop(#[from] ShopError),
}
