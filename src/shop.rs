//! Cosmetic shop
//!
//! Bird skins and pipe styles bought with coins. Ownership and the wallet
//! live in `Settings`; this module only holds the catalogue and the rules.

use serde::{Deserialize, Serialize};

use crate::error::ShopError;
use crate::settings::Settings;

/// Which catalogue an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Bird,
    Obstacle,
}

/// A purchasable cosmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: &'static str,
    pub kind: ItemKind,
    pub price: u32,
    /// Display colour (RGB)
    pub color: (u8, u8, u8),
}

pub const BIRDS: [ShopItem; 4] = [
    ShopItem {
        id: "default",
        kind: ItemKind::Bird,
        price: 0,
        color: (255, 200, 31),
    },
    ShopItem {
        id: "golden",
        kind: ItemKind::Bird,
        price: 100,
        color: (255, 215, 0),
    },
    ShopItem {
        id: "rainbow",
        kind: ItemKind::Bird,
        price: 500,
        color: (255, 100, 100),
    },
    ShopItem {
        id: "robot",
        kind: ItemKind::Bird,
        price: 999,
        color: (192, 192, 192),
    },
];

pub const OBSTACLES: [ShopItem; 4] = [
    ShopItem {
        id: "default",
        kind: ItemKind::Obstacle,
        price: 0,
        color: (88, 101, 242),
    },
    ShopItem {
        id: "crystal",
        kind: ItemKind::Obstacle,
        price: 150,
        color: (173, 216, 230),
    },
    ShopItem {
        id: "neon",
        kind: ItemKind::Obstacle,
        price: 300,
        color: (255, 110, 199),
    },
    ShopItem {
        id: "gold",
        kind: ItemKind::Obstacle,
        price: 750,
        color: (255, 215, 0),
    },
];

/// All items of one kind, in display order
pub fn catalogue(kind: ItemKind) -> &'static [ShopItem] {
    match kind {
        ItemKind::Bird => &BIRDS,
        ItemKind::Obstacle => &OBSTACLES,
    }
}

pub fn find(kind: ItemKind, id: &str) -> Result<&'static ShopItem, ShopError> {
    catalogue(kind)
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| ShopError::UnknownItem(id.to_string()))
}

fn unlocked(settings: &Settings, kind: ItemKind) -> &Vec<String> {
    match kind {
        ItemKind::Bird => &settings.unlocked_birds,
        ItemKind::Obstacle => &settings.unlocked_obstacles,
    }
}

pub fn is_owned(settings: &Settings, kind: ItemKind, id: &str) -> bool {
    unlocked(settings, kind).iter().any(|owned| owned == id)
}

/// Buy an item: deducts its price and unlocks it
pub fn purchase(settings: &mut Settings, kind: ItemKind, id: &str) -> Result<(), ShopError> {
    let item = find(kind, id)?;
    if is_owned(settings, kind, id) {
        return Err(ShopError::AlreadyOwned(id.to_string()));
    }
    if settings.coins < item.price {
        return Err(ShopError::InsufficientCoins {
            price: item.price,
            balance: settings.coins,
        });
    }

    settings.coins -= item.price;
    match kind {
        ItemKind::Bird => settings.unlocked_birds.push(item.id.to_string()),
        ItemKind::Obstacle => settings.unlocked_obstacles.push(item.id.to_string()),
    }
    log::info!("Bought {:?} {} for {} coins", kind, item.id, item.price);
    Ok(())
}

/// Select an owned item as the active cosmetic
pub fn equip(settings: &mut Settings, kind: ItemKind, id: &str) -> Result<(), ShopError> {
    find(kind, id)?;
    if !is_owned(settings, kind, id) {
        return Err(ShopError::NotOwned(id.to_string()));
    }
    match kind {
        ItemKind::Bird => settings.current_bird = id.to_string(),
        ItemKind::Obstacle => settings.current_obstacle = id.to_string(),
    }
    Ok(())
}
