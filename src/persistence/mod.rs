//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Pluggable key-value storage (file on native, LocalStorage on web, memory in tests)
//! - Atomic file writes (tmp → save)
//! - Load failures degrade to defaults instead of aborting the game

pub mod envelope;
pub mod storage;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PersistenceError;

pub use envelope::{SAVE_VERSION, decode, encode};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{MemoryStorage, Storage};

/// Load a value, `None` if nothing is stored under `key`
pub fn load<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    match storage.read(key)? {
        Some(json) => decode(&json).map(Some),
        None => Ok(None),
    }
}

/// Load a value, falling back to `T::default()` on absence or any failure
pub fn load_or_default<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    match load(storage, key) {
        Ok(Some(value)) => {
            log::info!("Loaded {key}");
            value
        }
        Ok(None) => {
            log::info!("No saved {key}, using defaults");
            T::default()
        }
        Err(e) => {
            log::warn!("Failed to load {key} ({e}), using defaults");
            T::default()
        }
    }
}

/// Encode and write a value under `key`
pub fn save<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let json = encode(value)?;
    storage.write(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Wallet {
        coins: u32,
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::default();
        save(&mut storage, "wallet", &Wallet { coins: 42 }).unwrap();
        let loaded: Option<Wallet> = load(&storage, "wallet").unwrap();
        assert_eq!(loaded, Some(Wallet { coins: 42 }));
    }

    #[test]
    fn test_missing_key_loads_default() {
        let storage = MemoryStorage::default();
        let wallet: Wallet = load_or_default(&storage, "wallet");
        assert_eq!(wallet, Wallet::default());
    }

    #[test]
    fn test_corrupt_data_loads_default() {
        let mut storage = MemoryStorage::default();
        storage.write("wallet", "{not json").unwrap();
        assert!(load::<Wallet>(&storage, "wallet").is_err());
        let wallet: Wallet = load_or_default(&storage, "wallet");
        assert_eq!(wallet, Wallet::default());
    }
}
