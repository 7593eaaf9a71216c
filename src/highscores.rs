//! High score leaderboard system
//!
//! Persisted under the `highscores` key, tracks the top 10 sessions.

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persistence::{self, Storage};
use crate::sim::SessionSummary;
use crate::tuning::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub difficulty: Difficulty,
    pub perfect_passes: u32,
    pub max_combo: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a finished session (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_session(&mut self, summary: &SessionSummary, timestamp: f64) -> Option<usize> {
        if !self.qualifies(summary.score) {
            return None;
        }

        let entry = HighScoreEntry {
            score: summary.score,
            difficulty: summary.difficulty,
            perfect_passes: summary.perfect_passes,
            max_combo: summary.max_combo,
            timestamp,
        };

        // Ties keep the older entry ahead
        let pos = self.entries.iter().position(|e| summary.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load(storage: &dyn Storage) -> Self {
        let scores: Self = persistence::load_or_default(storage, Self::STORAGE_KEY);
        log::info!("{} high scores on the board", scores.entries.len());
        scores
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), PersistenceError> {
        persistence::save(storage, Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Current time as Unix milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    fn summary(score: u32) -> SessionSummary {
        SessionSummary {
            difficulty: Difficulty::Normal,
            score,
            perfect_passes: 1,
            near_misses: 0,
            max_combo: 2,
            coins_earned: 4,
            cause: None,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_sorted_insert() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_session(&summary(10), 1.0), Some(1));
        assert_eq!(scores.add_session(&summary(30), 2.0), Some(1));
        assert_eq!(scores.add_session(&summary(20), 3.0), Some(2));
        assert_eq!(scores.add_session(&summary(20), 4.0), Some(3));
        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![30, 20, 20, 10]);
        assert_eq!(scores.entries[1].timestamp, 3.0);
        assert_eq!(scores.top_score(), Some(30));
    }

    #[test]
    fn test_board_capped() {
        let mut scores = HighScores::new();
        for s in 1..=15 {
            scores.add_session(&summary(s), s as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(6));
        assert!(!scores.qualifies(6));
        assert_eq!(scores.potential_rank(7), Some(10));
        assert_eq!(scores.add_session(&summary(5), 0.0), None);
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::default();
        let mut scores = HighScores::new();
        scores.add_session(&summary(42), 1234.0);
        scores.save(&mut storage).unwrap();

        let loaded = HighScores::load(&storage);
        assert_eq!(loaded.entries, scores.entries);
    }
}
