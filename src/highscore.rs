//! Best-score tracking
//!
//! A single value persisted as decimal text under one LocalStorage key.

use serde::{Deserialize, Serialize};

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::{ScoreStore, StorageError, format_high_score, parse_high_score};

/// Best score seen across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub value: u64,
}

impl HighScore {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.value
    }

    /// Raise the best to `score` if it beats it. Returns true when it did.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        true
    }

    /// Load the stored best; absent or malformed values count as 0
    pub fn load<S: ScoreStore + ?Sized>(store: &S) -> Self {
        match store.get(HIGH_SCORE_KEY) {
            Ok(Some(text)) => match parse_high_score(&text) {
                Some(value) => {
                    log::info!("Loaded high score {}", value);
                    Self::new(value)
                }
                None => {
                    log::warn!("Ignoring malformed high score {:?}", text);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("High score unavailable: {}", e);
                Self::default()
            }
        }
    }

    /// Write the best to the store
    pub fn save<S: ScoreStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        store.set(HIGH_SCORE_KEY, &format_high_score(self.value))?;
        log::info!("High score saved ({})", self.value);
        Ok(())
    }
}
