//! Score and combo tracking
//!
//! A hit landing within the combo window of the previous hit extends the
//! streak and multiplies its reward; a longer gap starts a new streak.

use serde::{Deserialize, Serialize};

use crate::highscore::HighScore;

/// Outcome of a single scoring hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitAward {
    /// Points added to the score
    pub awarded: u64,
    /// Multiplier applied (`combo + 1` after the hit)
    pub multiplier: u32,
    /// The score passed the previous best
    pub new_high_score: bool,
}

/// Running score, combo streak and best score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    /// Consecutive in-window hits after the first of a streak
    pub combo: u32,
    /// Timestamp (ms) of the most recent scoring hit
    pub last_hit_ms: Option<f64>,
    pub high_score: HighScore,
}

impl ScoreBoard {
    pub fn new(high_score: u64) -> Self {
        Self {
            high_score: HighScore::new(high_score),
            ..Default::default()
        }
    }

    /// Displayed multiplier
    pub fn multiplier(&self) -> u32 {
        self.combo + 1
    }

    /// Score a hit on a balloon worth `points` at time `now_ms`
    pub fn register_hit(&mut self, points: u32, now_ms: f64, combo_timeout_ms: f64) -> HitAward {
        let in_window = self
            .last_hit_ms
            .is_some_and(|last| now_ms - last < combo_timeout_ms);

        if in_window {
            self.combo += 1;
        } else {
            self.combo = 0;
        }
        self.last_hit_ms = Some(now_ms);

        let multiplier = self.multiplier();
        let awarded = points as u64 * multiplier as u64;
        self.score += awarded;

        let new_high_score = self.high_score.record(self.score);

        HitAward {
            awarded,
            multiplier,
            new_high_score,
        }
    }

    /// Clear score and streak for a new run; the best score survives
    pub fn reset(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.last_hit_ms = None;
    }
}
