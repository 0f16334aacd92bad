//! Game tuning
//!
//! Persisted separately from the high score in LocalStorage, as JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bound on a configured balloon count
const MAX_BALLOONS_LIMIT: usize = MAX_BALLOONS * 10;

/// Tunable gameplay values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    /// Balloons alive at any moment
    pub max_balloons: usize,

    // === Scoring ===
    /// Maximum gap between hits (ms) that keeps a combo alive
    pub combo_timeout_ms: f64,

    // === Projectiles ===
    /// Upward speed, units per tick
    pub projectile_speed: f32,
    /// Collision radius added to the balloon radius
    pub projectile_radius: f32,

    // === Balloons ===
    pub min_size: f32,
    pub max_size: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_balloons: MAX_BALLOONS,
            combo_timeout_ms: COMBO_TIMEOUT_MS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            min_size: BALLOON_MIN_SIZE,
            max_size: BALLOON_MAX_SIZE,
            min_speed: BALLOON_MIN_SPEED,
            max_speed: BALLOON_MAX_SPEED,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Repair non-finite values, inverted ranges and unbounded counts
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(1..=MAX_BALLOONS_LIMIT).contains(&self.max_balloons) {
            self.max_balloons = defaults.max_balloons;
        }

        if !self.combo_timeout_ms.is_finite() || self.combo_timeout_ms < 0.0 {
            self.combo_timeout_ms = defaults.combo_timeout_ms;
        }
        if !self.projectile_speed.is_finite() || self.projectile_speed <= 0.0 {
            self.projectile_speed = defaults.projectile_speed;
        }
        if !self.projectile_radius.is_finite() || self.projectile_radius < 0.0 {
            self.projectile_radius = defaults.projectile_radius;
        }
        if !(self.min_size.is_finite() && self.max_size.is_finite())
            || self.min_size <= 0.0
            || self.max_size < self.min_size
        {
            self.min_size = defaults.min_size;
            self.max_size = defaults.max_size;
        }
        if !(self.min_speed.is_finite() && self.max_speed.is_finite())
            || self.min_speed <= 0.0
            || self.max_speed < self.min_speed
        {
            self.min_speed = defaults.min_speed;
            self.max_speed = defaults.max_speed;
        }
        self
    }

    /// Reward for a balloon of the given radius (smaller is worth more)
    pub fn points_for_size(&self, size: f32) -> u32 {
        let steps = ((self.max_size - size) / POINTS_SIZE_STEP).floor();
        if steps.is_finite() && steps > 0.0 {
            BASE_POINTS + steps as u32
        } else {
            BASE_POINTS
        }
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(CONFIG_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring malformed config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
