//! Balloon Pop - a browser balloon-popping arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring)
//! - `platform`: Frame clock and session driver shared by web and native
//! - `persistence`: Key-value storage for the high score
//! - `config`: Data-driven game tuning

pub mod config;
pub mod highscore;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use config::GameConfig;
pub use highscore::HighScore;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step (60 Hz, one display refresh on most screens)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Balloons alive at any moment
    pub const MAX_BALLOONS: usize = 15;
    /// Gap between hits (ms) that still extends a combo
    pub const COMBO_TIMEOUT_MS: f64 = 2000.0;

    /// Projectile defaults (units per tick)
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Balloon radius range [min, max)
    pub const BALLOON_MIN_SIZE: f32 = 30.0;
    pub const BALLOON_MAX_SIZE: f32 = 50.0;
    /// Balloon rise speed range [min, max), units per tick
    pub const BALLOON_MIN_SPEED: f32 = 1.0;
    pub const BALLOON_MAX_SPEED: f32 = 3.0;

    /// Zigzag sway: x += sin(y * ZIGZAG_FREQUENCY) * ZIGZAG_STEP
    pub const ZIGZAG_FREQUENCY: f32 = 0.05;
    pub const ZIGZAG_STEP: f32 = 2.0;

    /// Sway amplitude = AMPLITUDE_BASE + uniform(0, AMPLITUDE_SPREAD)
    pub const AMPLITUDE_BASE: f32 = 50.0;
    pub const AMPLITUDE_SPREAD: f32 = 50.0;
    /// Sine frequency = FREQUENCY_BASE + uniform(0, FREQUENCY_SPREAD)
    pub const FREQUENCY_BASE: f32 = 0.005;
    pub const FREQUENCY_SPREAD: f32 = 0.01;

    /// Base reward for the largest balloon; +1 per POINTS_SIZE_STEP smaller
    pub const BASE_POINTS: u32 = 10;
    pub const POINTS_SIZE_STEP: f32 = 5.0;

    /// Viewport used natively and before the canvas reports its size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;

    /// LocalStorage keys
    pub const HIGH_SCORE_KEY: &str = "balloonGameHighScore";
    pub const CONFIG_KEY: &str = "balloonGameConfig";
}

/// Uniform sample in `[lo, hi)`; a non-positive span yields `lo`.
///
/// Never panics, unlike `random_range` on an empty range, so a hidden tab
/// with a zero-sized viewport can still spawn.
#[inline]
pub fn uniform<R: rand::Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) {
        return lo;
    }
    // Rounding can land exactly on `hi`; keep the range half-open
    let v = lo + rng.random::<f32>() * span;
    if v < hi { v } else { lo }
}

/// Clamp a balloon's x into `[size, width - size]`.
///
/// When the viewport is narrower than the balloon the range is empty and
/// the balloon is pinned to the middle of the viewport (0 for a
/// non-positive width).
#[inline]
pub fn clamp_x(x: f32, size: f32, width: f32) -> f32 {
    if !(width > 0.0) {
        return 0.0;
    }
    let lo = size;
    let hi = width - size;
    if !(hi >= lo) {
        return width / 2.0;
    }
    if x.is_nan() { lo } else { x.clamp(lo, hi) }
}
