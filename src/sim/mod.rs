//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected, seeded RNG only
//! - Time only via the tick input
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod factory;
pub mod motion;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{Hit, find_hits, projectile_hits_balloon, resolve_collisions};
pub use factory::create_balloon;
pub use motion::{advance_balloon, advance_balloons, advance_projectiles};
pub use scoring::{HitAward, ScoreBoard};
pub use state::{
    Balloon, BalloonColor, Direction, GameEvent, GamePhase, Pattern, Projectile, RenderFrame,
    SessionState, Viewport,
};
pub use tick::{TickInput, tick};
