//! Entity factory
//!
//! Pure balloon construction from an injected random source.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Balloon, BalloonColor, Direction, Pattern, Viewport};
use crate::config::GameConfig;
use crate::consts::*;
use crate::{clamp_x, uniform};

/// Uniform pick from a non-empty table
fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, table: &[T]) -> T {
    table[rng.random_range(0..table.len())]
}

/// Build a balloon entering at height `y`.
///
/// `x` is drawn from `[0, width - size)` and then clamped into
/// `[size, width - size]`, so a fresh balloon already satisfies the
/// bounds the motion engine maintains.
pub fn create_balloon<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    config: &GameConfig,
    viewport: Viewport,
    y: f32,
) -> Balloon {
    let size = uniform(rng, config.min_size, config.max_size);
    let pattern = pick(rng, &Pattern::ALL);
    let direction = pick(rng, &Direction::ALL);
    let x = uniform(rng, 0.0, viewport.width - size);
    let color = pick(rng, &BalloonColor::ALL);
    let speed = uniform(rng, config.min_speed, config.max_speed);

    let amplitude = match direction {
        Direction::Zigzag | Direction::Sine => {
            AMPLITUDE_BASE + uniform(rng, 0.0, AMPLITUDE_SPREAD)
        }
        Direction::Straight => 0.0,
    };
    let frequency = match direction {
        Direction::Sine => FREQUENCY_BASE + uniform(rng, 0.0, FREQUENCY_SPREAD),
        _ => 0.0,
    };
    let phase = uniform(rng, 0.0, TAU);

    Balloon {
        id,
        pos: Vec2::new(clamp_x(x, size, viewport.width), y),
        color,
        speed,
        size,
        points: config.points_for_size(size),
        pattern,
        direction,
        amplitude,
        frequency,
        phase,
    }
}
