//! Motion engine
//!
//! Advances balloons and projectiles by one tick. Speeds are in units per
//! tick; `y` grows downward, so rising means decreasing `y`.

use super::state::{Balloon, Direction, GameEvent, SessionState};
use crate::clamp_x;
use crate::consts::{ZIGZAG_FREQUENCY, ZIGZAG_STEP};

/// Horizontal displacement for this tick, sampled at the balloon's current `y`
pub fn horizontal_offset(balloon: &Balloon) -> f32 {
    match balloon.direction {
        Direction::Straight => 0.0,
        Direction::Zigzag => (balloon.pos.y * ZIGZAG_FREQUENCY).sin() * ZIGZAG_STEP,
        Direction::Sine => {
            (balloon.pos.y * balloon.frequency + balloon.phase).sin() * balloon.amplitude
        }
    }
}

/// Move one balloon. Returns true once it is fully above the top edge.
pub fn advance_balloon(balloon: &mut Balloon, viewport_width: f32) -> bool {
    let x = balloon.pos.x + horizontal_offset(balloon);
    balloon.pos.x = clamp_x(x, balloon.size, viewport_width);
    balloon.pos.y -= balloon.speed;
    balloon.pos.y + balloon.size < 0.0
}

/// Move every balloon; escaped balloons are replaced by fresh ones entering
/// from the bottom edge.
pub fn advance_balloons(state: &mut SessionState) {
    let width = state.viewport.width;
    let mut escaped = Vec::new();

    for (idx, balloon) in state.balloons.iter_mut().enumerate() {
        if advance_balloon(balloon, width) {
            escaped.push(idx);
        }
    }

    for idx in escaped {
        let fresh = state.create_balloon(state.viewport.height);
        let old = std::mem::replace(&mut state.balloons[idx], fresh);
        state.events.push(GameEvent::BalloonEscaped { balloon_id: old.id });
    }
}

/// Move every projectile up; drop those that reached the top edge
pub fn advance_projectiles(state: &mut SessionState) {
    for projectile in &mut state.projectiles {
        projectile.pos.y -= projectile.speed;
    }
    state.projectiles.retain(|p| p.pos.y > 0.0);
}
