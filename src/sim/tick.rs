//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::motion::{advance_balloons, advance_projectiles};
use super::state::{GamePhase, SessionState, Viewport};

/// Input queued between ticks, applied at the start of the next one
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tick timestamp in milliseconds (drives the combo window)
    pub now_ms: f64,
    /// Latest pointer position
    pub aim: Option<Vec2>,
    /// Clicks in arrival order (fire, or restart when the session is over)
    pub clicks: Vec<Vec2>,
    /// New viewport size after a resize
    pub resize: Option<Viewport>,
}

impl TickInput {
    pub fn at(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Default::default()
        }
    }

    /// Whether any input is queued
    pub fn is_empty(&self) -> bool {
        self.aim.is_none() && self.clicks.is_empty() && self.resize.is_none()
    }
}

/// Advance the session by one tick
pub fn tick(state: &mut SessionState, input: &TickInput) {
    // Resizing only moves spawn and clamp bounds
    if let Some(viewport) = input.resize {
        state.viewport = viewport;
    }
    if let Some(aim) = input.aim {
        state.aim = aim;
    }
    for click in &input.clicks {
        match state.phase {
            GamePhase::GameOver => {
                state.restart();
                log::info!("Session restarted");
            }
            GamePhase::Running => {
                state.fire(click.x);
            }
        }
    }

    // Don't tick once the session is over
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    advance_balloons(state);
    advance_projectiles(state);
    resolve_collisions(state, input.now_ms);

    // Ensure deterministic ordering
    state.normalize_order();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::*;
    use crate::sim::collision::projectile_hits_balloon;
    use crate::sim::state::{Balloon, BalloonColor, Direction, GameEvent, Pattern, Projectile};

    fn session(seed: u64) -> SessionState {
        SessionState::new(seed, GameConfig::default(), Viewport::new(800.0, 600.0), 0)
    }

    fn click(x: f32) -> TickInput {
        TickInput {
            clicks: vec![Vec2::new(x, 300.0)],
            ..Default::default()
        }
    }

    #[test]
    fn test_balloon_count_invariant() {
        let mut state = session(12345);
        for i in 0..5000u32 {
            let mut input = TickInput::at(i as f64 * SIM_DT_MS);
            if i % 7 == 0 {
                input.clicks.push(Vec2::new((i * 37 % 800) as f32, 0.0));
            }
            tick(&mut state, &input);
            assert_eq!(state.balloons.len(), MAX_BALLOONS);
        }
        // Shots were taken and some of them landed
        assert!(state.scoring.score > 0);
    }

    #[test]
    fn test_clamp_invariant_across_ticks() {
        let mut state = session(777);
        for i in 0..2000 {
            tick(&mut state, &TickInput::at(i as f64));
            for b in &state.balloons {
                assert!(b.pos.x >= b.size && b.pos.x <= 800.0 - b.size);
            }
        }
    }

    #[test]
    fn test_size_and_points_never_change() {
        let mut state = session(31);
        let before: Vec<(u32, f32, u32)> =
            state.balloons.iter().map(|b| (b.id, b.size, b.points)).collect();
        for i in 0..50 {
            tick(&mut state, &TickInput::at(i as f64));
        }
        for (id, size, points) in before {
            if let Some(b) = state.balloons.iter().find(|b| b.id == id) {
                assert_eq!(b.size, size);
                assert_eq!(b.points, points);
            }
        }
    }

    #[test]
    fn test_straight_balloons_hold_x() {
        let mut state = session(99);
        state.balloons[0].direction = Direction::Straight;
        state.balloons[0].amplitude = 0.0;
        state.balloons[0].frequency = 0.0;
        let straight: Vec<(u32, f32)> = state
            .balloons
            .iter()
            .filter(|b| b.direction == Direction::Straight)
            .map(|b| (b.id, b.pos.x))
            .collect();

        for i in 0..100 {
            tick(&mut state, &TickInput::at(i as f64));
        }
        for (id, x) in straight {
            let b = state.balloons.iter().find(|b| b.id == id).unwrap();
            assert_eq!(b.pos.x, x);
        }
    }

    #[test]
    fn test_fire_and_travel() {
        let mut state = session(5);
        state.balloons.clear();
        tick(&mut state, &click(400.0));
        assert_eq!(state.projectiles.len(), 1);
        // Spawned at the bottom edge, then moved within the same tick
        assert_eq!(state.projectiles[0].pos, Vec2::new(400.0, 590.0));

        for _ in 0..59 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_collision_uses_post_motion_positions() {
        let mut state = session(42);
        state.balloons.clear();
        let balloon_id = state.next_entity_id();
        state.balloons.push(Balloon {
            id: balloon_id,
            pos: Vec2::new(400.0, 300.0),
            color: BalloonColor::Sky,
            speed: 1.0,
            size: 40.0,
            points: 14,
            pattern: Pattern::Solid,
            direction: Direction::Straight,
            amplitude: 0.0,
            frequency: 0.0,
            phase: 0.0,
        });
        let projectile_id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id: projectile_id,
            pos: Vec2::new(400.0, 345.0),
            speed: 10.0,
        });

        // 45 apart before moving: just out of reach
        assert!(!projectile_hits_balloon(
            state.projectiles[0].pos,
            state.balloons[0].pos,
            40.0,
            PROJECTILE_RADIUS
        ));

        // After one step they are 36 apart
        tick(&mut state, &TickInput::at(0.0));
        assert_eq!(state.scoring.score, 14);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.balloons.len(), 1);
        assert_ne!(state.balloons[0].id, balloon_id);
        assert!(state.drain_events().contains(&GameEvent::BalloonPopped {
            balloon_id,
            projectile_id,
            awarded: 14,
            multiplier: 1,
        }));
    }

    #[test]
    fn test_aim_updates_crosshair() {
        let mut state = session(6);
        let input = TickInput {
            aim: Some(Vec2::new(10.0, 20.0)),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.render_frame().crosshair, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_resize_keeps_entities() {
        let mut state = session(8);
        let ids: Vec<u32> = state.balloons.iter().map(|b| b.id).collect();
        let input = TickInput {
            resize: Some(Viewport::new(400.0, 300.0)),
            ..Default::default()
        };
        tick(&mut state, &input);

        let after: Vec<u32> = state.balloons.iter().map(|b| b.id).collect();
        assert_eq!(ids, after);
        for b in &state.balloons {
            assert!(b.pos.x <= 400.0 - b.size);
        }
    }

    #[test]
    fn test_hidden_tab_viewport() {
        let mut state = session(10);
        let input = TickInput {
            resize: Some(Viewport::new(0.0, 0.0)),
            clicks: vec![Vec2::ZERO],
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input);
        }
        assert_eq!(state.balloons.len(), MAX_BALLOONS);
        for b in &state.balloons {
            assert!(b.pos.x.is_finite() && b.pos.y.is_finite());
        }
    }

    #[test]
    fn test_endless_mode_never_ends() {
        // No loss condition: only an external `end()` reaches GameOver
        let mut state = session(2024);
        for i in 0..10_000 {
            tick(&mut state, &TickInput::at(i as f64 * SIM_DT_MS));
            assert_eq!(state.phase, GamePhase::Running);
        }
    }

    #[test]
    fn test_game_over_freezes_and_click_restarts() {
        let mut state = session(3);
        tick(&mut state, &click(100.0));
        state.scoring.score = 150;
        state.scoring.combo = 4;
        state.end();

        let frozen: Vec<_> = state.balloons.iter().map(|b| b.pos).collect();
        tick(&mut state, &TickInput::default());
        let after: Vec<_> = state.balloons.iter().map(|b| b.pos).collect();
        assert_eq!(frozen, after);

        state.drain_events();
        tick(&mut state, &click(100.0));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.scoring.score, 0);
        assert_eq!(state.scoring.combo, 0);
        assert_eq!(state.balloons.len(), MAX_BALLOONS);
        // The restarting click does not fire
        assert!(state.projectiles.is_empty());
        assert!(state.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut state1 = session(99999);
        let mut state2 = session(99999);

        for i in 0..600u32 {
            let mut input = TickInput::at(i as f64 * SIM_DT_MS);
            if i % 13 == 0 {
                input.clicks.push(Vec2::new((i % 800) as f32, 0.0));
            }
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.scoring.score, state2.scoring.score);
        assert_eq!(state1.balloons, state2.balloons);
        assert_eq!(state1.projectiles, state2.projectiles);
    }
}
