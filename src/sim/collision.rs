//! Projectile/balloon collision detection and resolution
//!
//! Checks run on post-motion positions, so a hit registers on the same tick
//! the projectile reaches the balloon.

use glam::Vec2;

use super::state::{GameEvent, SessionState};

/// Whether a projectile at `projectile` overlaps a balloon centered at
/// `balloon` with radius `size`. Touching exactly at the threshold misses.
#[inline]
pub fn projectile_hits_balloon(
    projectile: Vec2,
    balloon: Vec2,
    size: f32,
    projectile_radius: f32,
) -> bool {
    projectile.distance(balloon) < size + projectile_radius
}

/// A (projectile id, balloon id) match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub projectile_id: u32,
    pub balloon_id: u32,
}

/// Find every hit this tick.
///
/// One projectile may pop several overlapping balloons, but each balloon is
/// popped at most once, by the lowest-id projectile touching it.
pub fn find_hits(state: &SessionState) -> Vec<Hit> {
    let radius = state.config.projectile_radius;
    let mut hits: Vec<Hit> = Vec::new();

    for projectile in &state.projectiles {
        for balloon in &state.balloons {
            if hits.iter().any(|h| h.balloon_id == balloon.id) {
                continue;
            }
            if projectile_hits_balloon(projectile.pos, balloon.pos, balloon.size, radius) {
                hits.push(Hit {
                    projectile_id: projectile.id,
                    balloon_id: balloon.id,
                });
            }
        }
    }

    hits
}

/// Pop every hit balloon, replace it, consume the projectile and score it
pub fn resolve_collisions(state: &mut SessionState, now_ms: f64) {
    let hits = find_hits(state);
    if hits.is_empty() {
        return;
    }

    for hit in &hits {
        let Some(idx) = state.balloons.iter().position(|b| b.id == hit.balloon_id) else {
            continue;
        };
        let points = state.balloons[idx].points;

        // Net balloon count stays constant
        let fresh = state.create_balloon(state.viewport.height);
        state.balloons[idx] = fresh;

        let award = state
            .scoring
            .register_hit(points, now_ms, state.config.combo_timeout_ms);
        log::debug!(
            "Popped balloon {} for {} (x{})",
            hit.balloon_id,
            award.awarded,
            award.multiplier
        );

        state.events.push(GameEvent::BalloonPopped {
            balloon_id: hit.balloon_id,
            projectile_id: hit.projectile_id,
            awarded: award.awarded,
            multiplier: award.multiplier,
        });
        if award.new_high_score {
            state
                .events
                .push(GameEvent::NewHighScore(state.scoring.high_score.value));
        }
    }

    state
        .projectiles
        .retain(|p| !hits.iter().any(|h| h.projectile_id == p.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::{Balloon, BalloonColor, Direction, Pattern, Projectile, Viewport};

    fn session() -> SessionState {
        let mut state =
            SessionState::new(11, GameConfig::default(), Viewport::new(800.0, 600.0), 0);
        state.balloons.clear();
        state
    }

    fn place_balloon(state: &mut SessionState, x: f32, y: f32, size: f32, points: u32) -> u32 {
        let id = state.next_entity_id();
        state.balloons.push(Balloon {
            id,
            pos: Vec2::new(x, y),
            color: BalloonColor::Coral,
            speed: 1.0,
            size,
            points,
            pattern: Pattern::Solid,
            direction: Direction::Straight,
            amplitude: 0.0,
            frequency: 0.0,
            phase: 0.0,
        });
        id
    }

    fn place_projectile(state: &mut SessionState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: Vec2::new(x, y),
            speed: 10.0,
        });
        id
    }

    #[test]
    fn test_hit_threshold() {
        let b = Vec2::new(100.0, 100.0);
        // size 40 + radius 5 = 45
        assert!(projectile_hits_balloon(Vec2::new(144.9, 100.0), b, 40.0, 5.0));
        assert!(!projectile_hits_balloon(Vec2::new(145.0, 100.0), b, 40.0, 5.0));
        assert!(!projectile_hits_balloon(Vec2::new(100.0, 160.0), b, 40.0, 5.0));
        // 27-36-45 triangle lands exactly on the threshold
        assert!(!projectile_hits_balloon(Vec2::new(127.0, 136.0), b, 40.0, 5.0));
    }

    #[test]
    fn test_resolve_single_hit() {
        let mut state = session();
        let balloon = place_balloon(&mut state, 200.0, 300.0, 40.0, 12);
        let other = place_balloon(&mut state, 600.0, 300.0, 40.0, 12);
        let projectile = place_projectile(&mut state, 210.0, 310.0);

        resolve_collisions(&mut state, 1000.0);

        assert_eq!(state.scoring.score, 12);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.balloons.len(), 2);
        assert!(state.balloons.iter().all(|b| b.id != balloon));
        assert!(state.balloons.iter().any(|b| b.id == other));
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::BalloonPopped {
                    balloon_id: balloon,
                    projectile_id: projectile,
                    awarded: 12,
                    multiplier: 1,
                },
                GameEvent::NewHighScore(12),
            ]
        );
    }

    #[test]
    fn test_projectile_pops_overlapping_balloons() {
        let mut state = session();
        place_balloon(&mut state, 200.0, 300.0, 40.0, 10);
        place_balloon(&mut state, 230.0, 300.0, 40.0, 10);
        place_projectile(&mut state, 215.0, 300.0);

        resolve_collisions(&mut state, 0.0);

        // Same tick, so the second pop extends the combo
        assert_eq!(state.scoring.score, 10 + 20);
        assert_eq!(state.balloons.len(), 2);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_balloon_popped_once() {
        let mut state = session();
        place_balloon(&mut state, 200.0, 300.0, 40.0, 10);
        let first = place_projectile(&mut state, 200.0, 300.0);
        let second = place_projectile(&mut state, 205.0, 300.0);

        let hits = find_hits(&state);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].projectile_id, first);

        resolve_collisions(&mut state, 0.0);
        assert_eq!(state.balloons.len(), 1);
        assert_eq!(state.scoring.score, 10);
        // The second projectile keeps flying
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].id, second);
    }

    #[test]
    fn test_no_hits_no_changes() {
        let mut state = session();
        place_balloon(&mut state, 200.0, 100.0, 40.0, 10);
        place_projectile(&mut state, 600.0, 500.0);

        resolve_collisions(&mut state, 0.0);
        assert_eq!(state.scoring.score, 0);
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.drain_events().is_empty());
    }
}
