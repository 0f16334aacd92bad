//! Session driver
//!
//! Owns the simulation state and the persistence surface. Input handlers
//! only queue into the pending `TickInput`; `frame` applies the queue at the
//! start of the next tick, so the entity lists are never touched mid-tick.

use glam::Vec2;

use super::clock::FrameClock;
use crate::config::GameConfig;
use crate::highscore::HighScore;
use crate::persistence::ScoreStore;
use crate::sim::{GameEvent, GamePhase, RenderFrame, SessionState, TickInput, Viewport, tick};

/// A running game session bound to a store
pub struct Session<S: ScoreStore> {
    state: SessionState,
    clock: FrameClock,
    pending: TickInput,
    store: S,
    active: bool,
}

impl<S: ScoreStore> Session<S> {
    /// Start a session, reading the stored high score once
    pub fn new(seed: u64, config: GameConfig, viewport: Viewport, store: S) -> Self {
        let high_score = HighScore::load(&store);
        let state = SessionState::new(seed, config, viewport, high_score.value);
        log::info!(
            "Session started (seed {}, {}x{}, high score {})",
            seed,
            viewport.width,
            viewport.height,
            high_score.value
        );

        Self {
            state,
            clock: FrameClock::new(),
            pending: TickInput::default(),
            store,
            active: true,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn render_frame(&self) -> RenderFrame<'_> {
        self.state.render_frame()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Whether frames are still being processed
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pointer moved
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.active {
            return;
        }
        self.pending.aim = Some(Vec2::new(x, y));
    }

    /// Pointer clicked: fires, or restarts after game over
    pub fn click(&mut self, x: f32, y: f32) {
        if !self.active {
            return;
        }
        self.pending.clicks.push(Vec2::new(x, y));
    }

    /// Play field resized
    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.active {
            return;
        }
        self.pending.resize = Some(Viewport::new(width, height));
    }

    /// End the run from outside the simulation
    pub fn end_game(&mut self) {
        self.state.end();
        log::info!("Game over (score {})", self.state.scoring.score);
    }

    /// Process one display frame. Returns the number of ticks run.
    ///
    /// Motion speeds are per 60 Hz step, not per display refresh.
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        if !self.active {
            return 0;
        }

        let steps = self.clock.advance(time_ms);
        for &now_ms in &steps {
            let mut input = std::mem::take(&mut self.pending);
            input.now_ms = now_ms;
            tick(&mut self.state, &input);
        }

        self.handle_events();
        steps.len() as u32
    }

    /// Stop processing frames; later frames and input are ignored
    pub fn teardown(&mut self) {
        if self.active {
            self.active = false;
            self.pending = TickInput::default();
            log::info!("Session torn down");
        }
    }

    /// Pick up again after a teardown (page restored from the back/forward
    /// cache). The time spent away is not simulated.
    pub fn resume(&mut self) {
        if !self.active {
            self.active = true;
            self.clock.reset();
            log::info!("Session resumed");
        }
    }

    fn handle_events(&mut self) {
        let mut best = None;
        for event in self.state.drain_events() {
            match event {
                GameEvent::NewHighScore(score) => best = Some(score),
                GameEvent::Restarted => self.clock.reset(),
                _ => {}
            }
        }

        // Fire-and-forget: a failed write must not end the session
        if let Some(score) = best {
            log::info!("New high score: {}", score);
            if let Err(e) = HighScore::new(score).save(&mut self.store) {
                log::warn!("Failed to save high score: {}", e);
            }
        }
    }
}
