//! Session state and core simulation types
//!
//! Everything a tick reads or writes lives in `SessionState`, so the whole
//! simulation can be driven (and replayed) without a display.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::factory::create_balloon;
use super::scoring::ScoreBoard;
use crate::config::GameConfig;
use crate::consts::*;
use crate::uniform;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Balloons rising, player shooting
    Running,
    /// Session ended; the next click restarts
    GameOver,
}

/// Fixed balloon palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalloonColor {
    Coral,
    Turquoise,
    Sky,
    Sage,
    Cream,
    Rose,
}

impl BalloonColor {
    pub const ALL: [BalloonColor; 6] = [
        BalloonColor::Coral,
        BalloonColor::Turquoise,
        BalloonColor::Sky,
        BalloonColor::Sage,
        BalloonColor::Cream,
        BalloonColor::Rose,
    ];

    /// CSS color string
    pub fn hex(self) -> &'static str {
        match self {
            BalloonColor::Coral => "#FF6B6B",
            BalloonColor::Turquoise => "#4ECDC4",
            BalloonColor::Sky => "#45B7D1",
            BalloonColor::Sage => "#96CEB4",
            BalloonColor::Cream => "#FFEEAD",
            BalloonColor::Rose => "#D4A5A5",
        }
    }
}

/// Surface decoration (visual only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    Solid,
    Striped,
    Dotted,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Solid, Pattern::Striped, Pattern::Dotted];
}

/// Horizontal motion rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// No horizontal drift
    Straight,
    /// Small fixed-frequency sway
    Zigzag,
    /// Wide sway shaped by amplitude/frequency/phase
    Sine,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Straight, Direction::Zigzag, Direction::Sine];
}

/// A balloon entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    pub id: u32,
    /// Center, screen coordinates (y grows downward)
    pub pos: Vec2,
    pub color: BalloonColor,
    /// Rise per tick
    pub speed: f32,
    /// Radius; fixed for the balloon's lifetime
    pub size: f32,
    /// Base reward; fixed for the balloon's lifetime
    pub points: u32,
    pub pattern: Pattern,
    pub direction: Direction,
    /// Zero for straight balloons
    pub amplitude: f32,
    /// Zero unless sine
    pub frequency: f32,
    pub phase: f32,
}

/// A projectile fired from the bottom of the screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Rise per tick
    pub speed: f32,
}

/// Visible play-field size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

/// Things that happened during a tick, drained by the session driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Balloon popped by a projectile
    BalloonPopped {
        balloon_id: u32,
        projectile_id: u32,
        awarded: u64,
        multiplier: u32,
    },
    /// Balloon rose past the top edge and was replaced
    BalloonEscaped { balloon_id: u32 },
    /// Running score passed the stored best
    NewHighScore(u64),
    /// Session restarted from GameOver
    Restarted,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Seed the session was created with
    pub seed: u64,
    /// Random source for the entity factory
    pub rng: Pcg32,
    /// Tuning
    pub config: GameConfig,
    /// Current play-field size
    pub viewport: Viewport,
    /// Current phase
    pub phase: GamePhase,
    /// Score, combo and best score
    pub scoring: ScoreBoard,
    /// Crosshair position
    pub aim: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Active balloons (sorted by id for determinism)
    pub balloons: Vec<Balloon>,
    /// Active projectiles (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl SessionState {
    /// Create a running session and seed its balloons
    pub fn new(seed: u64, config: GameConfig, viewport: Viewport, high_score: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config: config.sanitized(),
            viewport,
            phase: GamePhase::Running,
            scoring: ScoreBoard::new(high_score),
            aim: Vec2::ZERO,
            time_ticks: 0,
            balloons: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        state.seed_balloons();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a balloon entering at `y` (does not insert it)
    pub fn create_balloon(&mut self, y: f32) -> Balloon {
        let id = self.next_entity_id();
        create_balloon(&mut self.rng, id, &self.config, self.viewport, y)
    }

    /// Add a fresh balloon just below the bottom edge
    pub fn spawn_balloon(&mut self) -> u32 {
        let balloon = self.create_balloon(self.viewport.height);
        let id = balloon.id;
        self.balloons.push(balloon);
        id
    }

    /// Fill the field with balloons staggered over one screen height below
    /// the bottom edge
    pub fn seed_balloons(&mut self) {
        let height = self.viewport.height;
        for _ in 0..self.config.max_balloons {
            let y = uniform(&mut self.rng, height, height * 2.0);
            let balloon = self.create_balloon(y);
            self.balloons.push(balloon);
        }
    }

    /// Fire a projectile upward from the bottom edge at `x`
    pub fn fire(&mut self, x: f32) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos: Vec2::new(x, self.viewport.height),
            speed: self.config.projectile_speed,
        });
        id
    }

    /// End the session. The simulation never calls this itself.
    pub fn end(&mut self) {
        self.phase = GamePhase::GameOver;
    }

    /// Start over: clear score, combo and entities, keep the best score
    pub fn restart(&mut self) {
        self.scoring.reset();
        self.balloons.clear();
        self.projectiles.clear();
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        self.seed_balloons();
        self.events.push(GameEvent::Restarted);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balloons.sort_by_key(|b| b.id);
        self.projectiles.sort_by_key(|p| p.id);
    }

    /// Snapshot handed to the renderer
    pub fn render_frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            viewport: self.viewport,
            balloons: &self.balloons,
            projectiles: &self.projectiles,
            crosshair: self.aim,
            score: self.scoring.score,
            multiplier: self.scoring.multiplier(),
            high_score: self.scoring.high_score.value,
            phase: self.phase,
        }
    }
}

/// Read-only view of one frame for the rendering collaborator
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub viewport: Viewport,
    pub balloons: &'a [Balloon],
    pub projectiles: &'a [Projectile],
    pub crosshair: Vec2,
    pub score: u64,
    /// Displayed combo multiplier (`combo + 1`)
    pub multiplier: u32,
    pub high_score: u64,
    pub phase: GamePhase,
}
