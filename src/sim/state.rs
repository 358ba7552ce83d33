//! Game state and core simulation types
//!
//! One `GameState` is one session: the play field, the player, the obstacle
//! collection, scoring, and the round phase machine, owned by the shell loop
//! and mutated only through `tick` and the transition methods here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::score::ScoreKeeper;
use super::spawn::Spawner;
use crate::consts::*;
use crate::tuning::{ObstacleProfile, Theme};

/// Current phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Menu overlay up, nothing simulated yet
    Idle,
    /// Active gameplay
    Playing,
    /// Frozen mid-round
    Paused,
    /// Round ended by a collision
    GameOver,
}

/// Play-field dimensions (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

/// The player's sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal pixels per tick of held input
    pub speed: f32,
}

impl Player {
    /// Centered on the field, standing on the baseline.
    pub fn centered(field: FieldBounds) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new(
                (field.width - size.x) / 2.0,
                field.height - PLAYER_BASELINE,
            ),
            size,
            speed: PLAYER_SPEED,
        }
    }

    /// Apply one tick of signed movement, then clamp to the field.
    pub fn step(&mut self, movement: i32, field: FieldBounds) {
        self.pos.x += movement as f32 * self.speed;
        self.clamp_to(field);
    }

    /// Keep the sprite inside the playable strip. Degenerate fields leave
    /// the sprite pinned at the left margin rather than panicking.
    pub fn clamp_to(&mut self, field: FieldBounds) {
        let max_x = (field.width - self.size.x - EDGE_MARGIN).max(EDGE_MARGIN);
        self.pos.x = self.pos.x.clamp(EDGE_MARGIN, max_x);
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// Obstacle geometry, positioned by its bounding-box top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    Circle { radius: f32 },
    Rect { size: Vec2 },
}

impl ObstacleShape {
    /// Bounding-box extent.
    pub fn bbox(&self) -> Vec2 {
        match self {
            ObstacleShape::Circle { radius } => Vec2::splat(radius * 2.0),
            ObstacleShape::Rect { size } => *size,
        }
    }
}

/// Cash sprite kinds for the money theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashKind {
    Coin,
    Bill,
}

/// Per-obstacle rendering hint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleTag {
    /// HSL hue for the beat glow
    Hue(f32),
    Cash(CashKind),
}

/// A falling obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Bounding-box top-left corner
    pub pos: Vec2,
    pub shape: ObstacleShape,
    /// Fall speed (pixels per ms, pre-scaled by VERTICAL_SCALE)
    pub fall_speed: f32,
    /// Sideways drift speed, zero for straight fallers
    #[serde(default)]
    pub drift: f32,
    pub tag: ObstacleTag,
    /// Tick the spawner created this obstacle on
    pub spawned_tick: u64,
}

impl Obstacle {
    pub fn center(&self) -> Vec2 {
        self.pos + self.shape.bbox() / 2.0
    }

    /// True once the obstacle sits fully below the field plus the prune
    /// margin.
    pub fn is_offscreen(&self, field: FieldBounds) -> bool {
        self.pos.y > field.height + PRUNE_MARGIN
    }
}

/// Things the shell reacts to (logging, best-score persistence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted,
    /// Round ended; `new_best` carries an improved best to persist
    RoundOver { score: u64, new_best: Option<u64> },
}

/// Complete session state for one game.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Selected theme (fixed for the session)
    pub theme: Theme,
    /// Active profile derived from the theme
    pub profile: ObstacleProfile,
    /// Current play-field dimensions
    pub field: FieldBounds,
    /// Current phase
    pub phase: RoundPhase,
    /// Player sprite
    pub player: Player,
    /// Falling obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Spawn cadence and session RNG
    pub spawner: Spawner,
    /// Survival score and best tracking
    pub score: ScoreKeeper,
    /// Ticks simulated while Playing
    pub time_ticks: u64,
    /// Events since the shell last drained them
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session in the Idle phase. `best` is the previously
    /// persisted best score (0 when absent).
    pub fn new(seed: u64, theme: Theme, best: u64) -> Self {
        let field = FieldBounds::default();
        Self {
            seed,
            theme,
            profile: theme.profile(),
            field,
            phase: RoundPhase::Idle,
            player: Player::centered(field),
            obstacles: Vec::new(),
            spawner: Spawner::new(seed),
            score: ScoreKeeper::new(best),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Begin a round from Idle or GameOver. Anything else is a no-op.
    pub fn start(&mut self) {
        match self.phase {
            RoundPhase::Idle | RoundPhase::GameOver => {
                self.reset_round();
                self.phase = RoundPhase::Playing;
                self.push_event(GameEvent::RoundStarted);
            }
            _ => {}
        }
    }

    /// Freeze a running round. No-op outside Playing.
    pub fn pause(&mut self) {
        if self.phase == RoundPhase::Playing {
            self.phase = RoundPhase::Paused;
        }
    }

    /// Continue a paused round. No-op outside Paused.
    pub fn resume(&mut self) {
        if self.phase == RoundPhase::Paused {
            self.phase = RoundPhase::Playing;
        }
    }

    /// Collision outcome: settle the score once and end the round. The
    /// obstacle collection stays in place, frozen, until the next start.
    pub(crate) fn end_round(&mut self) {
        if self.phase != RoundPhase::Playing {
            return;
        }
        let new_best = self.score.finalize();
        self.phase = RoundPhase::GameOver;
        let score = self.score.floored();
        self.push_event(GameEvent::RoundOver { score, new_best });
    }

    /// Adopt new field dimensions from a resize notification. Non-positive
    /// sizes are ignored; player and obstacles re-clamp on the next tick.
    pub fn set_field_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.field = FieldBounds { width, height };
        }
    }

    fn reset_round(&mut self) {
        self.obstacles.clear();
        self.spawner.reset_timer();
        self.score.reset();
        self.player = Player::centered(self.field);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain events accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
