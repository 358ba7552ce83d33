//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Measured delta times only, clamped non-negative
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, wall clock, or platform dependencies

pub mod clock;
pub mod collision;
pub mod input;
pub mod score;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{rect_circle_hit, rects_overlap};
pub use input::{Dir, InputState};
pub use score::ScoreKeeper;
pub use snapshot::{ObstacleView, RenderSnapshot};
pub use spawn::Spawner;
pub use state::{
    CashKind, FieldBounds, GameEvent, GameState, Obstacle, ObstacleShape, ObstacleTag, Player,
    RoundPhase,
};
pub use tick::{TickInput, tick};
