//! Dodgefall - a falling-obstacle dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, input, spawning, collisions, scoring)
//! - `renderer`: 2D canvas rendering (wasm only)
//! - `tuning`: Data-driven theme profiles
//! - `best_score`: Persisted best-score store

pub mod best_score;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use best_score::{MemoryStore, ScoreStore};
pub use tuning::{ObstacleProfile, Theme};

/// Game configuration constants
pub mod consts {
    /// Play-field fallback dimensions (logical pixels)
    pub const DEFAULT_FIELD_WIDTH: f32 = 600.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 360.0;

    /// Player sprite geometry
    pub const PLAYER_WIDTH: f32 = 44.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    /// Horizontal pixels moved per tick of held input
    pub const PLAYER_SPEED: f32 = 7.0;
    /// Player rect top sits this far above the field bottom
    pub const PLAYER_BASELINE: f32 = 48.0;

    /// Player keep-out margin at the left/right field edges
    pub const EDGE_MARGIN: f32 = 10.0;
    /// Obstacles spawn at least this far inside the field edges
    pub const SPAWN_EDGE_MARGIN: f32 = 20.0;
    /// Obstacles spawn this far above the field top
    pub const SPAWN_DROP_GAP: f32 = 10.0;
    /// Obstacles are pruned once this far below the field bottom
    pub const PRUNE_MARGIN: f32 = 60.0;

    /// Converts obstacle speed units to pixels per millisecond of fall
    pub const VERTICAL_SCALE: f32 = 0.12;
    /// Survival score points per millisecond while playing
    pub const SCORE_RATE: f64 = 0.01;

    /// Pointer/touch zone auto-expiry (milliseconds)
    pub const ZONE_EXPIRY_MS: f64 = 120.0;
    /// Frame deltas above this are clamped (background-tab recovery)
    pub const MAX_FRAME_DT_MS: f64 = 100.0;
}
