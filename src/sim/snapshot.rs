//! Read-only frame snapshot for the renderer
//!
//! Copies the drawable subset of the game state so the renderer and HUD
//! never reach into the simulation directly.

use glam::Vec2;

use super::state::{GameState, ObstacleShape, ObstacleTag, RoundPhase};
use crate::tuning::Theme;

/// One drawable obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub pos: Vec2,
    pub shape: ObstacleShape,
    pub tag: ObstacleTag,
}

/// Everything a frame needs to draw, in spawn order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub theme: Theme,
    pub field: Vec2,
    pub phase: RoundPhase,
    pub player_pos: Vec2,
    pub player_size: Vec2,
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub best: u64,
}

impl GameState {
    /// Build the drawable view of the current state.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            theme: self.theme,
            field: Vec2::new(self.field.width, self.field.height),
            phase: self.phase,
            player_pos: self.player.pos,
            player_size: self.player.size,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    pos: o.pos,
                    shape: o.shape,
                    tag: o.tag,
                })
                .collect(),
            score: self.score.floored(),
            best: self.score.best(),
        }
    }
}
