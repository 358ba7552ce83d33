//! Directional input aggregation
//!
//! Merges keyboard holds and transient pointer/touch zones into a single
//! signed movement value per tick. The shell maps raw events to
//! `set_held`/`set_zone`; the sim only ever sees the merged result.

use crate::consts::ZONE_EXPIRY_MS;

/// Horizontal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
}

impl Dir {
    fn index(self) -> usize {
        match self {
            Dir::Left => 0,
            Dir::Right => 1,
        }
    }

    fn sign(self) -> i32 {
        match self {
            Dir::Left => -1,
            Dir::Right => 1,
        }
    }
}

/// Aggregated directional intent.
///
/// A side is active while its key is held or its zone deadline has not
/// passed. Zones emulate taps: activation arms a deadline at
/// `now + ZONE_EXPIRY_MS`, re-arming replaces the deadline (never stacks),
/// release clears it immediately, and an unreleased activation expires on
/// its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    held: [bool; 2],
    zone_deadline: [Option<f64>; 2],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard hold state for one direction.
    pub fn set_held(&mut self, dir: Dir, down: bool) {
        self.held[dir.index()] = down;
    }

    /// Pointer/touch zone state for one direction.
    pub fn set_zone(&mut self, dir: Dir, active: bool, now_ms: f64) {
        self.zone_deadline[dir.index()] = if active {
            Some(now_ms + ZONE_EXPIRY_MS)
        } else {
            None
        };
    }

    /// Drop all held keys and zones (round reset, focus loss).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn side_active(&self, dir: Dir, now_ms: f64) -> bool {
        let i = dir.index();
        self.held[i] || self.zone_deadline[i].is_some_and(|deadline| now_ms < deadline)
    }

    /// Net signed movement in {-1, 0, +1}.
    ///
    /// Each side contributes at most one unit no matter how many sources
    /// assert it; opposing sides cancel to zero.
    pub fn movement(&self, now_ms: f64) -> i32 {
        let mut movement = 0;
        for dir in [Dir::Left, Dir::Right] {
            if self.side_active(dir, now_ms) {
                movement += dir.sign();
            }
        }
        movement
    }
}
