//! Obstacle spawning
//!
//! Cadence timer plus the randomized parameter draws for new obstacles. All
//! randomness flows through the session's seeded PRNG, so a session replays
//! identically from its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{CashKind, FieldBounds, Obstacle, ObstacleShape, ObstacleTag};
use crate::consts::*;
use crate::tuning::{ObstacleProfile, ShapeSpec, TagSpec};

/// Spawn cadence and randomness for one session.
#[derive(Debug, Clone)]
pub struct Spawner {
    timer_ms: f64,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            timer_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Zero the cadence timer (round start).
    pub fn reset_timer(&mut self) {
        self.timer_ms = 0.0;
    }

    /// Accumulate dt and report whether the cadence fired. The interval
    /// shrinks with score down to the profile floor; firing resets the
    /// timer.
    pub fn should_spawn(
        &mut self,
        dt_ms: f64,
        floored_score: u64,
        profile: &ObstacleProfile,
    ) -> bool {
        self.timer_ms += dt_ms;
        if self.timer_ms > profile.spawn_interval_ms(floored_score) {
            self.timer_ms = 0.0;
            true
        } else {
            false
        }
    }

    /// Draw one obstacle from the profile distributions, placed fully above
    /// the field top inside the safe horizontal band.
    pub fn spawn(
        &mut self,
        profile: &ObstacleProfile,
        field: FieldBounds,
        player_center_x: f32,
        score: f64,
        tick: u64,
    ) -> Obstacle {
        let shape = match profile.shape {
            ShapeSpec::Circle { diameter } => ObstacleShape::Circle {
                radius: self.uniform(diameter) / 2.0,
            },
            ShapeSpec::Rect { width, height } => ObstacleShape::Rect {
                size: Vec2::new(self.uniform(width), self.uniform(height)),
            },
        };
        let bbox = shape.bbox();

        let max_x = (field.width - SPAWN_EDGE_MARGIN - bbox.x).max(SPAWN_EDGE_MARGIN);
        let x = if max_x <= SPAWN_EDGE_MARGIN {
            SPAWN_EDGE_MARGIN
        } else {
            match profile.tracking {
                // Player-seeking placement: centered on the player, jittered
                Some(t) if self.rng.random_bool(t.bias_probability) => {
                    let jitter = self.uniform((-t.spawn_jitter, t.spawn_jitter));
                    (player_center_x - bbox.x / 2.0 + jitter).clamp(SPAWN_EDGE_MARGIN, max_x)
                }
                _ => self.rng.random_range(SPAWN_EDGE_MARGIN..max_x),
            }
        };

        let fall_speed = self.uniform(profile.speed_base) + profile.speed_bonus(score);

        let drift = match profile.tracking {
            Some(t) => self.uniform(t.drift_range),
            None => 0.0,
        };

        let tag = match profile.tag {
            TagSpec::Hue { range } => ObstacleTag::Hue(self.uniform(range)),
            TagSpec::Cash { coin_probability } => {
                ObstacleTag::Cash(if self.rng.random_bool(coin_probability) {
                    CashKind::Coin
                } else {
                    CashKind::Bill
                })
            }
        };

        Obstacle {
            pos: Vec2::new(x, -bbox.y - SPAWN_DROP_GAP),
            shape,
            fall_speed,
            drift,
            tag,
            spawned_tick: tick,
        }
    }

    /// Uniform draw over a half-open range; collapsed ranges yield the low
    /// end instead of panicking.
    fn uniform(&mut self, (lo, hi): (f32, f32)) -> f32 {
        if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            lo
        }
    }
}
