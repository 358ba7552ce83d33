//! Data-driven theme configuration
//!
//! Everything that differs between the two obstacle themes lives here:
//! shape family, size and speed ranges, spawn cadence, visual tag, and the
//! money theme's player-tracking parameters. The simulation reads a profile
//! and never branches on the theme itself.

use serde::{Deserialize, Serialize};

/// Selectable obstacle themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Beats,
    Money,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Beats => "beats",
            Theme::Money => "money",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beats" | "beat" => Some(Theme::Beats),
            "money" | "cash" => Some(Theme::Money),
            _ => None,
        }
    }

    pub fn profile(&self) -> ObstacleProfile {
        match self {
            Theme::Beats => ObstacleProfile::beats(),
            Theme::Money => ObstacleProfile::money(),
        }
    }
}

/// Shape family a theme spawns, with its dimension ranges (px, half-open).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeSpec {
    Circle { diameter: (f32, f32) },
    Rect { width: (f32, f32), height: (f32, f32) },
}

/// How spawned obstacles get their visual tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TagSpec {
    /// HSL glow hue, uniform in the range
    Hue { range: (f32, f32) },
    /// Cash sprite kind, coin with the given probability, otherwise bill
    Cash { coin_probability: f64 },
}

/// Player-seeking behavior (the money theme's harder obstacles).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackingProfile {
    /// Probability a spawn is centered on the player instead of uniform
    pub bias_probability: f64,
    /// Horizontal jitter around the player for biased spawns (px)
    pub spawn_jitter: f32,
    /// Sideways drift speed range (same units as fall speed)
    pub drift_range: (f32, f32),
    /// Attraction strength applied to the clamped player offset
    pub strength: f32,
    /// Clamp on the player offset feeding the attraction term (px)
    pub offset_clamp: f32,
}

/// Per-theme spawn and motion configuration.
///
/// Fall speed of a spawn is `uniform(speed_base) + min(score /
/// speed_score_divisor, speed_bonus_cap)`: the score bonus asymptotes at
/// the cap so obstacles never become undodgeable. The spawn interval is
/// `max(spawn_min_ms, spawn_base_ms - floor(score) * spawn_per_point_ms)`,
/// the difficulty curve with a floor against spawn storms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleProfile {
    pub shape: ShapeSpec,
    pub tag: TagSpec,
    pub speed_base: (f32, f32),
    pub speed_score_divisor: f64,
    pub speed_bonus_cap: f32,
    pub spawn_base_ms: f64,
    pub spawn_per_point_ms: f64,
    pub spawn_min_ms: f64,
    /// Player-seeking behavior; `None` spawns straight fallers
    pub tracking: Option<TrackingProfile>,
}

impl Default for ObstacleProfile {
    fn default() -> Self {
        Self::beats()
    }
}

impl ObstacleProfile {
    /// Glowing circles falling straight down.
    pub fn beats() -> Self {
        Self {
            shape: ShapeSpec::Circle {
                diameter: (18.0, 58.0),
            },
            tag: TagSpec::Hue {
                range: (180.0, 240.0),
            },
            speed_base: (1.2, 4.2),
            speed_score_divisor: 100.0,
            speed_bonus_cap: 3.0,
            spawn_base_ms: 1000.0,
            spawn_per_point_ms: 3.0,
            spawn_min_ms: 400.0,
            tracking: None,
        }
    }

    /// Drifting cash rectangles that steer toward the player.
    pub fn money() -> Self {
        Self {
            shape: ShapeSpec::Rect {
                width: (24.0, 64.0),
                height: (14.0, 34.0),
            },
            tag: TagSpec::Cash {
                coin_probability: 0.3,
            },
            speed_base: (1.4, 4.0),
            speed_score_divisor: 80.0,
            speed_bonus_cap: 3.5,
            spawn_base_ms: 900.0,
            spawn_per_point_ms: 4.0,
            spawn_min_ms: 450.0,
            tracking: Some(TrackingProfile {
                bias_probability: 0.35,
                spawn_jitter: 60.0,
                drift_range: (-0.5, 0.5),
                strength: 0.02,
                offset_clamp: 40.0,
            }),
        }
    }

    /// Spawn interval for the current score (ms).
    pub fn spawn_interval_ms(&self, floored_score: u64) -> f64 {
        (self.spawn_base_ms - floored_score as f64 * self.spawn_per_point_ms).max(self.spawn_min_ms)
    }

    /// Score-scaled portion of the fall speed, capped.
    pub fn speed_bonus(&self, score: f64) -> f32 {
        ((score / self.speed_score_divisor) as f32).min(self.speed_bonus_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_str() {
        assert_eq!(Theme::from_str("beats"), Some(Theme::Beats));
        assert_eq!(Theme::from_str("Money"), Some(Theme::Money));
        assert_eq!(Theme::from_str("cash"), Some(Theme::Money));
        assert_eq!(Theme::from_str("disco"), None);
    }

    #[test]
    fn test_spawn_interval_shrinks_to_floor() {
        let profile = ObstacleProfile::beats();
        assert_eq!(profile.spawn_interval_ms(0), 1000.0);
        assert_eq!(profile.spawn_interval_ms(100), 700.0);
        // 1000 - 200*3 = 400 exactly at the floor, beyond it stays there
        assert_eq!(profile.spawn_interval_ms(200), 400.0);
        assert_eq!(profile.spawn_interval_ms(100_000), 400.0);
    }

    #[test]
    fn test_speed_bonus_asymptotes_at_cap() {
        for profile in [ObstacleProfile::beats(), ObstacleProfile::money()] {
            assert_eq!(profile.speed_bonus(0.0), 0.0);
            let near = profile.speed_bonus(profile.speed_score_divisor);
            assert!((near - 1.0).abs() < 1e-6);
            assert_eq!(profile.speed_bonus(1e12), profile.speed_bonus_cap);
        }
    }
}
