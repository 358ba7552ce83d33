//! Per-frame simulation tick
//!
//! Advances a session by one measured delta. The shell samples input and
//! the frame clock, calls `tick`, then renders from a snapshot; everything
//! gameplay-visible happens in here.

use super::collision::{rect_circle_hit, rects_overlap};
use super::state::{GameState, ObstacleShape, RoundPhase};
use crate::consts::*;

/// Input commands for a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Net signed movement from `InputState`, in {-1, 0, +1}
    pub movement: i32,
    /// Begin a round (Space/click/tap while idle or game over)
    pub start: bool,
    /// Pause toggle (Space while playing or paused)
    pub pause: bool,
}

/// Advance the game state by one tick.
///
/// Start/pause intents are handled in every phase; the entity and score
/// updates run only while Playing. `dt_ms` is the measured frame delta,
/// clamped non-negative so a clock anomaly can never reverse motion or
/// score.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    let dt = dt_ms.max(0.0);
    let dtf = dt as f32;

    if input.start {
        state.start();
    }
    if input.pause {
        match state.phase {
            RoundPhase::Playing => state.pause(),
            RoundPhase::Paused => state.resume(),
            _ => {}
        }
    }

    if state.phase != RoundPhase::Playing {
        return;
    }
    state.time_ticks += 1;

    // Player movement is per tick of held input, not dt-scaled
    state.player.step(input.movement, state.field);

    // Spawn cadence
    let floored = state.score.floored();
    if state.spawner.should_spawn(dt, floored, &state.profile) {
        let obstacle = state.spawner.spawn(
            &state.profile,
            state.field,
            state.player.center_x(),
            state.score.current(),
            state.time_ticks,
        );
        state.obstacles.push(obstacle);
    }

    // Fall, steer, and re-clamp to the field (the clamp also applies new
    // bounds after a resize)
    let fall_scale = dtf * VERTICAL_SCALE;
    let player_cx = state.player.center_x();
    let tracking = state.profile.tracking;
    let field = state.field;
    for obstacle in &mut state.obstacles {
        obstacle.pos.y += obstacle.fall_speed * fall_scale;

        let mut vx = obstacle.drift;
        if let Some(t) = tracking {
            let offset =
                (player_cx - obstacle.center().x).clamp(-t.offset_clamp, t.offset_clamp);
            vx += offset * t.strength;
        }
        if vx != 0.0 {
            obstacle.pos.x += vx * fall_scale;
        }

        let max_x = (field.width - obstacle.shape.bbox().x).max(0.0);
        obstacle.pos.x = obstacle.pos.x.clamp(0.0, max_x);
    }

    // Prune the fully-fallen
    state.obstacles.retain(|o| !o.is_offscreen(field));

    // A collision settles the round; no score accrues on that tick
    let player_min = state.player.pos;
    let player_size = state.player.size;
    let hit = state.obstacles.iter().any(|o| match o.shape {
        ObstacleShape::Circle { radius } => {
            rect_circle_hit(player_min, player_size, o.center(), radius)
        }
        ObstacleShape::Rect { size } => rects_overlap(player_min, player_size, o.pos, size),
    });
    if hit {
        state.end_round();
        return;
    }

    state.score.tick(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GameEvent, Obstacle, ObstacleTag};
    use crate::tuning::Theme;
    use glam::Vec2;

    /// Session whose spawner can never fire, for deterministic scenarios.
    fn quiet_session(theme: Theme) -> GameState {
        let mut state = GameState::new(1, theme, 0);
        state.profile.spawn_base_ms = 1e9;
        state.profile.spawn_min_ms = 1e9;
        state
    }

    fn start(state: &mut GameState) {
        tick(
            state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            0.0,
        );
    }

    fn obstacle_at(pos: Vec2, radius: f32) -> Obstacle {
        Obstacle {
            pos,
            shape: ObstacleShape::Circle { radius },
            fall_speed: 0.0,
            drift: 0.0,
            tag: ObstacleTag::Hue(200.0),
            spawned_tick: 0,
        }
    }

    #[test]
    fn test_survival_score_accrues_at_rate() {
        let mut state = quiet_session(Theme::Beats);
        start(&mut state);

        for _ in 0..1000 {
            tick(&mut state, &TickInput::default(), 16.0);
        }
        assert_eq!(state.phase, RoundPhase::Playing);
        assert!(state.obstacles.is_empty());
        assert!((state.score.current() - 160.0).abs() < 1e-6);
    }

    #[test]
    fn test_nothing_advances_outside_playing() {
        let mut state = quiet_session(Theme::Beats);
        let resting_x = state.player.pos.x;

        tick(
            &mut state,
            &TickInput {
                movement: 1,
                ..Default::default()
            },
            16.0,
        );
        assert_eq!(state.phase, RoundPhase::Idle);
        assert_eq!(state.player.pos.x, resting_x);
        assert_eq!(state.score.current(), 0.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_player_clamps_at_both_edges() {
        let mut state = quiet_session(Theme::Beats);
        start(&mut state);

        let left = TickInput {
            movement: -1,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &left, 16.0);
        }
        assert_eq!(state.player.pos.x, EDGE_MARGIN);

        let right = TickInput {
            movement: 1,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &right, 16.0);
        }
        let max_x = state.field.width - state.player.size.x - EDGE_MARGIN;
        assert_eq!(state.player.pos.x, max_x);
    }

    #[test]
    fn test_negative_dt_moves_nothing_downward() {
        let mut state = quiet_session(Theme::Beats);
        start(&mut state);
        state.obstacles.push(obstacle_at(Vec2::new(100.0, 50.0), 10.0));

        let before = state.obstacles[0].pos;
        tick(&mut state, &TickInput::default(), -50.0);
        assert_eq!(state.obstacles[0].pos, before);
        assert_eq!(state.score.current(), 0.0);
    }

    #[test]
    fn test_default_cadence_spawns() {
        let mut state = GameState::new(3, Theme::Beats, 0);
        start(&mut state);

        for _ in 0..8 {
            tick(&mut state, &TickInput::default(), 200.0);
        }
        assert!(!state.obstacles.is_empty());
    }

    #[test]
    fn test_obstacles_fall_at_scaled_speed() {
        let mut state = quiet_session(Theme::Beats);
        start(&mut state);
        let mut o = obstacle_at(Vec2::new(100.0, 0.0), 10.0);
        o.fall_speed = 2.0;
        state.obstacles.push(o);

        tick(&mut state, &TickInput::default(), 16.0);
        let expected = 2.0 * 16.0 * VERTICAL_SCALE;
        assert!((state.obstacles[0].pos.y - expected).abs() < 1e-5);
    }

    #[test]
    fn test_collision_ends_round_and_freezes_score() {
        let mut state = quiet_session(Theme::Beats);
        start(&mut state);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 16.0);
        }
        let score_before = state.score.current();

        // Dead center on the player
        let center = state.player.pos + state.player.size / 2.0;
        state.obstacles.push(obstacle_at(center, 5.0));
        tick(&mut state, &TickInput::default(), 16.0);

        assert_eq!(state.phase, RoundPhase::GameOver);
        // The collision tick accrues nothing, so best == floor(score) exactly
        assert_eq!(state.score.current(), score_before);
        assert_eq!(state.score.best(), score_before.floor() as u64);
        // Frozen in place for the game-over screen
        assert_eq!(state.obstacles.len(), 1);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 16.0);
        }
        assert_eq!(state.score.current(), score_before);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_round_over_event_carries_best_improvement() {
        let mut state = quiet_session(Theme::Beats);
        start(&mut state);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 16.0);
        }
        state.take_events();
        let expected = state.score.floored();
        assert!(expected > 0);

        let center = state.player.pos + state.player.size / 2.0;
        state.obstacles.push(obstacle_at(center, 5.0));
        tick(&mut state, &TickInput::default(), 16.0);

        assert_eq!(
            state.take_events(),
            vec![GameEvent::RoundOver {
                score: expected,
                new_best: Some(expected)
            }]
        );
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut state = quiet_session(Theme::Beats);
        start(&mut state);
        state.obstacles.push(obstacle_at(Vec2::new(100.0, 50.0), 10.0));
        state.obstacles[0].fall_speed = 2.0;
        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), 16.0);
        }

        let score = state.score.current();
        let positions: Vec<Vec2> = state.obstacles.iter().map(|o| o.pos).collect();
        let toggle = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &toggle, 16.0);
        assert_eq!(state.phase, RoundPhase::Paused);
        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), 16.0);
        }
        assert_eq!(state.score.current(), score);
        let frozen: Vec<Vec2> = state.obstacles.iter().map(|o| o.pos).collect();
        assert_eq!(frozen, positions);

        tick(&mut state, &toggle, 16.0);
        assert_eq!(state.phase, RoundPhase::Playing);
        tick(&mut state, &TickInput::default(), 16.0);
        assert!(state.score.current() > score);
    }

    #[test]
    fn test_pause_request_outside_round_is_noop() {
        let mut state = quiet_session(Theme::Beats);
        let toggle = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &toggle, 16.0);
        assert_eq!(state.phase, RoundPhase::Idle);
    }

    #[test]
    fn test_prune_is_idempotent() {
        let mut state = quiet_session(Theme::Beats);
        start(&mut state);
        let floor = state.field.height + PRUNE_MARGIN;
        state.obstacles.push(obstacle_at(Vec2::new(100.0, floor - 1.0), 10.0));
        state.obstacles.push(obstacle_at(Vec2::new(200.0, floor + 1.0), 10.0));

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, 100.0);

        // No advance between prunes: nothing further to remove
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_resize_reclamps_player_and_obstacles() {
        let mut state = quiet_session(Theme::Beats);
        start(&mut state);
        let right = TickInput {
            movement: 1,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &right, 16.0);
        }
        state.obstacles.push(obstacle_at(Vec2::new(560.0, 50.0), 10.0));

        state.set_field_size(400.0, 360.0);
        tick(&mut state, &TickInput::default(), 16.0);

        let max_player_x = 400.0 - state.player.size.x - EDGE_MARGIN;
        assert_eq!(state.player.pos.x, max_player_x);
        let bbox = state.obstacles[0].shape.bbox();
        assert!(state.obstacles[0].pos.x + bbox.x <= 400.0);
    }

    #[test]
    fn test_money_obstacles_steer_toward_player_bounded() {
        let mut state = quiet_session(Theme::Money);
        start(&mut state);
        let tracking = state.profile.tracking.unwrap();

        state.obstacles.push(Obstacle {
            pos: Vec2::new(500.0, 50.0),
            shape: ObstacleShape::Rect {
                size: Vec2::new(30.0, 20.0),
            },
            fall_speed: 2.0,
            drift: 0.0,
            tag: ObstacleTag::Cash(crate::sim::state::CashKind::Bill),
            spawned_tick: 0,
        });

        // Player center is far left of the obstacle: it steps left, but
        // never faster than the clamped attraction allows
        let before = state.obstacles[0].pos.x;
        tick(&mut state, &TickInput::default(), 16.0);
        let after = state.obstacles[0].pos.x;
        let max_step = tracking.offset_clamp * tracking.strength * 16.0 * VERTICAL_SCALE;
        assert!(after < before);
        assert!(before - after <= max_step + 1e-5);
    }

    #[test]
    fn test_same_seed_and_inputs_replay_identically() {
        let script = |state: &mut GameState| {
            start(state);
            for i in 0..600u32 {
                let movement = match i % 7 {
                    0 | 1 => -1,
                    2 | 3 | 4 => 1,
                    _ => 0,
                };
                tick(
                    state,
                    &TickInput {
                        movement,
                        ..Default::default()
                    },
                    16.0,
                );
            }
        };

        let mut a = GameState::new(99, Theme::Money, 0);
        let mut b = GameState::new(99, Theme::Money, 0);
        script(&mut a);
        script(&mut b);

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score.current(), b.score.current());
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.player, b.player);
    }
}
