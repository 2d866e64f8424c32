//! Ball integration and the per-step physics sequence
//!
//! A single Euler step per advance; velocity is pre-scaled by the tick
//! duration at construction, so integration is a pure addition. All
//! randomness (serve direction) draws from the caller's seeded RNG so a
//! run is reproducible from its seed.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::collision::{resolve_paddle_collision, resolve_wall_collision};
use super::state::{Ball, PaddleRect, Side};
use crate::config::GameConfig;

/// The four serve directions as per-component sign pairs
const SERVE_DIRECTIONS: [(f32, f32); 4] = [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];

/// Integrate the ball position by its current velocity.
///
/// On the first advance after a serve the velocity signs are re-randomized
/// from the four diagonals, once; speed magnitude is untouched.
pub fn advance(ball: &mut Ball, rng: &mut impl Rng) {
    debug_assert!(ball.pos.is_finite() && ball.vel.is_finite());

    if ball.serving {
        let (sx, sy) = SERVE_DIRECTIONS
            .choose(rng)
            .copied()
            .unwrap_or(SERVE_DIRECTIONS[0]);
        ball.vel.x *= sx;
        ball.vel.y *= sy;
        ball.serving = false;
    }

    ball.pos += ball.vel;
}

/// One full ball step: advance, then resolve wall and paddle collisions
/// against the post-move position. Returns the paddle hit, if any.
pub fn step(
    ball: &mut Ball,
    left: &PaddleRect,
    right: &PaddleRect,
    field_height: f32,
    rng: &mut impl Rng,
) -> Option<Side> {
    advance(ball, rng);
    resolve_wall_collision(ball, field_height);
    resolve_paddle_collision(ball, left, right)
}

/// Recenter the ball after a point and prime the next serve.
///
/// Velocity keeps its magnitude; the direction is re-randomized by the
/// next `advance`, not here, so the serve applies exactly once.
pub fn reset_after_point(ball: &mut Ball, cfg: &GameConfig) {
    ball.pos.x = cfg.field_width / 2.0;
    ball.pos.y = cfg.field_height / 2.0;
    ball.serving = true;
}
