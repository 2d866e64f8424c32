//! Continuous state -> learnable state key
//!
//! Bins the paddle/ball geometry into a small tuple of integers. Pure
//! functions: identical continuous inputs always produce identical keys.

use serde::{Deserialize, Serialize};

use crate::config::BinSizes;
use crate::sim::{Ball, Paddle};

/// `round(value / bin_size)` with round-half-away-from-zero (Rust's
/// `f32::round`; bin boundaries are rarely hit exactly so the tie-break
/// convention is not behaviorally significant).
#[inline]
pub fn discretize(value: f32, bin_size: f32) -> i32 {
    (value / bin_size).round() as i32
}

/// Two-way sign: 1 for positive, -1 otherwise (zero maps to -1).
#[inline]
pub fn sign(value: f32) -> i8 {
    if value > 0.0 { 1 } else { -1 }
}

/// Discretized, hashable summary of paddle/ball geometry.
///
/// Field order is fixed for the lifetime of one Q-table; equality and
/// hashing are structural, so two continuous states that bin to the same
/// tuple are identical to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub paddle_y: i32,
    /// Paddle-to-ball vertical offset
    pub ball_offset: i32,
    pub ball_x: i32,
    pub ball_y: i32,
    pub vx_sign: i8,
    pub vy_sign: i8,
}

impl StateKey {
    /// Observe the game from one paddle's point of view.
    pub fn observe(paddle: &Paddle, ball: &Ball, bins: &BinSizes) -> Self {
        Self {
            paddle_y: discretize(paddle.y, bins.paddle_y),
            ball_offset: discretize(paddle.y - ball.pos.y, bins.ball_offset),
            ball_x: discretize(ball.pos.x, bins.ball_x),
            ball_y: discretize(ball.pos.y, bins.ball_y),
            vx_sign: sign(ball.vel.x),
            vy_sign: sign(ball.vel.y),
        }
    }
}
