//! Game entities and per-match state
//!
//! Value-like structs only: position, velocity, bounding geometry, score.
//! All behavior beyond bounds clamping lives in `collision` and `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Which paddle a thing belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// One paddle displacement per decision step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    /// Exists in the design space but is excluded from the trained set
    Stay,
}

/// Discrete events emitted by one simulation tick, consumed by reward
/// shaping and optionally by an external display/log collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LeftHit,
    RightHit,
    LeftMiss,
    RightMiss,
    LeftWin,
    RightWin,
}

/// Axis-aligned paddle bounds used for collision checks
#[derive(Debug, Clone, Copy)]
pub struct PaddleRect {
    pub min: Vec2,
    pub max: Vec2,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Per-step velocity (pre-scaled by the tick duration)
    pub vel: Vec2,
    pub radius: f32,
    /// Set on serve; the next advance re-randomizes the direction once
    pub serving: bool,
}

impl Ball {
    /// Ball at field center with per-step speed in both components.
    /// The serve flag is set so the first advance picks the diagonal.
    pub fn new(cfg: &GameConfig) -> Self {
        let speed = cfg.step_speed();
        Self {
            pos: Vec2::new(cfg.field_width / 2.0, cfg.field_height / 2.0),
            vel: Vec2::splat(speed),
            radius: cfg.ball_radius,
            serving: true,
        }
    }
}

/// A paddle; `x` is fixed per side, `y` is clamped to the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Per-substep displacement magnitude
    pub speed: f32,
    pub side: Side,
}

impl Paddle {
    /// Paddle for the given side at the vertical starting position
    pub fn new(cfg: &GameConfig, side: Side) -> Self {
        let x = match side {
            Side::Left => cfg.left_paddle_x,
            Side::Right => cfg.right_paddle_x,
        };
        Self {
            x,
            y: cfg.field_height / 2.0 - 100.0,
            width: cfg.paddle_width,
            height: cfg.paddle_height,
            speed: cfg.step_speed(),
            side,
        }
    }

    /// Bounds for collision detection
    #[inline]
    pub fn rect(&self) -> PaddleRect {
        PaddleRect {
            min: Vec2::new(self.x, self.y),
            max: Vec2::new(self.x + self.width, self.y + self.height),
        }
    }

    /// Top-left corner, the reference point for approach shaping
    #[inline]
    pub fn corner(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Apply one action for `repeat` physics sub-steps, clamping after
    /// every sub-step so a fast paddle never leaves the field.
    pub fn apply_action(&mut self, action: Action, repeat: u32, field_height: f32) {
        for _ in 0..repeat {
            match action {
                Action::Up => self.y -= self.speed,
                Action::Down => self.y += self.speed,
                Action::Stay => continue,
            }
            self.clamp_to_field(field_height);
        }
    }

    /// Clamp y to `[0, field_height - height]`
    pub fn clamp_to_field(&mut self, field_height: f32) {
        self.y = self.y.clamp(0.0, field_height - self.height);
    }
}

/// Score counters for one episode; discarded at episode end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub left_score: u32,
    pub right_score: u32,
    pub points_to_win: u32,
    /// Ticks elapsed this episode
    pub frames: u64,
}

impl MatchState {
    pub fn new(points_to_win: u32) -> Self {
        Self {
            left_score: 0,
            right_score: 0,
            points_to_win,
            frames: 0,
        }
    }

    /// Credit a point to the given side
    pub fn record_point(&mut self, side: Side) {
        match side {
            Side::Left => self.left_score += 1,
            Side::Right => self.right_score += 1,
        }
    }

    /// The side that reached the threshold, if any
    pub fn winner(&self) -> Option<Side> {
        if self.left_score >= self.points_to_win {
            Some(Side::Left)
        } else if self.right_score >= self.points_to_win {
            Some(Side::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_clamps_to_field() {
        let cfg = GameConfig::default();
        let mut paddle = Paddle::new(&cfg, Side::Left);

        paddle.y = -50.0;
        paddle.clamp_to_field(cfg.field_height);
        assert_eq!(paddle.y, 0.0);

        paddle.y = cfg.field_height;
        paddle.clamp_to_field(cfg.field_height);
        assert_eq!(paddle.y, cfg.field_height - paddle.height);
    }

    #[test]
    fn test_apply_action_moves_and_clamps() {
        let cfg = GameConfig::default();
        let mut paddle = Paddle::new(&cfg, Side::Right);
        let start = paddle.y;

        paddle.apply_action(Action::Down, 3, cfg.field_height);
        assert!((paddle.y - (start + 3.0 * paddle.speed)).abs() < 1e-4);

        // Stay never moves
        let held = paddle.y;
        paddle.apply_action(Action::Stay, 10, cfg.field_height);
        assert_eq!(paddle.y, held);

        // Holding Up long enough pins the paddle at the top
        paddle.apply_action(Action::Up, 100_000, cfg.field_height);
        assert_eq!(paddle.y, 0.0);
    }

    #[test]
    fn test_match_state_winner() {
        let mut m = MatchState::new(2);
        assert_eq!(m.winner(), None);
        m.record_point(Side::Right);
        assert_eq!(m.winner(), None);
        m.record_point(Side::Right);
        assert_eq!(m.winner(), Some(Side::Right));
        assert_eq!(m.right_score, 2);
        assert_eq!(m.left_score, 0);
    }
}
