//! Numeric configuration for the simulation and the learner
//!
//! Everything here is a pure knob: no file or environment coupling. The
//! structs are serde-serializable so a driver can load them from JSON, and
//! `TrainConfig::validate` fails fast once at session start rather than
//! guarding per tick.

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Field, paddle, and ball geometry plus match rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Fixed x position of the left paddle
    pub left_paddle_x: f32,
    /// Fixed x position of the right paddle
    pub right_paddle_x: f32,
    /// Base speed for ball and paddles, field units per second
    pub game_speed: f32,
    /// Fixed simulation timestep
    pub tick_dt: f32,
    pub ball_radius: f32,
    pub points_to_win: u32,
    /// Sub-steps a chosen action is held before the next decision
    pub action_repeat: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            left_paddle_x: LEFT_PADDLE_X,
            right_paddle_x: RIGHT_PADDLE_X,
            game_speed: GAME_SPEED,
            tick_dt: TICK_DT,
            ball_radius: BALL_RADIUS,
            points_to_win: POINTS_TO_WIN,
            action_repeat: ACTION_REPEAT,
        }
    }
}

impl GameConfig {
    /// Per-substep displacement for ball and paddles
    #[inline]
    pub fn step_speed(&self) -> f32 {
        self.game_speed * self.tick_dt
    }
}

/// Bin sizes for each positional state feature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinSizes {
    pub paddle_y: f32,
    /// Paddle-to-ball vertical offset
    pub ball_offset: f32,
    pub ball_x: f32,
    pub ball_y: f32,
}

impl Default for BinSizes {
    fn default() -> Self {
        Self {
            paddle_y: BIN_SIZE,
            ball_offset: BIN_SIZE,
            ball_x: BIN_SIZE,
            ball_y: BIN_SIZE,
        }
    }
}

/// Q-learning hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate α
    pub alpha: f32,
    /// Discount factor γ
    pub gamma: f32,
    /// Initial exploration rate ε
    pub epsilon: f32,
    /// Multiplicative ε decay, applied once per episode
    pub epsilon_decay: f32,
    /// ε floor
    pub epsilon_min: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: ALPHA,
            gamma: GAMMA,
            epsilon: EPSILON_START,
            epsilon_decay: EPSILON_DECAY,
            epsilon_min: EPSILON_MIN,
        }
    }
}

/// Reward shaping magnitudes; the orchestrator applies the signs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Own paddle hits the ball
    pub paddle_hit: f32,
    /// Ball exits on own side (negated) / opposing side (positive)
    pub side_out: f32,
    /// Net paddle-to-ball distance change this tick
    pub approach: f32,
    /// Terminal win (negated for the loser)
    pub win: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            paddle_hit: REWARD_PADDLE_HIT,
            side_out: REWARD_SIDE_OUT,
            approach: REWARD_APPROACH,
            win: REWARD_WIN,
        }
    }
}

/// Full training session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainConfig {
    pub game: GameConfig,
    pub bins: BinSizes,
    pub agent: AgentConfig,
    pub rewards: RewardConfig,
    #[serde(default)]
    pub episodes: u32,
    #[serde(default)]
    pub seed: u64,
}

impl TrainConfig {
    /// Validate every knob once at session start.
    pub fn validate(&self) -> Result<()> {
        let g = &self.game;
        ensure!(g.field_width > 0.0, "field_width must be positive");
        ensure!(g.field_height > 0.0, "field_height must be positive");
        ensure!(g.paddle_width > 0.0, "paddle_width must be positive");
        ensure!(g.paddle_height > 0.0, "paddle_height must be positive");
        ensure!(
            g.paddle_height < g.field_height,
            "paddle_height must fit inside the field"
        );
        ensure!(g.ball_radius > 0.0, "ball_radius must be positive");
        ensure!(g.game_speed > 0.0, "game_speed must be positive");
        ensure!(g.tick_dt > 0.0, "tick_dt must be positive");
        ensure!(g.points_to_win > 0, "points_to_win must be at least 1");
        ensure!(g.action_repeat > 0, "action_repeat must be at least 1");
        ensure!(
            g.left_paddle_x < g.right_paddle_x,
            "left paddle must sit left of the right paddle"
        );
        ensure!(
            g.left_paddle_x >= 0.0 && g.right_paddle_x + g.paddle_width <= g.field_width,
            "paddles must sit inside the field"
        );

        for (name, bin) in [
            ("paddle_y", self.bins.paddle_y),
            ("ball_offset", self.bins.ball_offset),
            ("ball_x", self.bins.ball_x),
            ("ball_y", self.bins.ball_y),
        ] {
            ensure!(bin > 0.0, "bin size {name} must be positive");
        }

        let a = &self.agent;
        ensure!(
            (0.0..=1.0).contains(&a.alpha),
            "alpha must be within [0, 1]"
        );
        ensure!(
            (0.0..=1.0).contains(&a.gamma),
            "gamma must be within [0, 1]"
        );
        ensure!(
            (0.0..=1.0).contains(&a.epsilon),
            "epsilon must be within [0, 1]"
        );
        ensure!(
            (0.0..=1.0).contains(&a.epsilon_decay),
            "epsilon_decay must be within [0, 1]"
        );
        ensure!(
            (0.0..=1.0).contains(&a.epsilon_min),
            "epsilon_min must be within [0, 1]"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        TrainConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let mut cfg = TrainConfig::default();
        cfg.game.field_height = -800.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_bin_size() {
        let mut cfg = TrainConfig::default();
        cfg.bins.ball_x = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_alpha() {
        let mut cfg = TrainConfig::default();
        cfg.agent.alpha = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_swapped_paddles() {
        let mut cfg = TrainConfig::default();
        cfg.game.left_paddle_x = 930.0;
        cfg.game.right_paddle_x = 30.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_points_to_win() {
        let mut cfg = TrainConfig::default();
        cfg.game.points_to_win = 0;
        assert!(cfg.validate().is_err());
    }
}
