//! QPong - a two-paddle ball game with self-taught paddles
//!
//! Core modules:
//! - `sim`: Deterministic physics (ball integration, collisions, side-outs)
//! - `rl`: State discretization and the tabular Q-learning agent
//! - `train`: Self-play episode loop and reward shaping
//! - `config`: Numeric knobs for the field, the physics, and the learner

pub mod config;
pub mod rl;
pub mod sim;
pub mod train;

pub use config::TrainConfig;
pub use rl::QAgent;
pub use sim::{Ball, GameEvent, Paddle, Side};
pub use train::{EpisodeOutcome, run_episode};

/// Game configuration constants (defaults for the `config` structs)
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Paddle geometry - x positions are fixed per side
    pub const PADDLE_WIDTH: f32 = 30.0;
    pub const PADDLE_HEIGHT: f32 = 130.0;
    pub const LEFT_PADDLE_X: f32 = 30.0;
    pub const RIGHT_PADDLE_X: f32 = 930.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;

    /// Base speed for both ball and paddles, in field units per second.
    /// Per-step displacement is `GAME_SPEED * TICK_DT`.
    pub const GAME_SPEED: f32 = 20.0;
    /// Fixed simulation timestep
    pub const TICK_DT: f32 = 1.0 / 60.0;

    /// Physics sub-steps a chosen action is held before the next decision
    pub const ACTION_REPEAT: u32 = 40;

    /// Points needed to win a match
    pub const POINTS_TO_WIN: u32 = 5;

    /// Bin size shared by the positional state features
    pub const BIN_SIZE: f32 = 10.0;

    /// Q-learning hyperparameter defaults
    pub const ALPHA: f32 = 0.5;
    pub const GAMMA: f32 = 0.9;
    pub const EPSILON_START: f32 = 1.0;
    pub const EPSILON_DECAY: f32 = 0.995;
    pub const EPSILON_MIN: f32 = 0.05;

    /// Reward magnitudes (signs are applied by the orchestrator)
    pub const REWARD_PADDLE_HIT: f32 = 1.0;
    pub const REWARD_SIDE_OUT: f32 = 1.0;
    pub const REWARD_APPROACH: f32 = 0.2;
    pub const REWARD_WIN: f32 = 2.0;
}
