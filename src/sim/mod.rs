//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities are pre-scaled per step)
//! - Seeded RNG only, passed in by the caller
//! - Fixed left-then-right paddle check order
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{resolve_paddle_collision, resolve_wall_collision, side_out};
pub use state::{Action, Ball, GameEvent, MatchState, Paddle, PaddleRect, Side};
pub use tick::{advance, reset_after_point, step};
