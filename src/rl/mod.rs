//! Reinforcement learning: state discretization and the tabular agent

pub mod agent;
pub mod discretize;

pub use agent::{ACTIONS, QAgent, QEntry, TableSnapshot};
pub use discretize::{StateKey, discretize, sign};
