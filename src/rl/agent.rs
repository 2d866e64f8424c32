//! Tabular Q-learning agent
//!
//! A sparse map from (state key, action) to a value estimate, default 0
//! for anything unseen. One agent exclusively owns one table; the trainer
//! keeps one per paddle side and never shares them. Values are unbounded
//! reals with no clipping; convergence against a non-stationary opponent
//! is not guaranteed and not expected.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::discretize::StateKey;
use crate::config::AgentConfig;
use crate::sim::Action;

/// The trained action set. `Stay` is deliberately excluded.
pub const ACTIONS: [Action; 2] = [Action::Up, Action::Down];

/// One exported table entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QEntry {
    pub state: StateKey,
    pub action: Action,
    pub value: f32,
}

/// Order-independent key-value blob for persisting a table across runs.
/// The owning persistence layer decides where the bytes go.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub entries: Vec<QEntry>,
}

/// Epsilon-greedy Q-learning agent over one sparse table
#[derive(Debug, Clone)]
pub struct QAgent {
    q: HashMap<(StateKey, Action), f32>,
    alpha: f32,
    gamma: f32,
    epsilon: f32,
    epsilon_decay: f32,
    epsilon_min: f32,
}

impl QAgent {
    pub fn new(cfg: &AgentConfig) -> Self {
        Self {
            q: HashMap::new(),
            alpha: cfg.alpha,
            gamma: cfg.gamma,
            epsilon: cfg.epsilon,
            epsilon_decay: cfg.epsilon_decay,
            epsilon_min: cfg.epsilon_min,
        }
    }

    /// Current exploration rate
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Stored value for a pair, 0 if unseen. Read-only probe: never inserts.
    pub fn get(&self, state: StateKey, action: Action) -> f32 {
        self.q.get(&(state, action)).copied().unwrap_or(0.0)
    }

    /// Pre-seed both trained actions for a state to 0, guaranteeing
    /// iteration-stable defaults before any further operation.
    pub fn ensure_state_actions(&mut self, state: StateKey) {
        for action in ACTIONS {
            self.q.entry((state, action)).or_insert(0.0);
        }
    }

    /// `max_a Q(state, a)` over the trained actions, 0 when unseen
    pub fn best_future_value(&self, state: StateKey) -> f32 {
        ACTIONS
            .iter()
            .map(|&a| self.get(state, a))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Epsilon-greedy selection: explore uniformly with probability ε,
    /// otherwise take the strictly-greater action. Exact ties break by a
    /// uniform random draw among the tied set, never by a fixed preference,
    /// so the agent cannot degenerate to one action before the values
    /// differentiate.
    pub fn choose_action(&self, state: StateKey, rng: &mut impl Rng) -> Action {
        if self.epsilon > 0.0 && rng.random::<f32>() <= self.epsilon {
            return ACTIONS.choose(rng).copied().unwrap_or(Action::Up);
        }

        let best = self.best_future_value(state);
        let tied: Vec<Action> = ACTIONS
            .iter()
            .copied()
            .filter(|&a| self.get(state, a) == best)
            .collect();

        match tied.as_slice() {
            [only] => *only,
            _ => tied.choose(rng).copied().unwrap_or(Action::Up),
        }
    }

    /// One-step tabular temporal-difference update:
    /// `Q(s,a) += α · (r + γ·max_a' Q(s',a') − Q(s,a))`, stored at the old
    /// state. Both states are pre-seeded first so iteration order over the
    /// table stays stable across runs.
    pub fn update(&mut self, old_state: StateKey, new_state: StateKey, reward: f32, action: Action) {
        self.ensure_state_actions(old_state);
        self.ensure_state_actions(new_state);

        let old_q = self.get(old_state, action);
        let target = reward + self.gamma * self.best_future_value(new_state);
        let new_value = old_q + self.alpha * (target - old_q);
        self.q.insert((old_state, action), new_value);
    }

    /// Multiplicative ε decay with a floor. Call once per completed
    /// episode, not per tick.
    pub fn decay_epsilon(&mut self) {
        if self.epsilon > self.epsilon_min {
            self.epsilon = (self.epsilon * self.epsilon_decay).max(self.epsilon_min);
        }
    }

    /// Number of stored (state, action) entries
    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// Iterate over all stored entries (arbitrary order)
    pub fn entries(&self) -> impl Iterator<Item = QEntry> + '_ {
        self.q.iter().map(|(&(state, action), &value)| QEntry {
            state,
            action,
            value,
        })
    }

    /// Export the table as an order-independent entry list
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            entries: self.entries().collect(),
        }
    }

    /// Replace the table with a previously exported snapshot
    pub fn restore(&mut self, snapshot: TableSnapshot) {
        self.q = snapshot
            .entries
            .into_iter()
            .map(|e| ((e.state, e.action), e.value))
            .collect();
    }
}
