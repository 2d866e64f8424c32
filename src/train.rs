//! Self-play training orchestrator
//!
//! Runs repeated episodes of the paddle game, driving the physics engine
//! tick by tick, querying both agents for actions, shaping rewards from
//! the tick's events, and terminating an episode when either side reaches
//! the points-to-win threshold. The physics and the agents never call
//! each other; everything is mediated here.
//!
//! Per-tick order is fixed and part of the behavioral contract:
//! 1. pre-move collision check against current positions (events discarded)
//! 2. discretize state for both sides
//! 3. each agent chooses an action for its own state
//! 4. apply each action `action_repeat` sub-steps
//! 5. advance the ball and re-resolve collisions (post-move check)
//! 6. discretize new state for both sides
//! 7. shaped rewards from this tick's events, one TD update per event
//! 8. score threshold check; terminal rewards and episode end
//!
//! The pre- and post-move checks are two deliberate, separate calls;
//! collapsing them would change reward timing.

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::TrainConfig;
use crate::rl::{QAgent, StateKey};
use crate::sim::{
    Action, Ball, GameEvent, MatchState, Paddle, Side, reset_after_point,
    resolve_paddle_collision, resolve_wall_collision, side_out, step,
};

/// Result of one completed episode. The updated Q-tables live in the
/// agents the caller passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOutcome {
    pub left_score: u32,
    pub right_score: u32,
    pub winner: Side,
    /// Ticks the episode ran for
    pub ticks: u64,
}

/// Who drives a paddle during a non-learning match.
///
/// A human-controlled paddle is moved by an external input wrapper between
/// ticks; the orchestrator never selects for it. Dispatch is an explicit
/// match, one table per policy, never shared.
pub enum Controller {
    Human,
    Policy(QAgent),
}

impl Controller {
    fn choose(&self, state: StateKey, rng: &mut impl Rng) -> Option<Action> {
        match self {
            Controller::Human => None,
            Controller::Policy(agent) => Some(agent.choose_action(state, rng)),
        }
    }
}

/// Run one learning episode of self-play to the points-to-win threshold.
///
/// Both agents' tables are updated in place; the returned outcome carries
/// the final score and winner. An episode with no terminating rally does
/// not time out (a net-drift stalemate is an accepted unbounded-loop risk,
/// though side-outs make it unreachable with sign-flip-only physics).
pub fn run_episode(
    cfg: &TrainConfig,
    left: &mut QAgent,
    right: &mut QAgent,
    rng: &mut impl Rng,
) -> EpisodeOutcome {
    let game = &cfg.game;
    let rw = &cfg.rewards;

    let mut ball = Ball::new(game);
    let mut left_paddle = Paddle::new(game, Side::Left);
    let mut right_paddle = Paddle::new(game, Side::Right);
    let mut score = MatchState::new(game.points_to_win);

    loop {
        score.frames += 1;

        // 1. Pre-move check: a ball already overlapping something gets its
        // velocity corrected before anyone observes the state. The hit
        // side, if any, is not rewarded here.
        resolve_wall_collision(&mut ball, game.field_height);
        let _ = resolve_paddle_collision(&mut ball, &left_paddle.rect(), &right_paddle.rect());

        // 2. Observe
        let s_left = StateKey::observe(&left_paddle, &ball, &cfg.bins);
        let s_right = StateKey::observe(&right_paddle, &ball, &cfg.bins);
        let old_left_corner = left_paddle.corner();
        let old_right_corner = right_paddle.corner();

        // 3. Decide
        let a_left = left.choose_action(s_left, rng);
        let a_right = right.choose_action(s_right, rng);

        // 4. Act (held for action_repeat sub-steps)
        left_paddle.apply_action(a_left, game.action_repeat, game.field_height);
        right_paddle.apply_action(a_right, game.action_repeat, game.field_height);

        // 5. Advance and re-resolve
        let hit = step(
            &mut ball,
            &left_paddle.rect(),
            &right_paddle.rect(),
            game.field_height,
            rng,
        );

        // 6. Observe again
        let ns_left = StateKey::observe(&left_paddle, &ball, &cfg.bins);
        let ns_right = StateKey::observe(&right_paddle, &ball, &cfg.bins);
        let ball_pt = ball.pos;

        // 7. Events and shaped rewards
        let mut events: Vec<GameEvent> = Vec::with_capacity(2);
        match hit {
            Some(Side::Left) => events.push(GameEvent::LeftHit),
            Some(Side::Right) => events.push(GameEvent::RightHit),
            None => {}
        }
        let exit = side_out(&ball, game.field_width);
        match exit {
            Some(Side::Left) => events.push(GameEvent::LeftMiss),
            Some(Side::Right) => events.push(GameEvent::RightMiss),
            None => {}
        }

        for &event in &events {
            log::debug!("tick {}: {event:?}", score.frames);
            match event {
                GameEvent::LeftHit => left.update(s_left, ns_left, rw.paddle_hit, a_left),
                GameEvent::RightHit => right.update(s_right, ns_right, rw.paddle_hit, a_right),
                GameEvent::LeftMiss => {
                    left.update(s_left, ns_left, -rw.side_out, a_left);
                    right.update(s_right, ns_right, rw.side_out, a_right);
                }
                GameEvent::RightMiss => {
                    right.update(s_right, ns_right, -rw.side_out, a_right);
                    left.update(s_left, ns_left, rw.side_out, a_left);
                }
                GameEvent::LeftWin | GameEvent::RightWin => {}
            }
        }

        // Approach shaping, gated to the paddle's own half of the field.
        // Ties count against: a paddle that did not close the distance is
        // nudged away from whatever it just did.
        if ball_pt.x <= game.field_width / 2.0 {
            let closed = left_paddle.corner().distance(ball_pt) < old_left_corner.distance(ball_pt);
            let reward = if closed { rw.approach } else { -rw.approach };
            left.update(s_left, ns_left, reward, a_left);
        }
        if ball_pt.x >= game.field_width / 2.0 {
            let closed =
                right_paddle.corner().distance(ball_pt) < old_right_corner.distance(ball_pt);
            let reward = if closed { rw.approach } else { -rw.approach };
            right.update(s_right, ns_right, reward, a_right);
        }

        // Score the side-out and re-serve
        if let Some(exited) = exit {
            score.record_point(exited.opponent());
            reset_after_point(&mut ball, game);
            log::debug!(
                "point to {:?}, score {}-{}",
                exited.opponent(),
                score.left_score,
                score.right_score
            );
        }

        // 8. Terminal check
        if let Some(winner) = score.winner() {
            let event = match winner {
                Side::Left => GameEvent::LeftWin,
                Side::Right => GameEvent::RightWin,
            };
            log::debug!("tick {}: {event:?}", score.frames);
            match winner {
                Side::Left => {
                    left.update(s_left, ns_left, rw.win, a_left);
                    right.update(s_right, ns_right, -rw.win, a_right);
                }
                Side::Right => {
                    right.update(s_right, ns_right, rw.win, a_right);
                    left.update(s_left, ns_left, -rw.win, a_left);
                }
            }
            return EpisodeOutcome {
                left_score: score.left_score,
                right_score: score.right_score,
                winner,
                ticks: score.frames,
            };
        }
    }
}

/// Run the full training session into the provided agents (resumable:
/// the agents may already hold imported tables). Epsilon decays once per
/// completed episode.
pub fn train_agents(
    cfg: &TrainConfig,
    left: &mut QAgent,
    right: &mut QAgent,
) -> Result<Vec<EpisodeOutcome>> {
    cfg.validate()?;
    let mut rng = Pcg32::seed_from_u64(cfg.seed);
    let mut outcomes = Vec::with_capacity(cfg.episodes as usize);

    for episode in 0..cfg.episodes {
        let outcome = run_episode(cfg, left, right, &mut rng);
        left.decay_epsilon();
        right.decay_epsilon();

        log::info!(
            "episode {}/{}: {:?} won {}-{} in {} ticks (eps {:.3}, tables {}/{})",
            episode + 1,
            cfg.episodes,
            outcome.winner,
            outcome.left_score,
            outcome.right_score,
            outcome.ticks,
            left.epsilon(),
            left.len(),
            right.len(),
        );
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Train a fresh pair of agents from the configuration alone.
pub fn train(cfg: &TrainConfig) -> Result<(QAgent, QAgent, Vec<EpisodeOutcome>)> {
    let mut left = QAgent::new(&cfg.agent);
    let mut right = QAgent::new(&cfg.agent);
    let outcomes = train_agents(cfg, &mut left, &mut right)?;
    Ok((left, right, outcomes))
}

/// Run one non-learning match between two controllers (evaluation or a
/// display driver). Same tick sequence as `run_episode` minus rewards; a
/// `Human` paddle holds position unless an external wrapper moves it.
pub fn run_match(
    cfg: &TrainConfig,
    left: &mut Controller,
    right: &mut Controller,
    rng: &mut impl Rng,
) -> EpisodeOutcome {
    let game = &cfg.game;

    let mut ball = Ball::new(game);
    let mut left_paddle = Paddle::new(game, Side::Left);
    let mut right_paddle = Paddle::new(game, Side::Right);
    let mut score = MatchState::new(game.points_to_win);

    loop {
        score.frames += 1;

        resolve_wall_collision(&mut ball, game.field_height);
        let _ = resolve_paddle_collision(&mut ball, &left_paddle.rect(), &right_paddle.rect());

        let s_left = StateKey::observe(&left_paddle, &ball, &cfg.bins);
        let s_right = StateKey::observe(&right_paddle, &ball, &cfg.bins);

        if let Some(action) = left.choose(s_left, rng) {
            left_paddle.apply_action(action, game.action_repeat, game.field_height);
        }
        if let Some(action) = right.choose(s_right, rng) {
            right_paddle.apply_action(action, game.action_repeat, game.field_height);
        }

        let _ = step(
            &mut ball,
            &left_paddle.rect(),
            &right_paddle.rect(),
            game.field_height,
            rng,
        );

        if let Some(exited) = side_out(&ball, game.field_width) {
            score.record_point(exited.opponent());
            reset_after_point(&mut ball, game);
        }

        if let Some(winner) = score.winner() {
            return EpisodeOutcome {
                left_score: score.left_score,
                right_score: score.right_score,
                winner,
                ticks: score.frames,
            };
        }
    }
}
