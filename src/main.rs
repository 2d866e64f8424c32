//! Training driver
//!
//! Thin CLI around the core: parses knobs, runs the self-play training
//! loop, and reads/writes Q-table snapshots as JSON so training can
//! resume across runs. All learning logic lives in the library.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use qpong::config::TrainConfig;
use qpong::rl::TableSnapshot;
use qpong::sim::Side;
use qpong::train::train_agents;
use qpong::QAgent;

#[derive(Debug, Parser)]
#[command(name = "qpong", about = "Train two Q-learning paddles by self-play")]
struct Args {
    /// Number of training episodes
    #[arg(long, default_value_t = 100)]
    episodes: u32,

    /// Run seed; a given seed reproduces a run exactly
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Points needed to win an episode
    #[arg(long)]
    points_to_win: Option<u32>,

    /// Initial exploration rate override
    #[arg(long)]
    epsilon: Option<f32>,

    /// Resume from a previously saved left table
    #[arg(long)]
    load_left: Option<PathBuf>,

    /// Resume from a previously saved right table
    #[arg(long)]
    load_right: Option<PathBuf>,

    /// Where to write the left table after training
    #[arg(long, default_value = "left_paddle.json")]
    out_left: PathBuf,

    /// Where to write the right table after training
    #[arg(long, default_value = "right_paddle.json")]
    out_right: PathBuf,
}

fn load_snapshot(path: &Path) -> Result<TableSnapshot> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("decoding {}", path.display()))
}

fn save_snapshot(path: &Path, snapshot: &TableSnapshot) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), snapshot)
        .with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = TrainConfig::default();
    cfg.episodes = args.episodes;
    cfg.seed = args.seed;
    if let Some(points) = args.points_to_win {
        cfg.game.points_to_win = points;
    }
    if let Some(epsilon) = args.epsilon {
        cfg.agent.epsilon = epsilon;
    }
    cfg.validate()?;

    let mut left = QAgent::new(&cfg.agent);
    let mut right = QAgent::new(&cfg.agent);
    if let Some(path) = &args.load_left {
        left.restore(load_snapshot(path)?);
        log::info!("resumed left table: {} entries", left.len());
    }
    if let Some(path) = &args.load_right {
        right.restore(load_snapshot(path)?);
        log::info!("resumed right table: {} entries", right.len());
    }

    let outcomes = train_agents(&cfg, &mut left, &mut right)?;

    let left_wins = outcomes
        .iter()
        .filter(|o| o.winner == Side::Left)
        .count();
    log::info!(
        "trained {} episodes: left won {}, right won {}",
        outcomes.len(),
        left_wins,
        outcomes.len() - left_wins,
    );

    save_snapshot(&args.out_left, &left.snapshot())?;
    save_snapshot(&args.out_right, &right.snapshot())?;
    log::info!(
        "saved tables: {} ({} entries), {} ({} entries)",
        args.out_left.display(),
        left.len(),
        args.out_right.display(),
        right.len(),
    );

    Ok(())
}
