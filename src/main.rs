use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use game_2048::config::Config;
use game_2048::game::{Difficulty, Game};
use game_2048::leaderboard::Leaderboard;
use game_2048::session;
use log::{debug, error, info};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Parser)]
#[command(name = "game-2048", version, about = "Play 2048 in the terminal")]
struct Args {
    /// TOML config file (leaderboard_path, difficulty, seed)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Opening difficulty; medium and hard drop extra 4s on the board
    #[arg(long, value_enum, ignore_case = true)]
    difficulty: Option<Difficulty>,

    /// High-score file to load at start and write at the end
    #[arg(long, value_name = "FILE")]
    leaderboard: Option<PathBuf>,

    /// Seed the RNG for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Only print the final score
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::from_toml(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(path) = args.leaderboard {
        cfg.leaderboard_path = path;
    }
    if let Some(difficulty) = args.difficulty {
        cfg.difficulty = difficulty;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    debug!("{cfg:?}");

    let store = Leaderboard::new(&cfg.leaderboard_path);
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::start(cfg.difficulty, store.load(), &mut rng);
    info!("new {} game, high score {}", cfg.difficulty, game.high_score());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = session::play(&mut game, &mut rng, io::stdin().lock(), &mut out, args.quiet);

    let score = game.score();
    let high_score = game.into_high_score();
    if let Err(e) = store.save(high_score) {
        error!("failed to save high score to {}: {e}", store.path().display());
    }
    let end = result.context("session i/o failed")?;
    info!("session ended: {end:?}");
    if args.quiet {
        writeln!(out, "Score: {score}  High Score: {high_score}")?;
    }
    Ok(())
}
