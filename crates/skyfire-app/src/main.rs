//! Headless SKYFIRE session runner.
//!
//! Usage:
//!   skyfire                              # built-in session, 30 s, no input
//!   skyfire -c config/session.toml --autofire --ticks 3600
//!   RUST_LOG=skyfire_sim=debug skyfire --pretty

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use skyfire_app::game_loop;
use skyfire_app::logging;
use skyfire_app::state::{new_shared_snapshot, LoopOptions};
use skyfire_core::commands::PlayerCommand;
use skyfire_core::config::SessionConfig;
use skyfire_core::constants::TICK_RATE;
use skyfire_sim::SimulationEngine;

#[derive(Debug, Parser)]
#[command(name = "skyfire")]
#[command(about = "Run a headless SKYFIRE session and print the final snapshot as JSON")]
struct Cli {
    /// Session configuration file (TOML). Built-in defaults when omitted.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the session's RNG seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 30 * TICK_RATE as u64)]
    ticks: u64,
    /// Pace ticks against the wall clock.
    #[arg(long)]
    realtime: bool,
    /// Hold the fire button for the whole session.
    #[arg(long)]
    autofire: bool,
    /// Keep running after game over until the tick budget is spent.
    #[arg(long)]
    keep_going: bool,
    /// Pretty-print the snapshot JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    logging::init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load session from {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let mut engine = SimulationEngine::new(config).context("invalid session configuration")?;
    engine.queue_command(PlayerCommand::Start);

    let options = LoopOptions {
        max_ticks: cli.ticks,
        realtime: cli.realtime,
        autofire: cli.autofire,
        stop_on_game_over: !cli.keep_going,
    };
    let (command_tx, handle) = game_loop::spawn_game_loop(engine, options, new_shared_snapshot())
        .context("failed to spawn game loop thread")?;

    let last = handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;
    drop(command_tx);

    let Some(snapshot) = last else {
        anyhow::bail!("session ended before the first tick");
    };
    tracing::info!(
        tick = snapshot.time.tick,
        state = ?snapshot.state,
        level = snapshot.score.current_level,
        total_score = snapshot.score.total_score,
        "session finished"
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    Ok(())
}
