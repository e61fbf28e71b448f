//! Game loop thread: runs the simulation engine and publishes snapshots.
//!
//! The engine is built by the caller and moved into the thread, so
//! configuration errors surface before anything is spawned. Commands arrive
//! via `mpsc` channel. After every tick the headless physics reports
//! contacts back to the engine, and the snapshot is stored in shared state
//! for polling. The thread's return value is the final snapshot.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skyfire_core::commands::PlayerCommand;
use skyfire_core::constants::TICK_RATE;
use skyfire_core::enums::GameState;
use skyfire_core::state::GameStateSnapshot;
use skyfire_sim::SimulationEngine;

use crate::physics;
use crate::state::{GameLoopCommand, LoopOptions, SharedSnapshot};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle yielding the final snapshot.
/// Dropping the sender stops the loop at the next tick boundary.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    options: LoopOptions,
    latest_snapshot: SharedSnapshot,
) -> io::Result<(
    mpsc::Sender<GameLoopCommand>,
    JoinHandle<Option<GameStateSnapshot>>,
)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skyfire-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, &options, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the tick budget is spent, game over (if
/// requested), a Shutdown command, or channel disconnect.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    options: &LoopOptions,
    latest_snapshot: &SharedSnapshot,
) -> Option<GameStateSnapshot> {
    let mut last = None;
    let mut next_tick_time = Instant::now();

    for _ in 0..options.max_ticks {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return last,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return last,
            }
        }
        if options.autofire {
            engine.queue_command(PlayerCommand::Fire);
        }

        // 2. Advance one tick
        let snapshot = engine.tick();

        // 3. Report this tick's overlaps for the next collision phase
        for (a, b) in physics::find_contacts(engine.stage().world()) {
            engine.report_contact(a, b);
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        let game_over = snapshot.state == GameState::GameOver;
        last = Some(snapshot);
        if game_over && options.stop_on_game_over {
            tracing::info!(tick = engine.time().tick, "game over, stopping loop");
            break;
        }

        // 5. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }

    last
}
