//! State shared between the driver and the game loop thread.

use std::sync::{Arc, Mutex};

use skyfire_core::commands::PlayerCommand;
use skyfire_core::constants::TICK_RATE;
use skyfire_core::state::GameStateSnapshot;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, updated by the game loop thread after each tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// How the game loop runs.
#[derive(Debug, Clone)]
pub struct LoopOptions {
    /// Number of ticks to run before stopping.
    pub max_ticks: u64,
    /// Pace ticks against the wall clock instead of running flat out.
    pub realtime: bool,
    /// Queue a fire command every tick.
    pub autofire: bool,
    /// Stop as soon as the session reaches game over.
    pub stop_on_game_over: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_ticks: 30 * TICK_RATE as u64,
            realtime: false,
            autofire: false,
            stop_on_game_over: true,
        }
    }
}

pub fn new_shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}
