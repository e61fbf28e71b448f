//! Input events sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All player and host triggers the core responds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Leave the title screen and begin play.
    Start,
    /// Reinitialise the session after a game over.
    Restart,
    /// The host reports that the player's health reached zero.
    HeroDied,
    /// Fire the hero's current weapon.
    Fire,
    /// Enable or disable enemy spawning.
    SetSpawning { enabled: bool },
}
