//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Clearance radius used for spawn insets and off-screen checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub radius: f64,
}

/// An enemy ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Downward speed (units/s).
    pub speed: f64,
    /// Declared hit points. Enemies die to a single hero hit regardless.
    pub health: f64,
    /// Points awarded when destroyed by the hero.
    pub score: u64,
    /// Probability in [0, 1] of dropping a power-up on death.
    pub power_up_drop_chance: f64,
}

/// Firing loop state of an enemy that shoots at the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shooter {
    pub weapon: WeaponType,
    pub base_fire_interval: f64,
    pub random_offset: f64,
    /// Muzzle offset from the shooter's position.
    pub muzzle: Position,
    pub phase: ShooterPhase,
    /// Seconds left in the current phase.
    pub countdown_secs: f64,
    /// Simulated time before which the weapon is still cooling down.
    pub next_shot_time: f64,
}

/// A projectile in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub damage: f64,
    pub owner: Faction,
}

/// A power-up pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: WeaponType,
    /// Seconds until the pickup expires.
    pub remaining_secs: f64,
}

/// The player's ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    /// Shield level. The hero dies when this reaches zero.
    pub health: f64,
    pub max_health: f64,
    pub weapon: WeaponType,
    pub next_shot_time: f64,
}
