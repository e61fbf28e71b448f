//! Game state snapshot: everything a display sink needs after each tick.
//!
//! The core never formats text; presentation is left to the consumer.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub state: GameState,
    pub score: ScoreView,
    pub hero: Option<HeroView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub power_ups: Vec<PowerUpView>,
    pub events: Vec<SimEvent>,
}

/// Level and score readout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub current_level: u32,
    pub total_score: u64,
    pub level_score: u64,
    /// Score needed to clear the current level.
    pub threshold: u64,
    /// `level_score / threshold`, clamped to [0, 1].
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroView {
    pub position: Position,
    pub health: f64,
    pub weapon: WeaponType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub score: u64,
    pub shooter: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub velocity: Velocity,
    pub owner: Faction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub position: Position,
    pub kind: WeaponType,
}
