//! Events emitted by the simulation for display and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    StateChanged { from: GameState, to: GameState },
    EnemySpawned { position: Position },
    ShotFired { faction: Faction, weapon: WeaponType },
    EnemyDestroyed { position: Position, score: u64 },
    LevelUp { level: u32 },
    PowerUpDropped { kind: WeaponType, position: Position },
    PowerUpCollected { kind: WeaponType },
    HeroDamaged { remaining: f64 },
}
