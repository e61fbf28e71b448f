//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Weapon type. Also names the power-up that grants it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    /// No weapon. The sentinel returned for unknown lookups.
    #[default]
    None,
    /// Single straight shot.
    Blaster,
    /// Three-way fan.
    Spread,
    /// Enemy bolt weapon.
    Phaser,
    Missile,
    Laser,
    /// Not a gun: raises the hero's shield when picked up.
    Shield,
}

/// Top-level game mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen. Simulated time is frozen.
    #[default]
    Start,
    /// Normal play.
    Playing,
    /// Hero destroyed. Simulated time is frozen until restart.
    GameOver,
}

/// Tag used by the target resolver and the collision contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    /// The player's ship.
    Player,
    Enemy,
    /// Projectile fired by the player.
    ProjectileHero,
    /// Projectile fired by an enemy.
    ProjectileEnemy,
    PowerUp,
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Hero,
    #[default]
    Enemy,
}

impl Faction {
    /// Tag carried by projectiles fired by this faction.
    pub fn projectile_tag(&self) -> EntityTag {
        match self {
            Faction::Hero => EntityTag::ProjectileHero,
            Faction::Enemy => EntityTag::ProjectileEnemy,
        }
    }
}

/// Phase of a shooter's firing loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShooterPhase {
    /// Created but not yet activated by the firing system.
    #[default]
    Unarmed,
    /// Waiting out the randomised delay before the first interval.
    InitialDelay,
    /// Waiting out a firing interval; a fire attempt follows on expiry.
    Interval,
}
