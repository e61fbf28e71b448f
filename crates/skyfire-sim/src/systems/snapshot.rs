//! Snapshot system: queries the stage and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use skyfire_core::components::*;
use skyfire_core::enums::*;
use skyfire_core::events::SimEvent;
use skyfire_core::state::*;
use skyfire_core::types::{Position, SimTime, Velocity};

use crate::progression::ScoreProgression;
use crate::stage::Stage;

/// Build a complete GameStateSnapshot from the current stage.
pub fn build_snapshot(
    stage: &Stage,
    time: &SimTime,
    state: GameState,
    score: &ScoreProgression,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    let world = stage.world();
    GameStateSnapshot {
        time: *time,
        state,
        score: score.view(),
        hero: build_hero(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        power_ups: build_power_ups(world),
        events,
    }
}

fn build_hero(world: &World) -> Option<HeroView> {
    world
        .query::<(&Hero, &Position)>()
        .iter()
        .next()
        .map(|(_, (hero, pos))| HeroView {
            position: *pos,
            health: hero.health,
            weapon: hero.weapon,
        })
}

/// Enemies sorted by entity id so the output order is stable.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(u32, EnemyView)> = world
        .query::<(&Enemy, &Position, Option<&Shooter>)>()
        .iter()
        .map(|(entity, (enemy, pos, shooter))| {
            (
                entity.id(),
                EnemyView {
                    position: *pos,
                    score: enemy.score,
                    shooter: shooter.is_some(),
                },
            )
        })
        .collect();
    enemies.sort_by_key(|(id, _)| *id);
    enemies.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u32, ProjectileView)> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (projectile, pos, vel))| {
            (
                entity.id(),
                ProjectileView {
                    position: *pos,
                    velocity: *vel,
                    owner: projectile.owner,
                },
            )
        })
        .collect();
    projectiles.sort_by_key(|(id, _)| *id);
    projectiles.into_iter().map(|(_, view)| view).collect()
}

fn build_power_ups(world: &World) -> Vec<PowerUpView> {
    let mut power_ups: Vec<(u32, PowerUpView)> = world
        .query::<(&PowerUp, &Position)>()
        .iter()
        .map(|(entity, (power_up, pos))| {
            (
                entity.id(),
                PowerUpView {
                    position: *pos,
                    kind: power_up.kind,
                },
            )
        })
        .collect();
    power_ups.sort_by_key(|(id, _)| *id);
    power_ups.into_iter().map(|(_, view)| view).collect()
}
