//! Collision resolution for contacts reported by the host.
//!
//! Contacts are queued between ticks and resolved after motion integration.
//! An entity destroyed by an earlier contact in the same batch is skipped by
//! every later one, so nothing is destroyed twice.

use hecs::Entity;
use rand::Rng;

use skyfire_core::components::{Enemy, Projectile};
use skyfire_core::enums::EntityTag;
use skyfire_core::events::SimEvent;

use crate::host::{DamageSink, EntityFactory, TargetResolver};
use crate::power_ups::PowerUpSelector;
use crate::progression::ScoreProgression;
use crate::stage::Stage;
use crate::systems::hero;

/// A pair of entities the host reported as touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: Entity,
    pub b: Entity,
}

/// Resolve every queued contact, draining the queue.
/// Returns true if the hero was killed.
pub fn run<R: Rng + ?Sized>(
    stage: &mut Stage,
    contacts: &mut Vec<Contact>,
    rng: &mut R,
    score: &mut ScoreProgression,
    power_ups: &PowerUpSelector,
    events: &mut Vec<SimEvent>,
) -> bool {
    let mut hero_killed = false;

    for Contact { a, b } in contacts.drain(..) {
        if !stage.contains(a) || !stage.contains(b) {
            continue;
        }
        let (Some(tag_a), Some(tag_b)) = (stage.tag_of(a), stage.tag_of(b)) else {
            tracing::debug!(?a, ?b, "contact with untagged entity ignored");
            continue;
        };

        match (tag_a, tag_b) {
            (EntityTag::Enemy, EntityTag::ProjectileHero) => {
                stage.destroy(b);
                destroy_enemy(stage, a, rng, score, power_ups, events);
            }
            (EntityTag::ProjectileHero, EntityTag::Enemy) => {
                stage.destroy(a);
                destroy_enemy(stage, b, rng, score, power_ups, events);
            }
            (EntityTag::ProjectileEnemy, EntityTag::Player) => {
                hero_killed |= hit_hero(stage, a, b, events);
            }
            (EntityTag::Player, EntityTag::ProjectileEnemy) => {
                hero_killed |= hit_hero(stage, b, a, events);
            }
            (EntityTag::Player, EntityTag::PowerUp) => {
                if let Some(kind) = hero::collect_power_up(stage, a, b) {
                    events.push(SimEvent::PowerUpCollected { kind });
                }
            }
            (EntityTag::PowerUp, EntityTag::Player) => {
                if let Some(kind) = hero::collect_power_up(stage, b, a) {
                    events.push(SimEvent::PowerUpCollected { kind });
                }
            }
            (first, second) => {
                tracing::debug!(?first, ?second, "contact ignored");
            }
        }
    }

    hero_killed
}

/// Apply an enemy projectile to the hero. Returns true if the hero died.
fn hit_hero(stage: &mut Stage, projectile: Entity, hero: Entity, events: &mut Vec<SimEvent>) -> bool {
    let damage = match stage.world().get::<&Projectile>(projectile) {
        Ok(p) => p.damage,
        Err(_) => 0.0,
    };
    let remaining = stage.apply_damage(hero, damage);
    stage.destroy(projectile);

    let Some(remaining) = remaining else {
        return false;
    };
    events.push(SimEvent::HeroDamaged { remaining });
    if remaining > 0.0 {
        return false;
    }
    tracing::info!("hero destroyed");
    stage.destroy(hero);
    true
}

/// Remove an enemy killed by the hero, award its score and roll for a drop.
fn destroy_enemy<R: Rng + ?Sized>(
    stage: &mut Stage,
    enemy: Entity,
    rng: &mut R,
    score: &mut ScoreProgression,
    power_ups: &PowerUpSelector,
    events: &mut Vec<SimEvent>,
) {
    let Some(position) = stage.position_of(enemy) else {
        return;
    };
    let Some((points, drop_chance)) = stage
        .world()
        .get::<&Enemy>(enemy)
        .ok()
        .map(|e| (e.score, e.power_up_drop_chance))
    else {
        return;
    };
    stage.destroy(enemy);
    events.push(SimEvent::EnemyDestroyed {
        position,
        score: points,
    });

    let before = score.current_level();
    score.award(points);
    for level in (before..score.current_level()).map(|cleared| cleared + 1) {
        tracing::info!(level, total_score = score.total_score(), "level up");
        events.push(SimEvent::LevelUp { level });
    }

    if let Some((_, kind)) = power_ups.drop_at(stage, rng, drop_chance, position) {
        events.push(SimEvent::PowerUpDropped { kind, position });
    }
}
