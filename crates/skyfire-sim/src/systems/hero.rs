//! The player's ship: spawning, firing and power-up pickup.
//!
//! Hero weapons resolve through the same registry as enemy weapons. Shots
//! travel straight up; the spread weapon fans three of them.

use hecs::Entity;

use skyfire_core::components::{Hero, PowerUp};
use skyfire_core::config::HeroConfig;
use skyfire_core::constants::{HERO_PROJECTILE_DAMAGE, SPREAD_HALF_ANGLE};
use skyfire_core::enums::{EntityTag, Faction, WeaponType};
use skyfire_core::events::SimEvent;
use skyfire_core::types::Velocity;

use crate::host::{EntityFactory, PayloadSink, TargetResolver};
use crate::stage::Stage;
use crate::weapons::WeaponRegistry;

/// Create the hero from its template, armed with the configured weapon.
pub fn spawn(stage: &mut Stage, config: &HeroConfig) -> Option<Entity> {
    let entity = stage.create(&config.template, config.start_position)?;
    if let Ok(mut hero) = stage.world_mut().get::<&mut Hero>(entity) {
        hero.weapon = config.weapon;
    }
    Some(entity)
}

/// Fire the hero's current weapon. Returns the number of shots created.
pub fn fire(
    stage: &mut Stage,
    registry: &WeaponRegistry,
    now: f64,
    events: &mut Vec<SimEvent>,
) -> usize {
    let Some(entity) = stage.find_tagged(EntityTag::Player) else {
        return 0;
    };
    let (weapon, next_shot_time, origin) = {
        let Ok(hero) = stage.world().get::<&Hero>(entity) else {
            return 0;
        };
        let Some(origin) = stage.position_of(entity) else {
            return 0;
        };
        (hero.weapon, hero.next_shot_time, origin)
    };
    if now < next_shot_time {
        return 0;
    }

    let def = registry.lookup(weapon);
    let Some(template) = def.firing_template() else {
        tracing::debug!(?weapon, "hero fire skipped: no usable weapon");
        return 0;
    };

    let mut shots = 0;
    for angle in fan_angles(weapon) {
        let (sin, cos) = angle.sin_cos();
        let velocity = Velocity::new(sin * def.velocity, cos * def.velocity);
        let Some(projectile) = stage.create(template, origin) else {
            continue;
        };
        if stage.launch(projectile, velocity, HERO_PROJECTILE_DAMAGE, Faction::Hero) {
            shots += 1;
        } else {
            stage.destroy(projectile);
        }
    }
    if shots > 0 {
        if let Ok(mut hero) = stage.world_mut().get::<&mut Hero>(entity) {
            hero.next_shot_time = now + def.delay_between_shots;
        }
        events.push(SimEvent::ShotFired {
            faction: Faction::Hero,
            weapon,
        });
    }
    shots
}

/// Shot angles from vertical, in radians.
fn fan_angles(weapon: WeaponType) -> Vec<f64> {
    match weapon {
        WeaponType::Spread => vec![0.0, SPREAD_HALF_ANGLE, -SPREAD_HALF_ANGLE],
        _ => vec![0.0],
    }
}

/// Apply a power-up to the hero and remove it from play.
/// Shields raise health up to the maximum; anything else swaps the weapon.
pub fn collect_power_up(stage: &mut Stage, hero: Entity, power_up: Entity) -> Option<WeaponType> {
    let kind = stage.world().get::<&PowerUp>(power_up).ok()?.kind;
    {
        let mut h = stage.world_mut().get::<&mut Hero>(hero).ok()?;
        match kind {
            WeaponType::Shield => h.health = (h.health + 1.0).min(h.max_health),
            WeaponType::None => {}
            other => h.weapon = other,
        }
    }
    stage.destroy(power_up);
    Some(kind)
}
