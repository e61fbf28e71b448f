//! Enemy fire control: per-shooter countdown loop that fires aimed shots
//! at the player.
//!
//! Each shooter steps through `Unarmed → InitialDelay → Interval → Interval …`.
//! Every expiry of an interval is one fire attempt. An attempt is skipped,
//! never retried early, when the weapon is cooling down, resolves to no
//! weapon, or there is nothing to aim at. The loop state lives on the
//! shooter's entity, so despawning the entity ends it.

use hecs::Entity;
use rand::Rng;

use skyfire_core::components::Shooter;
use skyfire_core::constants::{ENEMY_PROJECTILE_DAMAGE, MIN_FIRE_INTERVAL, TIMER_EPSILON};
use skyfire_core::enums::{EntityTag, Faction, ShooterPhase};
use skyfire_core::events::SimEvent;
use skyfire_core::types::{Position, Velocity};

use crate::host::{EntityFactory, PayloadSink, TargetResolver};
use crate::stage::Stage;
use crate::weapons::WeaponRegistry;

/// Run the fire control loop for every shooter.
pub fn run<R: Rng + ?Sized>(
    stage: &mut Stage,
    registry: &WeaponRegistry,
    rng: &mut R,
    now: f64,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let mut due: Vec<(Entity, Position)> = Vec::new();
    for (entity, (shooter, pos)) in stage.world_mut().query_mut::<(&mut Shooter, &Position)>() {
        if advance(shooter, rng, dt) {
            due.push((entity, pos.offset_by(&shooter.muzzle)));
        }
    }

    for (entity, fire_point) in due {
        let Ok(mut shooter) = stage.world().get::<&Shooter>(entity).map(|s| (*s).clone()) else {
            continue;
        };
        if try_fire(stage, registry, &mut shooter, fire_point, now).is_none() {
            continue;
        }
        if let Ok(mut live) = stage.world_mut().get::<&mut Shooter>(entity) {
            live.next_shot_time = shooter.next_shot_time;
        }
        events.push(SimEvent::ShotFired {
            faction: Faction::Enemy,
            weapon: shooter.weapon,
        });
    }
}

/// Step one shooter's loop by `dt`. Returns true when a fire attempt is due.
pub fn advance<R: Rng + ?Sized>(shooter: &mut Shooter, rng: &mut R, dt: f64) -> bool {
    match shooter.phase {
        ShooterPhase::Unarmed => {
            shooter.phase = ShooterPhase::InitialDelay;
            shooter.countdown_secs = if shooter.base_fire_interval > 0.0 {
                rng.gen_range(0.0..=shooter.base_fire_interval)
            } else {
                0.0
            };
            false
        }
        ShooterPhase::InitialDelay => {
            shooter.countdown_secs -= dt;
            if shooter.countdown_secs <= TIMER_EPSILON {
                shooter.phase = ShooterPhase::Interval;
                shooter.countdown_secs =
                    next_interval(shooter.base_fire_interval, shooter.random_offset, rng);
            }
            false
        }
        ShooterPhase::Interval => {
            shooter.countdown_secs -= dt;
            if shooter.countdown_secs > TIMER_EPSILON {
                return false;
            }
            // Carry the overshoot so attempts keep their average spacing.
            shooter.countdown_secs +=
                next_interval(shooter.base_fire_interval, shooter.random_offset, rng);
            if shooter.countdown_secs <= TIMER_EPSILON {
                shooter.countdown_secs =
                    next_interval(shooter.base_fire_interval, shooter.random_offset, rng);
            }
            true
        }
    }
}

/// `base ± U(offset)`, never shorter than the minimum fire interval.
pub fn next_interval<R: Rng + ?Sized>(base: f64, random_offset: f64, rng: &mut R) -> f64 {
    let jitter = if random_offset > 0.0 {
        rng.gen_range(-random_offset..random_offset)
    } else {
        0.0
    };
    (base + jitter).max(MIN_FIRE_INTERVAL)
}

/// One fire attempt by `shooter` from `fire_point`, aimed at the player.
/// On success the shooter's cooldown is pushed back and the projectile is
/// returned.
pub fn try_fire<H>(
    host: &mut H,
    registry: &WeaponRegistry,
    shooter: &mut Shooter,
    fire_point: Position,
    now: f64,
) -> Option<Entity>
where
    H: EntityFactory + TargetResolver + PayloadSink,
{
    if now < shooter.next_shot_time {
        tracing::debug!(now, next_shot_time = shooter.next_shot_time, "fire skipped: cooling down");
        return None;
    }

    let weapon = shooter.weapon;
    let def = registry.lookup(weapon);
    let Some(template) = def.firing_template() else {
        tracing::debug!(?weapon, "fire skipped: no usable weapon");
        return None;
    };
    let Some(target) = host
        .find_tagged(EntityTag::Player)
        .and_then(|player| host.position_of(player))
    else {
        tracing::debug!("fire skipped: no target");
        return None;
    };
    let Some(direction) = fire_point.direction_to(&target) else {
        tracing::debug!("fire skipped: target at muzzle");
        return None;
    };

    let projectile = host.create(template, fire_point)?;
    let velocity = Velocity::from(direction * def.velocity);
    if !host.launch(projectile, velocity, ENEMY_PROJECTILE_DAMAGE, Faction::Enemy) {
        host.destroy(projectile);
        return None;
    }
    shooter.next_shot_time = now + def.delay_between_shots;
    Some(projectile)
}
