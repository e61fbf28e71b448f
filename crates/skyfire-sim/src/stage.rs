//! The in-process stage: a hecs world plus the template table and screen
//! bounds, implementing every host collaborator trait.
//!
//! Templates become component bundles here. Projectiles and power-ups get
//! their payload through `PayloadSink` once created.

use std::collections::HashMap;

use hecs::{Entity, World};

use skyfire_core::components::*;
use skyfire_core::config::{EntityTemplate, SessionConfig, TemplateKind};
use skyfire_core::enums::*;
use skyfire_core::types::{Position, ScreenBounds, TemplateId, Velocity};

use crate::host::{BoundsOracle, DamageSink, EntityFactory, PayloadSink, TargetResolver};

pub struct Stage {
    world: World,
    templates: HashMap<TemplateId, EntityTemplate>,
    screen: ScreenBounds,
    power_up_lifetime_secs: f64,
}

impl Stage {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            world: World::new(),
            templates: config
                .templates
                .iter()
                .map(|t| (t.id.clone(), t.clone()))
                .collect(),
            screen: config.screen_bounds(),
            power_up_lifetime_secs: config.power_ups.lifetime_secs,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Remove every entity. Despawning one by one keeps generations
    /// counting, so handles from before the clear never match new entities.
    pub fn clear(&mut self) {
        let entities: Vec<Entity> = self.world.iter().map(|e| e.entity()).collect();
        for entity in entities {
            self.destroy(entity);
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn tag_of(&self, entity: Entity) -> Option<EntityTag> {
        self.world.get::<&EntityTag>(entity).ok().map(|t| *t)
    }

    /// Count live entities carrying `tag`.
    pub fn count_tagged(&self, tag: EntityTag) -> usize {
        self.world
            .query::<&EntityTag>()
            .iter()
            .filter(|(_, t)| **t == tag)
            .count()
    }

    fn spawn_kind(&mut self, entity: Entity, kind: &TemplateKind) {
        let result = match kind {
            TemplateKind::Enemy(enemy) => self
                .world
                .insert(
                    entity,
                    (
                        EntityTag::Enemy,
                        Enemy {
                            speed: enemy.speed,
                            health: enemy.health,
                            score: enemy.score,
                            power_up_drop_chance: enemy.power_up_drop_chance,
                        },
                        Velocity::new(0.0, -enemy.speed),
                    ),
                )
                .and_then(|()| match &enemy.shooter {
                    Some(shooter) => self.world.insert_one(
                        entity,
                        Shooter {
                            weapon: shooter.weapon,
                            base_fire_interval: shooter.base_fire_interval,
                            random_offset: shooter.random_offset,
                            muzzle: shooter.muzzle,
                            phase: ShooterPhase::Unarmed,
                            countdown_secs: 0.0,
                            next_shot_time: 0.0,
                        },
                    ),
                    None => Ok(()),
                }),
            // Tagged by whoever launches it.
            TemplateKind::Projectile => Ok(()),
            TemplateKind::PowerUp => self.world.insert(
                entity,
                (
                    EntityTag::PowerUp,
                    PowerUp {
                        kind: WeaponType::None,
                        remaining_secs: self.power_up_lifetime_secs,
                    },
                ),
            ),
            TemplateKind::Hero(hero) => self.world.insert(
                entity,
                (
                    EntityTag::Player,
                    Hero {
                        health: hero.health,
                        max_health: hero.max_health,
                        weapon: WeaponType::None,
                        next_shot_time: 0.0,
                    },
                ),
            ),
        };
        debug_assert!(result.is_ok(), "entity was spawned just above");
    }
}

impl EntityFactory for Stage {
    fn create(&mut self, template: &TemplateId, position: Position) -> Option<Entity> {
        let Some(def) = self.templates.get(template).cloned() else {
            tracing::warn!(%template, "unknown template, nothing created");
            return None;
        };

        let entity = self.world.spawn((position, Velocity::default()));
        if let Some(radius) = def.clearance {
            let result = self.world.insert_one(entity, Bounds { radius });
            debug_assert!(result.is_ok(), "entity was spawned just above");
        }
        self.spawn_kind(entity, &def.kind);
        Some(entity)
    }

    fn place(&mut self, entity: Entity, position: Position) {
        if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
            *pos = position;
        }
    }

    fn destroy(&mut self, entity: Entity) {
        let _ = self.world.despawn(entity);
    }
}

impl PayloadSink for Stage {
    fn launch(&mut self, entity: Entity, velocity: Velocity, damage: f64, owner: Faction) -> bool {
        self.world
            .insert(
                entity,
                (owner.projectile_tag(), Projectile { damage, owner }, velocity),
            )
            .is_ok()
    }

    fn arm_power_up(&mut self, entity: Entity, kind: WeaponType) -> bool {
        match self.world.get::<&mut PowerUp>(entity) {
            Ok(mut power_up) => {
                power_up.kind = kind;
                true
            }
            Err(_) => false,
        }
    }
}

impl BoundsOracle for Stage {
    fn screen(&self) -> ScreenBounds {
        self.screen
    }

    fn is_offscreen(&self, entity: Entity) -> bool {
        let Ok(pos) = self.world.get::<&Position>(entity) else {
            return false;
        };
        let radius = self.clearance(entity).unwrap_or(0.0);
        match self.tag_of(entity) {
            // Enemies enter from above; only the bottom edge removes them.
            Some(EntityTag::Enemy) => self.screen.is_below(&pos, radius),
            _ => self.screen.is_outside(&pos, radius),
        }
    }

    fn clearance(&self, entity: Entity) -> Option<f64> {
        self.world.get::<&Bounds>(entity).ok().map(|b| b.radius)
    }
}

impl TargetResolver for Stage {
    fn find_tagged(&self, tag: EntityTag) -> Option<Entity> {
        self.world
            .query::<&EntityTag>()
            .iter()
            .find(|(_, t)| **t == tag)
            .map(|(entity, _)| entity)
    }

    fn position_of(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }
}

impl DamageSink for Stage {
    fn apply_damage(&mut self, entity: Entity, amount: f64) -> Option<f64> {
        let mut hero = self.world.get::<&mut Hero>(entity).ok()?;
        hero.health = (hero.health - amount).max(0.0);
        Some(hero.health)
    }
}
