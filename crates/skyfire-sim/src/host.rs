//! Collaborator interfaces the simulation consumes.
//!
//! The host engine owns rendering, physics and assets. The core only ever
//! talks to it through these traits, so systems can be driven by the
//! in-process [`Stage`](crate::stage::Stage) or by a test double.

use hecs::Entity;

use skyfire_core::enums::{EntityTag, Faction, WeaponType};
use skyfire_core::types::{Position, ScreenBounds, TemplateId, Velocity};

/// Instantiates and removes entities.
pub trait EntityFactory {
    /// Create an entity from a template at `position`.
    /// Returns `None` when the template is unknown.
    fn create(&mut self, template: &TemplateId, position: Position) -> Option<Entity>;

    /// Move an entity that already exists.
    fn place(&mut self, entity: Entity, position: Position);

    /// Remove an entity. Destroying a dead entity is a no-op.
    fn destroy(&mut self, entity: Entity);
}

/// Answers questions about the visible play field.
pub trait BoundsOracle {
    fn screen(&self) -> ScreenBounds;

    /// Whether the entity has left the visible area.
    fn is_offscreen(&self, entity: Entity) -> bool;

    /// The entity's configured clearance radius, if it has one.
    fn clearance(&self, entity: Entity) -> Option<f64>;
}

/// Finds entities by tag.
pub trait TargetResolver {
    fn find_tagged(&self, tag: EntityTag) -> Option<Entity>;

    fn position_of(&self, entity: Entity) -> Option<Position>;
}

/// Applies damage to anything able to take it.
pub trait DamageSink {
    /// Returns the remaining health, or `None` if the entity cannot be damaged.
    fn apply_damage(&mut self, entity: Entity, amount: f64) -> Option<f64>;
}

/// Fills in the gameplay payload of entities the factory just created.
/// Both methods return false when the entity is gone or of the wrong kind.
pub trait PayloadSink {
    /// Turn a created projectile into a live shot owned by `owner`.
    fn launch(&mut self, entity: Entity, velocity: Velocity, damage: f64, owner: Faction) -> bool;

    /// Set what a created power-up grants on pickup.
    fn arm_power_up(&mut self, entity: Entity, kind: WeaponType) -> bool;
}
