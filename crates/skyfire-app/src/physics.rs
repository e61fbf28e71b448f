//! Minimal host physics for headless runs.
//!
//! A real host engine reports contacts from its own collision system. The
//! headless driver stands in for it with circle overlap tests between
//! entities that carry a clearance radius, filtered to the pairs the
//! simulation reacts to.

use hecs::{Entity, World};

use skyfire_core::components::Bounds;
use skyfire_core::enums::EntityTag;
use skyfire_core::types::Position;

/// Whether the collision layers of `a` and `b` interact.
pub fn interacts(a: EntityTag, b: EntityTag) -> bool {
    use EntityTag::*;
    matches!(
        (a, b),
        (Enemy, ProjectileHero)
            | (ProjectileHero, Enemy)
            | (ProjectileEnemy, Player)
            | (Player, ProjectileEnemy)
            | (Player, PowerUp)
            | (PowerUp, Player)
    )
}

/// Every interacting pair whose clearance circles overlap, in entity order.
pub fn find_contacts(world: &World) -> Vec<(Entity, Entity)> {
    let mut bodies: Vec<(Entity, EntityTag, Position, f64)> = world
        .query::<(&EntityTag, &Position, &Bounds)>()
        .iter()
        .map(|(entity, (tag, pos, bounds))| (entity, *tag, *pos, bounds.radius.abs()))
        .collect();
    bodies.sort_by_key(|(entity, ..)| *entity);

    let mut contacts = Vec::new();
    for (i, &(a, tag_a, pos_a, r_a)) in bodies.iter().enumerate() {
        for &(b, tag_b, pos_b, r_b) in &bodies[i + 1..] {
            if interacts(tag_a, tag_b) && pos_a.distance_to(&pos_b) <= r_a + r_b {
                contacts.push((a, b));
            }
        }
    }
    contacts
}
