//! Cleanup system: removes entities that left the screen or expired.

use hecs::Entity;

use skyfire_core::components::PowerUp;
use skyfire_core::enums::EntityTag;

use crate::host::{BoundsOracle, EntityFactory};
use crate::stage::Stage;

/// Cull off-screen enemies and projectiles and expired power-ups.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
/// Returns the number of entities removed.
pub fn run(stage: &mut Stage, despawn_buffer: &mut Vec<Entity>, dt: f64) -> usize {
    despawn_buffer.clear();

    for (entity, power_up) in stage.world_mut().query_mut::<&mut PowerUp>() {
        power_up.remaining_secs -= dt;
        if power_up.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    // The hero is kept on screen by the host and never culled here.
    for (entity, tag) in stage.world().query::<&EntityTag>().iter() {
        if *tag != EntityTag::Player && stage.is_offscreen(entity) {
            despawn_buffer.push(entity);
        }
    }

    despawn_buffer.sort_unstable();
    despawn_buffer.dedup();
    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        tracing::debug!(?entity, "culled");
        stage.destroy(entity);
    }
    removed
}
