//! Enemy spawning: a fixed-rate timer that drops a random enemy template in
//! just above the visible area.

use hecs::Entity;
use rand::seq::SliceRandom;
use rand::Rng;

use skyfire_core::config::SpawnConfig;
use skyfire_core::constants::TIMER_EPSILON;
use skyfire_core::types::{Position, ScreenBounds, TemplateId};

use crate::host::{BoundsOracle, EntityFactory};

/// Repeating spawn timer, re-armed after every expiry.
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    period_secs: f64,
    countdown_secs: f64,
    enabled: bool,
    inset_default: f64,
    templates: Vec<TemplateId>,
}

impl SpawnScheduler {
    /// The first expiry is one full period after construction.
    pub fn new(config: &SpawnConfig) -> Self {
        let period_secs = 1.0 / config.enemy_spawn_per_second;
        Self {
            period_secs,
            countdown_secs: period_secs,
            enabled: config.enabled,
            inset_default: config.enemy_inset_default,
            templates: config.enemy_templates.clone(),
        }
    }

    pub fn period_secs(&self) -> f64 {
        self.period_secs
    }

    pub fn countdown_secs(&self) -> f64 {
        self.countdown_secs
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Count down by `dt`. Returns true when the timer expired; it is
    /// re-armed whether or not spawning is enabled. Overshoot carries into
    /// the next period so expiries stay on a fixed grid.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.countdown_secs -= dt;
        if self.countdown_secs > TIMER_EPSILON {
            return false;
        }
        self.countdown_secs += self.period_secs;
        if self.countdown_secs <= TIMER_EPSILON {
            // A frame longer than a period still expires once.
            self.countdown_secs = self.period_secs;
        }
        true
    }
}

/// Advance the spawn timer and spawn an enemy if it expired.
pub fn run<S, R>(
    stage: &mut S,
    rng: &mut R,
    scheduler: &mut SpawnScheduler,
    dt: f64,
) -> Option<(Entity, Position)>
where
    S: EntityFactory + BoundsOracle,
    R: Rng + ?Sized,
{
    if !scheduler.advance(dt) {
        return None;
    }
    if !scheduler.enabled {
        return None;
    }
    spawn_enemy(stage, rng, &scheduler.templates, scheduler.inset_default)
}

/// Create a random enemy from `templates` and place it above the screen.
pub fn spawn_enemy<S, R>(
    stage: &mut S,
    rng: &mut R,
    templates: &[TemplateId],
    inset_default: f64,
) -> Option<(Entity, Position)>
where
    S: EntityFactory + BoundsOracle,
    R: Rng + ?Sized,
{
    let Some(template) = templates.choose(rng) else {
        tracing::warn!("no enemy templates configured, spawn skipped");
        return None;
    };
    let entity = stage.create(template, Position::default())?;

    let inset = stage
        .clearance(entity)
        .map(f64::abs)
        .unwrap_or(inset_default);
    let position = spawn_position(&stage.screen(), inset, rng);
    stage.place(entity, position);

    tracing::debug!(%template, x = position.x, y = position.y, "enemy spawned");
    Some((entity, position))
}

/// Random x within the inset screen width, y just above the top edge.
pub fn spawn_position<R: Rng + ?Sized>(screen: &ScreenBounds, inset: f64, rng: &mut R) -> Position {
    let x_min = screen.left + inset;
    let x_max = screen.right - inset;
    let x = if x_min < x_max {
        rng.gen_range(x_min..=x_max)
    } else {
        // Entity wider than the screen: centre it.
        (screen.left + screen.right) / 2.0
    };
    Position::new(x, screen.top + inset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    /// Factory double that records every create/place call.
    struct RecordingHost {
        world: World,
        clearances: HashMap<TemplateId, f64>,
        screen: ScreenBounds,
        created: Vec<TemplateId>,
        placed: Vec<(Entity, Position)>,
    }

    impl RecordingHost {
        fn new(clearances: &[(&str, f64)]) -> Self {
            Self {
                world: World::new(),
                clearances: clearances
                    .iter()
                    .map(|(id, r)| (TemplateId::new(*id), *r))
                    .collect(),
                screen: ScreenBounds::centered(30.0, 40.0),
                created: Vec::new(),
                placed: Vec::new(),
            }
        }
    }

    impl EntityFactory for RecordingHost {
        fn create(&mut self, template: &TemplateId, _position: Position) -> Option<Entity> {
            if template.as_str() == "missing" {
                return None;
            }
            self.created.push(template.clone());
            Some(self.world.spawn((template.clone(),)))
        }

        fn place(&mut self, entity: Entity, position: Position) {
            self.placed.push((entity, position));
        }

        fn destroy(&mut self, entity: Entity) {
            let _ = self.world.despawn(entity);
        }
    }

    impl BoundsOracle for RecordingHost {
        fn screen(&self) -> ScreenBounds {
            self.screen
        }

        fn is_offscreen(&self, _entity: Entity) -> bool {
            false
        }

        fn clearance(&self, entity: Entity) -> Option<f64> {
            let template = self.world.get::<&TemplateId>(entity).ok()?;
            self.clearances.get(&*template).copied()
        }
    }

    fn config(templates: &[&str]) -> SpawnConfig {
        SpawnConfig {
            enabled: true,
            enemy_spawn_per_second: 0.5,
            enemy_inset_default: 1.5,
            enemy_templates: templates.iter().map(|t| TemplateId::new(*t)).collect(),
        }
    }

    #[test]
    fn test_first_spawn_after_one_period() {
        let mut host = RecordingHost::new(&[]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut scheduler = SpawnScheduler::new(&config(&["enemy"]));
        assert_eq!(scheduler.period_secs(), 2.0);

        // 1.9 seconds: nothing yet.
        for _ in 0..19 {
            assert!(run(&mut host, &mut rng, &mut scheduler, 0.1).is_none());
        }
        // Crossing 2.0 seconds spawns exactly one.
        let mut spawned = 0;
        for _ in 0..2 {
            if run(&mut host, &mut rng, &mut scheduler, 0.1).is_some() {
                spawned += 1;
            }
        }
        assert_eq!(spawned, 1);
        assert_eq!(host.created.len(), 1);
    }

    #[test]
    fn test_disabled_rearms_without_spawning() {
        let mut host = RecordingHost::new(&[]);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut cfg = config(&["enemy"]);
        cfg.enabled = false;
        let mut scheduler = SpawnScheduler::new(&cfg);

        assert!(run(&mut host, &mut rng, &mut scheduler, 2.0).is_none());
        assert!(host.created.is_empty());
        assert_eq!(scheduler.countdown_secs(), 2.0);

        scheduler.set_enabled(true);
        assert!(run(&mut host, &mut rng, &mut scheduler, 2.0).is_some());
    }

    #[test]
    fn test_fixed_ticks_expire_on_exact_period() {
        let mut cfg = config(&["enemy"]);
        cfg.enabled = false;
        let mut scheduler = SpawnScheduler::new(&cfg);
        let dt = 1.0 / 60.0;

        let expiries: Vec<usize> = (1..=600).filter(|_| scheduler.advance(dt)).collect();
        assert_eq!(expiries, vec![120, 240, 360, 480, 600]);
    }

    #[test]
    fn test_long_frame_expires_once() {
        let mut scheduler = SpawnScheduler::new(&config(&["enemy"]));
        assert!(scheduler.advance(7.0));
        assert_eq!(scheduler.countdown_secs(), 2.0);
        assert!(!scheduler.advance(1.0));
    }

    #[test]
    fn test_uses_entity_clearance_as_inset() {
        let mut host = RecordingHost::new(&[("wide", 5.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let templates = [TemplateId::new("wide")];
        for _ in 0..200 {
            let (_, pos) = spawn_enemy(&mut host, &mut rng, &templates, 1.5).unwrap();
            assert!(pos.x >= -25.0 && pos.x <= 25.0);
            assert_eq!(pos.y, 45.0);
        }
    }

    #[test]
    fn test_negative_clearance_uses_magnitude() {
        let mut host = RecordingHost::new(&[("neg", -4.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (_, pos) = spawn_enemy(&mut host, &mut rng, &[TemplateId::new("neg")], 1.5).unwrap();
        assert_eq!(pos.y, 44.0);
    }

    #[test]
    fn test_default_inset_without_clearance() {
        let mut host = RecordingHost::new(&[]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let (entity, pos) =
            spawn_enemy(&mut host, &mut rng, &[TemplateId::new("plain")], 1.5).unwrap();
        assert_eq!(pos.y, 41.5);
        assert_eq!(host.placed, vec![(entity, pos)]);
    }

    #[test]
    fn test_missing_template_skips() {
        let mut host = RecordingHost::new(&[]);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        assert!(spawn_enemy(&mut host, &mut rng, &[TemplateId::new("missing")], 1.5).is_none());
        assert!(spawn_enemy(&mut host, &mut rng, &[], 1.5).is_none());
        assert!(host.placed.is_empty());
    }

    #[test]
    fn test_template_choice_is_uniform() {
        let mut host = RecordingHost::new(&[]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let templates = [TemplateId::new("a"), TemplateId::new("b")];
        for _ in 0..4_000 {
            spawn_enemy(&mut host, &mut rng, &templates, 1.5);
        }
        let a = host.created.iter().filter(|t| t.as_str() == "a").count();
        let frac = a as f64 / 4_000.0;
        assert!((frac - 0.5).abs() < 0.03, "template a chosen {frac}");
    }

    #[test]
    fn test_oversized_inset_centres() {
        let screen = ScreenBounds::centered(2.0, 10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let pos = spawn_position(&screen, 3.0, &mut rng);
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.y, 13.0);
    }

    proptest! {
        #[test]
        fn prop_spawn_position_within_inset(
            seed in any::<u64>(),
            half_width in 5.0f64..100.0,
            half_height in 5.0f64..100.0,
            inset in 0.0f64..4.9,
        ) {
            let screen = ScreenBounds::centered(half_width, half_height);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let pos = spawn_position(&screen, inset, &mut rng);
            prop_assert!(pos.x >= screen.left + inset);
            prop_assert!(pos.x <= screen.right - inset);
            prop_assert_eq!(pos.y, screen.top + inset);
        }
    }
}
