//! Power-up selection: drop-chance gate plus a weighted pick of the type.
//!
//! Weighting comes from repetition: a type listed twice in the frequency
//! table is twice as likely as a type listed once.

use hecs::Entity;
use rand::seq::SliceRandom;
use rand::Rng;

use skyfire_core::config::PowerUpConfig;
use skyfire_core::enums::WeaponType;
use skyfire_core::types::{Position, TemplateId};

use crate::host::{EntityFactory, PayloadSink};

#[derive(Debug, Clone)]
pub struct PowerUpSelector {
    template: TemplateId,
    frequency: Vec<WeaponType>,
}

impl PowerUpSelector {
    pub fn new(template: TemplateId, frequency: Vec<WeaponType>) -> Self {
        Self {
            template,
            frequency,
        }
    }

    pub fn from_config(config: &PowerUpConfig) -> Self {
        Self::new(config.template.clone(), config.frequency.clone())
    }

    /// Decide whether a destroyed enemy drops anything, and what.
    /// A chance of 0 never drops; a chance of 1 always does.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, drop_chance: f64) -> Option<WeaponType> {
        if !(drop_chance > 0.0) {
            return None;
        }
        if !rng.gen_bool(drop_chance.min(1.0)) {
            return None;
        }
        self.frequency.choose(rng).copied()
    }

    /// Roll for a drop and, on success, create the power-up at `position`.
    /// The host sets its lifetime when creating it.
    pub fn drop_at<H, R>(
        &self,
        host: &mut H,
        rng: &mut R,
        drop_chance: f64,
        position: Position,
    ) -> Option<(Entity, WeaponType)>
    where
        H: EntityFactory + PayloadSink,
        R: Rng + ?Sized,
    {
        let kind = self.roll(rng, drop_chance)?;
        let entity = host.create(&self.template, position)?;
        if !host.arm_power_up(entity, kind) {
            tracing::warn!(template = %self.template, "power-up template is not a pickup");
            host.destroy(entity);
            return None;
        }
        Some((entity, kind))
    }
}
