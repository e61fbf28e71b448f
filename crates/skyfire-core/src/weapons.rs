//! Weapon definitions.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponType;
use crate::types::TemplateId;

/// How a weapon type fires. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDefinition {
    #[serde(rename = "type")]
    pub weapon_type: WeaponType,
    /// Template instantiated for each shot. `None` means the weapon cannot fire.
    #[serde(default)]
    pub projectile_template: Option<TemplateId>,
    /// Projectile speed (units/s).
    #[serde(default)]
    pub velocity: f64,
    /// Cooldown between shots (seconds).
    #[serde(default)]
    pub delay_between_shots: f64,
}

impl WeaponDefinition {
    /// The "no weapon" sentinel.
    pub fn none() -> Self {
        Self {
            weapon_type: WeaponType::None,
            projectile_template: None,
            velocity: 0.0,
            delay_between_shots: 0.0,
        }
    }

    pub fn is_none(&self) -> bool {
        self.weapon_type == WeaponType::None
    }

    /// Template to fire, unless this is the sentinel or the weapon has no projectile.
    pub fn firing_template(&self) -> Option<&TemplateId> {
        if self.is_none() {
            return None;
        }
        self.projectile_template.as_ref()
    }
}

impl Default for WeaponDefinition {
    fn default() -> Self {
        Self::none()
    }
}
