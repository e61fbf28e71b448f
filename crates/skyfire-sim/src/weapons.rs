//! Weapon registry: immutable `WeaponType → WeaponDefinition` table.
//!
//! Built once when the session is created and handed by reference to the
//! systems that fire. Lookups never fail: an unregistered type resolves to
//! the "none" sentinel, which callers treat as "no weapon".

use std::collections::HashMap;

use skyfire_core::enums::WeaponType;
use skyfire_core::weapons::WeaponDefinition;

#[derive(Debug, Clone)]
pub struct WeaponRegistry {
    definitions: HashMap<WeaponType, WeaponDefinition>,
    none: WeaponDefinition,
}

impl Default for WeaponRegistry {
    fn default() -> Self {
        Self {
            definitions: HashMap::new(),
            none: WeaponDefinition::none(),
        }
    }
}

impl WeaponRegistry {
    /// Build from an ordered list. A later definition of the same type wins.
    pub fn from_definitions(definitions: impl IntoIterator<Item = WeaponDefinition>) -> Self {
        let mut registry = Self::default();
        for def in definitions {
            registry.register(def);
        }
        registry
    }

    /// Insert or overwrite the definition for `def.weapon_type`.
    pub fn register(&mut self, def: WeaponDefinition) {
        self.definitions.insert(def.weapon_type, def);
    }

    /// The definition for `weapon_type`, or the sentinel if none is registered.
    pub fn lookup(&self, weapon_type: WeaponType) -> &WeaponDefinition {
        self.definitions.get(&weapon_type).unwrap_or(&self.none)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
