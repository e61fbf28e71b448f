//! Session configuration, loadable from TOML.
//!
//! Every section falls back to the compiled defaults, so a session file only
//! needs the values it overrides. `SessionConfig::default()` is a complete,
//! playable session.
//!
//! ```toml
//! seed = 7
//!
//! [spawn]
//! enemy_spawn_per_second = 1.0
//!
//! [[weapons]]
//! type = "blaster"
//! projectile_template = "projectile_hero"
//! velocity = 50.0
//! delay_between_shots = 0.2
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::WeaponType;
use crate::error::ConfigError;
use crate::types::{Position, ScreenBounds, TemplateId};
use crate::weapons::WeaponDefinition;

/// Everything needed to build a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed. Same seed and inputs give the same session.
    pub seed: u64,
    pub screen: ScreenConfig,
    pub spawn: SpawnConfig,
    pub progression: ProgressionConfig,
    pub power_ups: PowerUpConfig,
    pub hero: HeroConfig,
    /// Registered in order; a later entry for the same type wins.
    pub weapons: Vec<WeaponDefinition>,
    pub templates: Vec<EntityTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub half_width: f64,
    pub half_height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub enabled: bool,
    pub enemy_spawn_per_second: f64,
    pub enemy_inset_default: f64,
    /// Enemy templates picked uniformly on each spawn.
    pub enemy_templates: Vec<TemplateId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub base_score_to_level: u64,
    pub level_growth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub template: TemplateId,
    /// Picked uniformly; repeat an entry to make it more likely.
    pub frequency: Vec<WeaponType>,
    pub lifetime_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub template: TemplateId,
    pub start_position: Position,
    pub weapon: WeaponType,
}

/// A template the factory can instantiate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub id: TemplateId,
    /// Clearance radius. Doubles as the spawn inset when present.
    #[serde(default)]
    pub clearance: Option<f64>,
    #[serde(flatten)]
    pub kind: TemplateKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateKind {
    Enemy(EnemyTemplate),
    Projectile,
    PowerUp,
    Hero(HeroTemplate),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub speed: f64,
    pub health: f64,
    pub score: u64,
    #[serde(default)]
    pub power_up_drop_chance: f64,
    /// Present when the enemy fires at the player.
    #[serde(default)]
    pub shooter: Option<ShooterTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterTemplate {
    pub weapon: WeaponType,
    pub base_fire_interval: f64,
    pub random_offset: f64,
    pub muzzle: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroTemplate {
    pub health: f64,
    pub max_health: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            screen: ScreenConfig::default(),
            spawn: SpawnConfig::default(),
            progression: ProgressionConfig::default(),
            power_ups: PowerUpConfig::default(),
            hero: HeroConfig::default(),
            weapons: default_weapons(),
            templates: default_templates(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            half_width: SCREEN_HALF_WIDTH,
            half_height: SCREEN_HALF_HEIGHT,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            enemy_spawn_per_second: ENEMY_SPAWN_PER_SECOND,
            enemy_inset_default: ENEMY_INSET_DEFAULT,
            enemy_templates: vec![TemplateId::new("enemy_0"), TemplateId::new("enemy_1")],
        }
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            base_score_to_level: BASE_SCORE_TO_LEVEL,
            level_growth: LEVEL_GROWTH,
        }
    }
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            template: TemplateId::new("power_up"),
            frequency: vec![
                WeaponType::Blaster,
                WeaponType::Blaster,
                WeaponType::Spread,
                WeaponType::Shield,
            ],
            lifetime_secs: POWER_UP_LIFETIME_SECS,
        }
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            template: TemplateId::new("hero"),
            start_position: Position::new(0.0, -SCREEN_HALF_HEIGHT * 0.75),
            weapon: WeaponType::Blaster,
        }
    }
}

impl Default for ShooterTemplate {
    fn default() -> Self {
        Self {
            weapon: WeaponType::Phaser,
            base_fire_interval: BASE_FIRE_INTERVAL,
            random_offset: FIRE_RANDOM_OFFSET,
            muzzle: Position::default(),
        }
    }
}

impl Default for HeroTemplate {
    fn default() -> Self {
        Self {
            health: HERO_START_HEALTH,
            max_health: HERO_MAX_HEALTH,
        }
    }
}

fn default_weapons() -> Vec<WeaponDefinition> {
    let hero_shot = Some(TemplateId::new("projectile_hero"));
    vec![
        WeaponDefinition {
            weapon_type: WeaponType::Blaster,
            projectile_template: hero_shot.clone(),
            velocity: 50.0,
            delay_between_shots: 0.2,
        },
        WeaponDefinition {
            weapon_type: WeaponType::Spread,
            projectile_template: hero_shot,
            velocity: 50.0,
            delay_between_shots: 0.4,
        },
        WeaponDefinition {
            weapon_type: WeaponType::Phaser,
            projectile_template: Some(TemplateId::new("projectile_enemy")),
            velocity: 20.0,
            delay_between_shots: 0.5,
        },
        WeaponDefinition {
            weapon_type: WeaponType::Shield,
            ..WeaponDefinition::none()
        },
    ]
}

fn default_templates() -> Vec<EntityTemplate> {
    vec![
        EntityTemplate {
            id: TemplateId::new("enemy_0"),
            clearance: Some(2.5),
            kind: TemplateKind::Enemy(EnemyTemplate {
                speed: 10.0,
                health: 10.0,
                score: 100,
                power_up_drop_chance: 0.25,
                shooter: None,
            }),
        },
        EntityTemplate {
            id: TemplateId::new("enemy_1"),
            clearance: Some(3.0),
            kind: TemplateKind::Enemy(EnemyTemplate {
                speed: 6.0,
                health: 4.0,
                score: 200,
                power_up_drop_chance: 0.5,
                shooter: Some(ShooterTemplate {
                    muzzle: Position::new(0.0, -2.0),
                    ..ShooterTemplate::default()
                }),
            }),
        },
        EntityTemplate {
            id: TemplateId::new("hero"),
            clearance: Some(1.0),
            kind: TemplateKind::Hero(HeroTemplate::default()),
        },
        EntityTemplate {
            id: TemplateId::new("projectile_hero"),
            clearance: Some(0.25),
            kind: TemplateKind::Projectile,
        },
        EntityTemplate {
            id: TemplateId::new("projectile_enemy"),
            clearance: Some(0.25),
            kind: TemplateKind::Projectile,
        },
        EntityTemplate {
            id: TemplateId::new("power_up"),
            clearance: Some(1.0),
            kind: TemplateKind::PowerUp,
        },
    ]
}

impl SessionConfig {
    /// Parse a session from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a session file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn screen_bounds(&self) -> ScreenBounds {
        ScreenBounds::centered(self.screen.half_width, self.screen.half_height)
    }

    pub fn template(&self, id: &TemplateId) -> Option<&EntityTemplate> {
        self.templates.iter().find(|t| &t.id == id)
    }

    /// Check numeric ranges and that every template reference resolves to a
    /// template of the right kind.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen.half_width", self.screen.half_width)?;
        positive("screen.half_height", self.screen.half_height)?;
        positive("spawn.enemy_spawn_per_second", self.spawn.enemy_spawn_per_second)?;
        if !(self.spawn.enemy_inset_default >= 0.0) {
            return Err(ConfigError::invalid(
                "spawn.enemy_inset_default",
                "must be zero or more",
            ));
        }
        if self.progression.base_score_to_level == 0 {
            return Err(ConfigError::invalid(
                "progression.base_score_to_level",
                "must be greater than zero",
            ));
        }
        if !(self.progression.level_growth > 1.0) || !self.progression.level_growth.is_finite() {
            return Err(ConfigError::invalid(
                "progression.level_growth",
                format!("must be greater than 1, got {}", self.progression.level_growth),
            ));
        }
        positive("power_ups.lifetime_secs", self.power_ups.lifetime_secs)?;

        let mut seen = HashSet::new();
        for template in &self.templates {
            if !seen.insert(&template.id) {
                return Err(ConfigError::invalid(
                    "templates",
                    format!("duplicate template id `{}`", template.id),
                ));
            }
            if let Some(clearance) = template.clearance {
                if !clearance.is_finite() {
                    return Err(ConfigError::invalid("templates.clearance", "must be finite"));
                }
            }
            match &template.kind {
                TemplateKind::Enemy(enemy) => validate_enemy(enemy)?,
                TemplateKind::Hero(hero) => {
                    positive("templates.health", hero.health)?;
                    if hero.max_health < hero.health {
                        return Err(ConfigError::invalid(
                            "templates.max_health",
                            "must not be below health",
                        ));
                    }
                }
                TemplateKind::Projectile | TemplateKind::PowerUp => {}
            }
        }

        for id in &self.spawn.enemy_templates {
            self.expect_kind(id, "spawn.enemy_templates", |k| {
                matches!(k, TemplateKind::Enemy(_))
            })?;
        }
        for def in &self.weapons {
            if let Some(id) = &def.projectile_template {
                self.expect_kind(id, &format!("weapon {:?}", def.weapon_type), |k| {
                    matches!(k, TemplateKind::Projectile)
                })?;
            }
            if !(def.velocity >= 0.0) || !(def.delay_between_shots >= 0.0) {
                return Err(ConfigError::invalid(
                    "weapons",
                    format!("{:?} needs non-negative velocity and delay", def.weapon_type),
                ));
            }
        }
        self.expect_kind(&self.power_ups.template, "power_ups.template", |k| {
            matches!(k, TemplateKind::PowerUp)
        })?;
        self.expect_kind(&self.hero.template, "hero.template", |k| {
            matches!(k, TemplateKind::Hero(_))
        })?;

        Ok(())
    }

    fn expect_kind(
        &self,
        id: &TemplateId,
        referenced_by: &str,
        accepts: impl Fn(&TemplateKind) -> bool,
    ) -> Result<(), ConfigError> {
        match self.template(id) {
            Some(t) if accepts(&t.kind) => Ok(()),
            _ => Err(ConfigError::UnknownTemplate {
                template: id.to_string(),
                referenced_by: referenced_by.to_string(),
            }),
        }
    }
}

fn validate_enemy(enemy: &EnemyTemplate) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&enemy.power_up_drop_chance) {
        return Err(ConfigError::invalid(
            "templates.power_up_drop_chance",
            format!("must be within [0, 1], got {}", enemy.power_up_drop_chance),
        ));
    }
    if !enemy.speed.is_finite() {
        return Err(ConfigError::invalid("templates.speed", "must be finite"));
    }
    if let Some(shooter) = &enemy.shooter {
        positive("templates.shooter.base_fire_interval", shooter.base_fire_interval)?;
        if !(shooter.random_offset >= 0.0) {
            return Err(ConfigError::invalid(
                "templates.shooter.random_offset",
                "must be zero or more",
            ));
        }
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be a positive number, got {value}"),
        ))
    }
}
