#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::commands::PlayerCommand;
    use crate::config::{SessionConfig, TemplateKind};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SimEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{Position, ScreenBounds, SimTime, TemplateId, Velocity};
    use crate::weapons::WeaponDefinition;

    #[test]
    fn test_weapon_type_serde() {
        let variants = vec![
            WeaponType::None,
            WeaponType::Blaster,
            WeaponType::Spread,
            WeaponType::Phaser,
            WeaponType::Missile,
            WeaponType::Laser,
            WeaponType::Shield,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: WeaponType = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
        assert_eq!(serde_json::to_string(&WeaponType::Spread).unwrap(), "\"spread\"");
    }

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Start,
            PlayerCommand::Restart,
            PlayerCommand::HeroDied,
            PlayerCommand::Fire,
            PlayerCommand::SetSpawning { enabled: false },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
    }

    #[test]
    fn test_sim_event_serde() {
        let events = vec![
            SimEvent::StateChanged {
                from: GameState::Start,
                to: GameState::Playing,
            },
            SimEvent::LevelUp { level: 3 },
            SimEvent::PowerUpDropped {
                kind: WeaponType::Shield,
                position: Position::new(1.0, 2.0),
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: SimEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.state, GameState::Start);
        assert_eq!(back.score, snapshot.score);
        assert!(json.len() < 1024, "Empty snapshot should be <1KB");
    }

    #[test]
    fn test_direction_to_is_unit_length() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, -4.0);
        let dir = a.direction_to(&b).unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-12);
        assert!((dir.x - 0.6).abs() < 1e-12);
        assert!((dir.y + 0.8).abs() < 1e-12);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_direction_to_same_point_is_none() {
        let a = Position::new(2.0, 2.0);
        assert!(a.direction_to(&a).is_none());
    }

    #[test]
    fn test_velocity_speed() {
        let v = Velocity::new(3.0, 4.0);
        assert!((v.speed() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_screen_bounds_outside() {
        let screen = ScreenBounds::centered(10.0, 20.0);
        assert_eq!(screen.width(), 20.0);
        assert_eq!(screen.height(), 40.0);
        assert!(!screen.is_outside(&Position::new(0.0, 0.0), 1.0));
        // Still partially visible within its radius.
        assert!(!screen.is_outside(&Position::new(10.5, 0.0), 1.0));
        assert!(screen.is_outside(&Position::new(11.5, 0.0), 1.0));
        assert!(screen.is_outside(&Position::new(0.0, 21.5), 1.0));
        assert!(screen.is_below(&Position::new(0.0, -21.5), 1.0));
        assert!(!screen.is_below(&Position::new(0.0, 21.5), 1.0));
    }

    #[test]
    fn test_weapon_definition_sentinel() {
        let none = WeaponDefinition::none();
        assert!(none.is_none());
        assert!(none.firing_template().is_none());

        let shield = WeaponDefinition {
            weapon_type: WeaponType::Shield,
            ..WeaponDefinition::none()
        };
        assert!(!shield.is_none());
        assert!(shield.firing_template().is_none());
    }

    // ---- Configuration ----

    #[test]
    fn test_default_config_is_valid() {
        SessionConfig::default().validate().unwrap();
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config.progression.base_score_to_level, 500);
        assert!((config.progression.level_growth - 1.25).abs() < 1e-12);
        assert_eq!(config.power_ups.frequency.len(), 4);
    }

    #[test]
    fn test_toml_overrides_and_templates() {
        let text = r#"
            seed = 7

            [spawn]
            enemy_spawn_per_second = 2.0
            enemy_templates = ["drone"]

            [[templates]]
            id = "drone"
            kind = "enemy"
            clearance = 1.5
            speed = 12.0
            health = 1.0
            score = 50
            power_up_drop_chance = 1.0

            [templates.shooter]
            weapon = "phaser"
            base_fire_interval = 2.0

            [[templates]]
            id = "hero"
            kind = "hero"

            [[templates]]
            id = "power_up"
            kind = "power_up"

            [[templates]]
            id = "bolt"
            kind = "projectile"

            [[weapons]]
            type = "phaser"
            projectile_template = "bolt"
            velocity = 15.0
            delay_between_shots = 1.0
        "#;
        let config = SessionConfig::from_toml_str(text).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.spawn.enemy_spawn_per_second, 2.0);
        let drone = config.template(&TemplateId::new("drone")).unwrap();
        assert_eq!(drone.clearance, Some(1.5));
        match &drone.kind {
            TemplateKind::Enemy(enemy) => {
                assert_eq!(enemy.score, 50);
                let shooter = enemy.shooter.as_ref().unwrap();
                assert_eq!(shooter.weapon, WeaponType::Phaser);
                assert_eq!(shooter.base_fire_interval, 2.0);
                // Unspecified shooter fields keep their defaults.
                assert_eq!(shooter.random_offset, 0.5);
            }
            other => panic!("expected enemy template, got {other:?}"),
        }
        assert_eq!(config.weapons.len(), 1);
    }

    #[test]
    fn test_rejects_growth_not_above_one() {
        let text = "[progression]\nlevel_growth = 1.0\n";
        let err = SessionConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "progression.level_growth",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_positive_spawn_rate() {
        let mut config = SessionConfig::default();
        config.spawn.enemy_spawn_per_second = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_drop_chance_out_of_range() {
        let mut config = SessionConfig::default();
        for template in &mut config.templates {
            if let TemplateKind::Enemy(enemy) = &mut template.kind {
                enemy.power_up_drop_chance = 1.5;
            }
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_template_reference() {
        let mut config = SessionConfig::default();
        config.spawn.enemy_templates.push(TemplateId::new("ghost"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTemplate { .. }));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_rejects_wrong_template_kind() {
        let mut config = SessionConfig::default();
        // A projectile cannot be spawned as an enemy.
        config.spawn.enemy_templates = vec![TemplateId::new("projectile_enemy")];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownTemplate { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = SessionConfig::from_toml_str("seed = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SessionConfig::load("/nonexistent/skyfire/session.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bundled_session_file_is_valid() {
        let text = include_str!("../../../config/session.toml");
        let config = SessionConfig::from_toml_str(text).unwrap();
        assert!(!config.weapons.is_empty());
        assert!(!config.spawn.enemy_templates.is_empty());
    }

    proptest! {
        #[test]
        fn prop_direction_is_unit_or_none(
            ax in -100.0f64..100.0, ay in -100.0f64..100.0,
            bx in -100.0f64..100.0, by in -100.0f64..100.0,
        ) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            match a.direction_to(&b) {
                Some(dir) => prop_assert!((dir.length() - 1.0).abs() < 1e-9),
                None => prop_assert!(a.distance_to(&b) < 1e-9),
            }
        }

        #[test]
        fn prop_inside_point_never_outside(
            x in -30.0f64..30.0, y in -40.0f64..40.0, r in 0.0f64..5.0,
        ) {
            let screen = ScreenBounds::centered(30.0, 40.0);
            let pos = Position::new(x, y);
            prop_assert!(!screen.is_outside(&pos, r));
            prop_assert!(!screen.is_below(&pos, r));
        }
    }
}
