//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the stage, processes player commands, runs all
//! systems, and produces `GameStateSnapshot`s. Completely headless, so the
//! same seed always replays the same session.

use std::collections::VecDeque;

use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyfire_core::commands::PlayerCommand;
use skyfire_core::config::SessionConfig;
use skyfire_core::constants::DT;
use skyfire_core::enums::{EntityTag, GameState};
use skyfire_core::error::ConfigError;
use skyfire_core::events::SimEvent;
use skyfire_core::state::GameStateSnapshot;
use skyfire_core::types::{Position, SimTime};

use crate::game_state::GameStateMachine;
use crate::host::{EntityFactory, TargetResolver};
use crate::power_ups::PowerUpSelector;
use crate::progression::ScoreProgression;
use crate::stage::Stage;
use crate::systems;
use crate::systems::collision::Contact;
use crate::systems::spawner::SpawnScheduler;
use crate::weapons::WeaponRegistry;

/// The simulation engine. Owns the stage and all session state.
pub struct SimulationEngine {
    config: SessionConfig,
    stage: Stage,
    registry: WeaponRegistry,
    game_state: GameStateMachine,
    time: SimTime,
    rng: ChaCha8Rng,
    scheduler: SpawnScheduler,
    score: ScoreProgression,
    power_ups: PowerUpSelector,
    command_queue: VecDeque<PlayerCommand>,
    contacts: Vec<Contact>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new engine from a validated session configuration.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::info!(seed = config.seed, "session created");
        Ok(Self {
            stage: Stage::new(&config),
            registry: WeaponRegistry::from_definitions(config.weapons.iter().cloned()),
            game_state: GameStateMachine::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            scheduler: SpawnScheduler::new(&config.spawn),
            score: ScoreProgression::from_config(&config.progression),
            power_ups: PowerUpSelector::from_config(&config.power_ups),
            command_queue: VecDeque::new(),
            contacts: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Report that two entities touched. Resolved in the next tick's
    /// collision phase.
    pub fn report_contact(&mut self, a: Entity, b: Entity) {
        self.contacts.push(Contact { a, b });
    }

    /// Move an entity to where the host's physics says it is.
    pub fn sync_position(&mut self, entity: Entity, position: Position) {
        self.stage.place(entity, position);
    }

    /// Advance by one fixed tick.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.advance(DT)
    }

    /// Advance by a host frame delta and return the resulting snapshot.
    /// The delta is scaled by the game state, so nothing moves outside play.
    pub fn advance(&mut self, frame_dt: f64) -> GameStateSnapshot {
        self.process_commands();

        let dt = frame_dt * self.game_state.time_scale();
        if dt > 0.0 {
            self.time.advance(dt);
            self.run_systems(dt);
        } else {
            // Contacts from a frozen frame belong to no tick.
            self.contacts.clear();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.stage,
            &self.time,
            self.game_state.state(),
            &self.score,
            events,
        )
    }

    /// Get the current game state.
    pub fn state(&self) -> GameState {
        self.game_state.state()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> &ScoreProgression {
        &self.score
    }

    pub fn registry(&self) -> &WeaponRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get a read-only reference to the stage.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable stage access for hosts that create entities themselves.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// The hero entity, if one is in play.
    pub fn hero(&self) -> Option<Entity> {
        self.stage.find_tagged(EntityTag::Player)
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        let from = self.game_state.state();
        match command {
            PlayerCommand::Start => {
                if self.game_state.start() {
                    self.state_changed(from);
                    if systems::hero::spawn(&mut self.stage, &self.config.hero).is_none() {
                        tracing::warn!(template = %self.config.hero.template, "hero not spawned");
                    }
                }
            }
            PlayerCommand::Restart => {
                if self.game_state.restart() {
                    self.reset_session();
                    self.state_changed(from);
                }
            }
            PlayerCommand::HeroDied => {
                if self.game_state.hero_died() {
                    self.state_changed(from);
                }
            }
            PlayerCommand::Fire => {
                if self.game_state.state() == GameState::Playing {
                    systems::hero::fire(
                        &mut self.stage,
                        &self.registry,
                        self.time.elapsed_secs,
                        &mut self.events,
                    );
                }
            }
            PlayerCommand::SetSpawning { enabled } => {
                tracing::info!(enabled, "enemy spawning toggled");
                self.scheduler.set_enabled(enabled);
            }
        }
    }

    /// Run all systems in order for one tick of `dt` simulated seconds.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;

        // 1. Timers
        if let Some((_, position)) =
            systems::spawner::run(&mut self.stage, &mut self.rng, &mut self.scheduler, dt)
        {
            self.events.push(SimEvent::EnemySpawned { position });
        }
        systems::firing::run(
            &mut self.stage,
            &self.registry,
            &mut self.rng,
            now,
            dt,
            &mut self.events,
        );

        // 2. Motion
        systems::movement::run(self.stage.world_mut(), dt);

        // 3. Collisions
        let hero_killed = systems::collision::run(
            &mut self.stage,
            &mut self.contacts,
            &mut self.rng,
            &mut self.score,
            &self.power_ups,
            &mut self.events,
        );
        if hero_killed {
            let from = self.game_state.state();
            if self.game_state.hero_died() {
                self.state_changed(from);
            }
        }

        // 4. Cleanup
        systems::cleanup::run(&mut self.stage, &mut self.despawn_buffer, dt);
    }

    /// Put the session back to its initial state, reseeding the RNG.
    fn reset_session(&mut self) {
        self.stage.clear();
        self.time = SimTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.scheduler = SpawnScheduler::new(&self.config.spawn);
        self.score = ScoreProgression::from_config(&self.config.progression);
        self.contacts.clear();
        tracing::info!(seed = self.config.seed, "session reset");
    }

    fn state_changed(&mut self, from: GameState) {
        self.events.push(SimEvent::StateChanged {
            from,
            to: self.game_state.state(),
        });
    }
}
