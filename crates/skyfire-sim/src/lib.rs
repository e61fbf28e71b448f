//! Simulation engine for SKYFIRE.
//!
//! Owns the entity stage, runs the spawn, fire, motion, collision and
//! cleanup systems each tick, and produces GameStateSnapshots for the host.

pub mod engine;
pub mod game_state;
pub mod host;
pub mod power_ups;
pub mod progression;
pub mod stage;
pub mod systems;
pub mod weapons;

pub use engine::SimulationEngine;
pub use skyfire_core as core;
