//! SKYFIRE headless driver.
//!
//! Runs the simulation on a dedicated game-loop thread with a stand-in host
//! physics layer, so whole sessions can be played from the command line.

pub mod game_loop;
pub mod logging;
pub mod physics;
pub mod state;

pub use skyfire_core as core;
