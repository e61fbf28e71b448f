//! Core types and definitions for the Skyfire simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, commands, snapshots, events, weapon definitions, session
//! configuration and constants. It has no dependency on the ECS or any
//! runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
pub mod weapons;

#[cfg(test)]
mod tests;
