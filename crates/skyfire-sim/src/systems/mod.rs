pub mod cleanup;
pub mod collision;
pub mod firing;
pub mod hero;
pub mod movement;
pub mod snapshot;
pub mod spawner;
