//! Alien Invasion: a fixed-viewport arcade shooter.
//!
//! The simulation core (`entities`, `formation`, `projectiles`, `powerups`,
//! `collision`, `compute`) is deterministic given an injected RNG and knows
//! nothing about the terminal. Rendering, input, audio, telemetry and the
//! difficulty model sit behind small seams so tests can stub them.

pub mod audio;
pub mod collision;
pub mod compute;
pub mod difficulty;
pub mod display;
pub mod driver;
pub mod entities;
pub mod error;
pub mod formation;
pub mod highscore;
pub mod powerups;
pub mod projectiles;
pub mod settings;
pub mod telemetry;

pub use compute::{Game, TickOutcome};
pub use error::GameError;
pub use settings::{DynamicSettings, FleetDirection, Settings};
