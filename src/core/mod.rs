//! Core module - events, scheduling, randomness and timers.
//!
//! This module provides the foundation that all other combat systems build upon.

mod data;
mod error;
mod events;
mod plugin;
mod rng;
mod timer;

pub use data::{parse_definition, read_definition, read_definition_dir, Definition, DATA_ROOT};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::{CorePlugin, SimulationSet};
pub use rng::{CombatRng, DEFAULT_SEED};
pub use timer::OneShot;
