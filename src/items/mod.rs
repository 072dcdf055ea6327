//! Items module - ground weapons and loot pickups.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::ItemPlugin;
pub use systems::{spawn_health_pickup, spawn_soul, spawn_treasure};
