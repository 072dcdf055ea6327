//! Enemies module - enemy entities, AI, perception, death and spawning.

pub mod ai;
mod components;
pub mod data;
mod death;
pub mod navigation;
pub mod perception;
mod plugin;
mod reactions;
mod spawning;

pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry, LootDefinition};
pub use navigation::{MoveOrder, NavigationPlugin};
pub use plugin::EnemyPlugin;
pub use spawning::{spawn_enemy, EnemyType};
