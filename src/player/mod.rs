//! Player module - action state machine, targeting, pickups and movement.

mod actions;
mod components;
mod movement;
mod pickup;
mod plugin;
pub mod targeting;

pub use actions::{PlayerAction, PlayerInput};
pub use components::*;
pub use movement::spawn_player;
pub use plugin::PlayerPlugin;
