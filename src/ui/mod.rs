//! UI module - HUD values and enemy health bars.

mod hud;
mod plugin;

pub use hud::{HealthBar, Hud};
pub use plugin::UiPlugin;
