//! Item components: ground phase, hover motion and loot.

use bevy::prelude::*;

/// Lifecycle of a world item. `Equipped` is terminal.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemPhase {
    /// Lying in the world, bobbing, collectable.
    #[default]
    Hovering,
    Equipped,
}

/// Sine bob applied to hovering items.
#[derive(Component, Debug, Clone)]
pub struct Hover {
    pub base_height: f32,
    pub amplitude: f32,
    /// Radians per second
    pub frequency: f32,
    pub elapsed: f32,
}

impl Hover {
    pub fn at(location: Vec3) -> Self {
        Self {
            base_height: location.y,
            amplitude: 0.25,
            frequency: 5.0,
            elapsed: 0.0,
        }
    }

    /// Height offset at the current point of the cycle.
    pub fn offset(&self) -> f32 {
        self.amplitude * (self.elapsed * self.frequency).sin()
    }
}

/// Loot the player can collect by touching it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Pickup {
    Soul(u32),
    Treasure(u32),
    Health(f32),
}
