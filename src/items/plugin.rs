//! Item plugin.

use bevy::prelude::*;

use super::systems::hover_items;
use crate::core::SimulationSet;

/// Item plugin - moves ground items. Collection is driven by the player.
pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, hover_items.in_set(SimulationSet::Cleanup));
    }
}
