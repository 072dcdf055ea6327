//! UI plugin - HUD state.

use bevy::prelude::*;

use super::hud::{init_player_hud, Hud};
use crate::core::SimulationSet;

/// UI plugin - owns the HUD resource and initialises it for new players.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Hud>()
            .add_systems(Update, init_player_hud.in_set(SimulationSet::Input));
    }
}
