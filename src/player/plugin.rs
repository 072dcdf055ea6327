//! Player plugin - actions, targeting, pickups and movement.

use bevy::input::InputPlugin;
use bevy::prelude::*;

use super::actions::{self, PlayerInput};
use super::movement::apply_movement_intent;
use super::pickup::handle_pickup_overlaps;
use super::targeting;
use crate::combat::CombatSet;
use crate::core::SimulationSet;

/// Player plugin - drives the player's action state machine.
///
/// Keyboard and mouse bindings are only installed when Bevy's input
/// plugin is present; headless apps feed `PlayerInput` events directly.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInput>()
            .add_systems(
                Update,
                (
                    actions::handle_player_notifies,
                    targeting::track_targets_in_range,
                    handle_pickup_overlaps,
                    actions::handle_player_input,
                )
                    .chain()
                    .in_set(SimulationSet::Input),
            )
            .add_systems(Update, actions::update_health_hud.in_set(CombatSet::DamageReactions))
            .add_systems(Update, actions::react_to_player_hits.in_set(CombatSet::HitReactions))
            .add_systems(
                Update,
                (actions::handle_player_death, targeting::forget_dead_targets)
                    .in_set(CombatSet::DeathReactions),
            )
            .add_systems(
                Update,
                (
                    actions::regenerate_stamina,
                    targeting::select_nearest_target,
                    apply_movement_intent,
                )
                    .chain()
                    .in_set(SimulationSet::Ai),
            );

        if app.is_plugin_added::<InputPlugin>() {
            app.add_systems(
                Update,
                (actions::read_keyboard_input, actions::read_mouse_look)
                    .before(actions::handle_player_input)
                    .in_set(SimulationSet::Input),
            );
        }
    }
}
