//! Combat plugin - weapons, hit detection, damage and death.

use std::marker::PhantomData;

use bevy::prelude::*;
use bevy_rapier3d::prelude::RapierContext;

use super::hit_detector;
use super::systems;
use super::trace::SweepSource;
use super::weapon::{load_weapon_definitions, WeaponRegistry};
use crate::core::SimulationSet;

/// Combat plugin - handles all combat systems.
///
/// `S` is the sweep source used by weapon hit detection; by default the
/// Rapier context.
pub struct CombatPlugin<S: SweepSource = RapierContext> {
    _sweep: PhantomData<S>,
}

impl<S: SweepSource> Default for CombatPlugin<S> {
    fn default() -> Self {
        Self { _sweep: PhantomData }
    }
}

impl<S: SweepSource> Plugin for CombatPlugin<S> {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);

        app.init_resource::<WeaponRegistry>()
            .add_systems(Startup, load_weapon_definitions)
            .add_systems(
                Update,
                (
                    hit_detector::handle_weapon_collision_notifies,
                    hit_detector::toggle_damage_labels,
                )
                    .in_set(SimulationSet::Input),
            )
            .add_systems(
                Update,
                hit_detector::detect_weapon_hits::<S>.in_set(SimulationSet::Detection),
            );
    }
}
