//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use super::death;
use super::perception;
use super::reactions;
use super::spawning::initialize_enemies;
use crate::combat::{load_weapon_definitions, CombatSet};
use crate::core::SimulationSet;

/// Enemy plugin - handles enemy AI, perception, reactions, death and loot.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            // Weapon keys in enemy definitions resolve against the weapon registry
            .add_systems(Startup, load_enemy_definitions.after(load_weapon_definitions))
            // Engine callbacks: first-frame setup, notifies, sight
            .add_systems(
                Update,
                (
                    initialize_enemies,
                    ai::handle_enemy_notifies,
                    perception::sense_pawns,
                    perception::react_to_seen_pawns,
                )
                    .chain()
                    .in_set(SimulationSet::Input),
            )
            .add_systems(Update, reactions::react_to_enemy_damage.in_set(CombatSet::DamageReactions))
            .add_systems(Update, reactions::react_to_enemy_hits.in_set(CombatSet::HitReactions))
            .add_systems(Update, death::handle_enemy_death.in_set(CombatSet::DeathReactions))
            // Timers fire before evaluation so a swing started this tick is seen
            .add_systems(
                Update,
                (ai::tick_enemy_timers, ai::evaluate_enemies)
                    .chain()
                    .in_set(SimulationSet::Ai),
            )
            .add_systems(Update, death::despawn_expired.in_set(SimulationSet::Cleanup));
    }
}
