//! Core plugin that sets up the simulation schedule, events and shared resources.

use bevy::prelude::*;

use super::events::*;
use super::rng::CombatRng;

/// Per-frame ordering of the combat simulation.
///
/// Inbound engine events are handled first, then weapon sweeps, then the
/// damage/hit/death chain, then AI and targeting, then cleanup.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Detection,
    Damage,
    Ai,
    Cleanup,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - The chained `SimulationSet` stages
/// - Global events (damage, hits, deaths, engine callbacks, collaborator requests)
/// - The seeded `CombatRng` (kept if the app already inserted one)
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Combat flow
            .add_event::<DamageEvent>()
            .add_event::<HitEvent>()
            .add_event::<DeathEvent>()

            // Engine -> core
            .add_event::<MontageNotify>()
            .add_event::<WeaponOverlap>()
            .add_event::<DamageLabelOverlap>()
            .add_event::<TargetRangeOverlap>()
            .add_event::<PickupOverlap>()
            .add_event::<PawnSeen>()

            // Core -> collaborators
            .add_event::<PlayMontage>()
            .add_event::<StopMontage>()
            .add_event::<PlaySoundAt>()
            .add_event::<SpawnEffectAt>()
            .add_event::<MoveToTarget>()

            .configure_sets(
                Update,
                (
                    SimulationSet::Input,
                    SimulationSet::Detection,
                    SimulationSet::Damage,
                    SimulationSet::Ai,
                    SimulationSet::Cleanup,
                )
                    .chain(),
            );

        if !app.world().contains_resource::<CombatRng>() {
            app.init_resource::<CombatRng>();
        }
    }
}
