//! Slash Combat - the combat and AI core of a third-person melee action game, in Bevy.
//!
//! Players and enemies exchange damage through swept weapon traces, react
//! to hits by direction, and die once. Enemies patrol, notice, chase and
//! attack on randomized timers, and drop loot when they fall.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Simulation stages, global events, RNG, timers, data loading
//! - **Combat**: Vitals, weapons, hit detection, damage, hit reactions, death
//! - **Player**: Action state machine, targeting, dodge/equip, pickups, movement
//! - **Enemies**: AI state machine, perception, reactions, loot, spawning
//! - **Items**: Loot pickups and hover motion
//! - **UI**: HUD values and enemy health bars
//!
//! Engine collaborators (Rapier contacts, navigation, audio) live in
//! separate plugins so the simulation can run headless.

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod items;
pub mod physics;
pub mod player;
pub mod ui;

use std::marker::PhantomData;

use bevy::prelude::*;
use bevy_rapier3d::prelude::RapierContext;

use combat::SweepSource;

/// Main game plugin that adds all simulation sub-plugins.
///
/// `S` supplies weapon sweeps; the Rapier context unless a test swaps it.
pub struct SlashPlugin<S: SweepSource = RapierContext> {
    _sweep: PhantomData<S>,
}

impl<S: SweepSource> Default for SlashPlugin<S> {
    fn default() -> Self {
        Self { _sweep: PhantomData }
    }
}

impl<S: SweepSource> Plugin for SlashPlugin<S> {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin::<S>::default())

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Items
            .add_plugins(items::ItemPlugin)

            // UI
            .add_plugins(ui::UiPlugin);
    }
}
