//! Shared helpers for headless integration tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use slash_combat::combat::{
    spawn_equipped_weapon, CombatantBundle, EquippedWeapon, Faction, SweepSource, TraceHit, Vitals,
    WeaponDefinition, WeaponRegistry, WeaponSocket,
};
use slash_combat::core::{parse_definition, CombatRng};
use slash_combat::enemies::{spawn_enemy, EnemyDefinition, PatrolRoute};
use slash_combat::player::{spawn_player, CharacterState, PlayerConfig, PlayerState};
use slash_combat::SlashPlugin;

/// Sweep source that reports a fixed list of contacts, first eligible wins.
#[derive(Component, Default)]
pub struct ScriptedSweep {
    pub contacts: Vec<TraceHit>,
}

impl SweepSource for ScriptedSweep {
    fn sweep_box(
        &self,
        _start: Vec3,
        _end: Vec3,
        _half_extents: Vec3,
        _rotation: Quat,
        include: &dyn Fn(Entity) -> bool,
    ) -> Option<TraceHit> {
        self.contacts.iter().copied().find(|contact| include(contact.entity))
    }
}

/// Every event of type `E` seen so far.
#[derive(Resource)]
pub struct Recorded<E: Event>(pub Vec<E>);

impl<E: Event> Default for Recorded<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record<E: Event + Clone>(mut events: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(events.read().cloned());
}

/// Start collecting events of type `E` into [`Recorded`].
pub fn record_events<E: Event + Clone>(app: &mut App) {
    app.init_resource::<Recorded<E>>().add_systems(Last, record::<E>);
}

pub fn recorded<E: Event>(app: &App) -> &[E] {
    &app.world().resource::<Recorded<E>>().0
}

/// Headless app with the full simulation, stepping 100 ms per update.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(CombatRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins(SlashPlugin::<ScriptedSweep>::default());
    app.world_mut().spawn(ScriptedSweep::default());
    app
}

/// Make the sweep report a contact with `entity` at `point`.
pub fn script_contact(app: &mut App, entity: Entity, point: Vec3) {
    let mut sweeps = app.world_mut().query::<&mut ScriptedSweep>();
    for mut sweep in sweeps.iter_mut(app.world_mut()) {
        sweep.contacts.push(TraceHit { entity, point });
    }
}

pub fn sword(damage: f32) -> WeaponDefinition {
    WeaponDefinition {
        name: "Sword".to_string(),
        damage,
        ..default()
    }
}

pub fn weapon_registry() -> WeaponRegistry {
    let mut registry = WeaponRegistry::default();
    registry.insert("sword", sword(20.0));
    registry
}

pub fn spawn_test_player(app: &mut App, position: Vec3) -> Entity {
    let player = spawn_player(&mut app.world_mut().commands(), position, &PlayerConfig::default());
    app.world_mut().flush();
    player
}

/// Put a weapon in `wielder`'s hand and mark it armed when it is a player.
pub fn arm(app: &mut App, wielder: Entity, definition: &WeaponDefinition) -> Entity {
    let weapon = spawn_equipped_weapon(
        &mut app.world_mut().commands(),
        definition,
        wielder,
        WeaponSocket::RightHand,
    );
    app.world_mut().flush();

    let mut entity = app.world_mut().entity_mut(wielder);
    entity.insert(EquippedWeapon(Some(weapon)));
    if let Some(mut state) = entity.get_mut::<PlayerState>() {
        state.character = CharacterState::EquippedOneHanded;
    }
    weapon
}

/// A target with vitals and a faction but no behavior of its own.
pub fn spawn_dummy(app: &mut App, faction: Faction, position: Vec3, health: f32) -> Entity {
    app.world_mut()
        .spawn((
            Name::new("Dummy"),
            faction,
            CombatantBundle {
                vitals: Vitals::new(health, 0.0),
                ..default()
            },
            Transform::from_translation(position),
        ))
        .id()
}

pub fn enemy_definition(ron: &str) -> EnemyDefinition {
    parse_definition("test", ron).expect("valid enemy definition")
}

pub fn spawn_test_enemy(
    app: &mut App,
    definition: &EnemyDefinition,
    position: Vec3,
    route: PatrolRoute,
) -> Entity {
    let registry = weapon_registry();
    let enemy = spawn_enemy(
        &mut app.world_mut().commands(),
        "test",
        definition,
        &registry,
        position,
        route,
    );
    app.world_mut().flush();
    enemy
}

pub fn spawn_point(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((slash_combat::enemies::PatrolPoint, Transform::from_translation(position)))
        .id()
}
