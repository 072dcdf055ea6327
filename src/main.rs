//! Slash Combat - Entry Point
//!
//! A small arena: the player, a ground weapon, and an enemy patrolling
//! between two points.
//!
//! Controls:
//! - WASD: Move
//! - Mouse: Look around
//! - Space: Jump
//! - E: Pick up / arm / disarm
//! - Left click: Attack
//! - Left Ctrl: Dodge

use std::path::Path;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use slash_combat::audio::CombatAudioPlugin;
use slash_combat::combat::{load_weapon_definitions, spawn_ground_weapon, WeaponRegistry};
use slash_combat::core::{read_definition, DATA_ROOT};
use slash_combat::enemies::data::load_enemy_definitions;
use slash_combat::enemies::{spawn_enemy, EnemyRegistry, NavigationPlugin, PatrolPoint, PatrolRoute};
use slash_combat::items::spawn_treasure;
use slash_combat::physics::PhysicsBridgePlugin;
use slash_combat::player::{spawn_player, PlayerConfig};
use slash_combat::SlashPlugin;

fn main() {
    App::new()
        // Bevy default plugins; Kira replaces Bevy's own audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Slash Combat".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(PhysicsBridgePlugin)

        // Collaborators
        .add_plugins(NavigationPlugin)
        .add_plugins(CombatAudioPlugin)

        // Our game plugin
        .add_plugins(SlashPlugin::<RapierContext>::default())

        .add_systems(
            Startup,
            setup_arena
                .after(load_weapon_definitions)
                .after(load_enemy_definitions),
        )
        .run();
}

fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    enemies: Res<EnemyRegistry>,
    weapons: Res<WeaponRegistry>,
) {
    // Ground
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(40.0, 40.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.32, 0.28))),
        Transform::default(),
        Collider::cuboid(20.0, 0.05, 20.0),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let config = read_definition::<PlayerConfig>(&Path::new(DATA_ROOT).join("player.ron"))
        .unwrap_or_else(|e| {
            warn!("Using default player config: {}", e);
            PlayerConfig::default()
        });
    let player = spawn_player(&mut commands, Vec3::new(0.0, 1.0, 6.0), &config);
    commands.entity(player).with_children(|parent| {
        parent.spawn((
            Camera3d::default(),
            Transform::from_xyz(0.0, 2.0, 4.0).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
        ));
    });

    match weapons.get("sword") {
        Some(sword) => {
            spawn_ground_weapon(&mut commands, sword, Vec3::new(1.5, 1.0, 4.0));
        }
        None => warn!("No sword definition; the arena has no ground weapon"),
    }
    spawn_treasure(&mut commands, Vec3::new(-2.0, 1.0, 3.0), 25);

    let patrol_points: Vec<Entity> = [Vec3::new(-6.0, 1.0, -6.0), Vec3::new(6.0, 1.0, -6.0)]
        .into_iter()
        .map(|location| {
            commands
                .spawn((Name::new("Patrol Point"), PatrolPoint, Transform::from_translation(location)))
                .id()
        })
        .collect();

    match enemies.get("paladin") {
        Some(definition) => {
            spawn_enemy(
                &mut commands,
                "paladin",
                definition,
                &weapons,
                Vec3::new(0.0, 1.0, -6.0),
                PatrolRoute::new(patrol_points),
            );
        }
        None => warn!("No paladin definition; the arena has no enemy"),
    }
}
