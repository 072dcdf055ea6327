//! Enemy spawning and first-frame setup.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::data::EnemyDefinition;
use crate::combat::{
    spawn_equipped_weapon, CombatantBundle, EquippedWeapon, Faction, Locomotion, MontageSections,
    Vitals, WeaponRegistry, WeaponSocket,
};
use crate::core::MoveToTarget;
use crate::ui::HealthBar;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Spawn an enemy from its definition, armed with its default weapon.
///
/// Weapon keys (default weapon and drops) are resolved through `weapons`;
/// unknown keys are logged and skipped.
pub fn spawn_enemy(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    weapons: &WeaponRegistry,
    position: Vec3,
    route: PatrolRoute,
) -> Entity {
    let defaults = MontageSections::default();
    let sections = MontageSections {
        attacks: definition.attack_sections.clone().unwrap_or(defaults.attacks),
        deaths: definition.death_sections.clone().unwrap_or(defaults.deaths),
    };
    let loot = Loot {
        spawnable_health: definition.loot.spawnable_health,
        health_drop_chance: definition.loot.health_drop_chance,
        weapon_drops: weapons.resolve(&definition.loot.weapon_drops),
        weapon_drop_chance: definition.loot.weapon_drop_chance,
    };
    let collider = &definition.collider;

    let enemy = commands
        .spawn((
            Name::new(definition.name.clone()),
            Enemy,
            EnemyType(enemy_type.to_string()),
            Faction::Enemy,
            CombatantBundle {
                vitals: Vitals::new(definition.max_health, 0.0).with_souls(definition.souls),
                sections,
                locomotion: Locomotion {
                    max_speed: definition.ai.patrolling_speed,
                    orient_to_movement: true,
                },
                ..default()
            },
            EnemyState::default(),
            definition.ai.clone(),
            route,
            PatrolTimer::default(),
            AttackTimer::default(),
            loot,
            PawnSensing::default(),
            HealthBar::default(),
            Transform::from_translation(position),
        ))
        .insert((
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(collider.half_height, collider.radius),
        ))
        .id();

    if let Some(key) = &definition.default_weapon {
        match weapons.get(key) {
            Some(weapon_definition) => {
                let weapon = spawn_equipped_weapon(commands, weapon_definition, enemy, WeaponSocket::EnemyHand);
                commands.entity(enemy).insert(EquippedWeapon(Some(weapon)));
            }
            None => warn!("Unknown default weapon '{}' for {}", key, definition.name),
        }
    }

    info!("Spawned {} at {}", definition.name, position);
    enemy
}

/// Hide the health bar and start walking toward the first patrol point.
pub fn initialize_enemies(
    mut enemies: Query<(Entity, &PatrolRoute, &EnemyConfig, &mut HealthBar), Added<Enemy>>,
    mut moves: EventWriter<MoveToTarget>,
) {
    for (entity, route, config, mut health_bar) in enemies.iter_mut() {
        health_bar.visible = false;

        if let Some(goal) = route.current {
            moves.send(MoveToTarget {
                entity,
                goal,
                acceptance_radius: config.acceptance_radius,
            });
        }
    }
}
