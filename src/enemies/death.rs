//! Enemy death: shutting the body down, dropping loot and removing the corpse.

use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;

use super::components::*;
use crate::combat::{spawn_ground_weapon, EquippedWeapon, Locomotion, Vitals, WeaponCollision};
use crate::core::{CombatRng, DeathEvent};
use crate::items::{spawn_health_pickup, spawn_soul};
use crate::ui::HealthBar;

const SOUL_OFFSET: Vec3 = Vec3::new(0.0, 1.25, 0.0);
const HEALTH_OFFSET: Vec3 = Vec3::new(-1.0, 0.0, 0.8);
const WEAPON_OFFSET: Vec3 = Vec3::new(1.0, 0.0, -0.8);

/// Put a dead enemy to rest and drop its loot. Runs once per death.
pub fn handle_enemy_death(
    mut commands: Commands,
    mut deaths: EventReader<DeathEvent>,
    mut enemies: Query<
        (
            &Transform,
            &EnemyConfig,
            &Vitals,
            &Loot,
            &EquippedWeapon,
            &mut EnemyState,
            &mut PatrolTimer,
            &mut AttackTimer,
            &mut HealthBar,
            &mut Locomotion,
        ),
        With<Enemy>,
    >,
    mut weapons: Query<&mut WeaponCollision>,
    mut rng: ResMut<CombatRng>,
) {
    for death in deaths.read() {
        let Ok((
            transform,
            config,
            vitals,
            loot,
            equipped,
            mut state,
            mut patrol_timer,
            mut attack_timer,
            mut health_bar,
            mut locomotion,
        )) = enemies.get_mut(death.entity)
        else {
            continue;
        };
        if *state == EnemyState::Dead {
            continue;
        }

        *state = EnemyState::Dead;
        attack_timer.cancel();
        patrol_timer.cancel();
        health_bar.visible = false;
        locomotion.orient_to_movement = false;

        commands.entity(death.entity).insert((
            ColliderDisabled,
            Lifespan(Timer::from_seconds(config.death_lifespan, TimerMode::Once)),
        ));

        if let Some(mut collision) = equipped.and_then(|weapon| weapons.get_mut(weapon).ok()) {
            collision.set_enabled(false);
        }

        spawn_loot(&mut commands, &mut rng, transform.translation, vitals.souls, loot);
    }
}

/// A soul always drops; health and a weapon drop by chance.
fn spawn_loot(commands: &mut Commands, rng: &mut CombatRng, location: Vec3, souls: u32, loot: &Loot) {
    spawn_soul(commands, location + SOUL_OFFSET, souls);

    if loot.spawnable_health > 0.0 && rng.chance(loot.health_drop_chance) {
        spawn_health_pickup(commands, location + HEALTH_OFFSET, loot.spawnable_health);
    }

    if rng.chance(loot.weapon_drop_chance) {
        if let Some(index) = rng.pick(loot.weapon_drops.len()) {
            spawn_ground_weapon(commands, &loot.weapon_drops[index], location + WEAPON_OFFSET);
        }
    }
}

/// Remove corpses whose lifespan ran out, weapon included.
pub fn despawn_expired(
    mut commands: Commands,
    time: Res<Time>,
    mut corpses: Query<(Entity, &mut Lifespan)>,
) {
    for (entity, mut lifespan) in corpses.iter_mut() {
        lifespan.0.tick(time.delta());
        if lifespan.0.finished() {
            debug!("Despawning {entity}");
            commands.entity(entity).despawn_recursive();
        }
    }
}
