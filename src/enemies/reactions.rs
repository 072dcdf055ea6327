//! How enemies respond to damage and to being hit.

use bevy::prelude::*;

use super::ai::{chase, start_attack_timer, within};
use super::components::*;
use crate::combat::{CombatTarget, Dead, Locomotion, Vitals};
use crate::core::{CombatRng, DamageEvent, HitEvent, Montage, MoveToTarget, StopMontage};
use crate::ui::HealthBar;

/// Blend-out used when a hit interrupts an attack swing.
const HIT_STOP_BLEND_OUT: f32 = 0.25;

/// Turn on whoever dealt the damage.
pub fn react_to_enemy_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut enemies: Query<
        (
            &Transform,
            &EnemyConfig,
            &Vitals,
            &mut EnemyState,
            &mut CombatTarget,
            &mut Locomotion,
            &mut HealthBar,
        ),
        (With<Enemy>, Without<Dead>),
    >,
    locations: Query<&Transform>,
    mut moves: EventWriter<MoveToTarget>,
) {
    for event in damage_events.read() {
        let Ok((transform, config, vitals, mut state, mut target, mut locomotion, mut health_bar)) =
            enemies.get_mut(event.target)
        else {
            continue;
        };

        health_bar.percent = vitals.health_percent();
        target.0 = Some(event.instigator);

        let Ok(instigator) = locations.get(event.instigator) else {
            continue;
        };
        if within(transform.translation, Some(instigator.translation), config.attack_radius) {
            *state = EnemyState::Attacking;
        } else {
            chase(
                event.target,
                event.instigator,
                config,
                &mut state,
                &mut locomotion,
                &mut moves,
            );
        }
    }
}

/// Interrupt whatever the enemy was doing and, if still standing and in
/// reach, line up the next attack.
pub fn react_to_enemy_hits(
    mut hits: EventReader<HitEvent>,
    mut enemies: Query<
        (
            &Transform,
            &EnemyConfig,
            &Vitals,
            &CombatTarget,
            &mut EnemyState,
            &mut PatrolTimer,
            &mut AttackTimer,
            &mut HealthBar,
            Has<Dead>,
        ),
        With<Enemy>,
    >,
    locations: Query<&Transform>,
    mut rng: ResMut<CombatRng>,
    mut stops: EventWriter<StopMontage>,
) {
    for hit in hits.read() {
        let Ok((
            transform,
            config,
            vitals,
            target,
            mut state,
            mut patrol_timer,
            mut attack_timer,
            mut health_bar,
            is_dead,
        )) = enemies.get_mut(hit.target)
        else {
            continue;
        };

        let dead = is_dead || !vitals.is_alive();
        if !dead {
            health_bar.visible = true;
        }

        patrol_timer.cancel();
        attack_timer.cancel();
        stops.send(StopMontage {
            entity: hit.target,
            montage: Montage::Attack,
            blend_out: HIT_STOP_BLEND_OUT,
        });

        let target_location = target.and_then(|t| locations.get(t).ok()).map(|t| t.translation);
        if !dead && within(transform.translation, target_location, config.attack_radius) {
            start_attack_timer(config, &mut state, &mut attack_timer, &mut rng);
        }
    }
}
