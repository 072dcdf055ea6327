//! Enemy AI behavior systems.
//!
//! Each tick a living enemy either evaluates its combat target (any state
//! but `Patrolling`) or checks whether it reached its patrol point. Timers
//! tick first so a fired attack timer is seen by the same evaluation.

use bevy::prelude::*;

use super::components::*;
use crate::combat::{CombatEntity, CombatTarget, Dead, Locomotion, MontageSections};
use crate::core::{CombatRng, Montage, MontageNotify, MoveToTarget, Notify, PlayMontage};
use crate::ui::HealthBar;

/// Distance on the ground plane, ignoring height differences.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Whether a located target lies within `radius` of `origin`, measured in 3D.
pub fn within(origin: Vec3, target: Option<Vec3>, radius: f32) -> bool {
    target.is_some_and(|location| origin.distance(location) <= radius)
}

/// Switch to chasing speed and walk toward `target`.
pub(super) fn chase(
    entity: Entity,
    target: Entity,
    config: &EnemyConfig,
    state: &mut EnemyState,
    locomotion: &mut Locomotion,
    moves: &mut EventWriter<MoveToTarget>,
) {
    *state = EnemyState::Chasing;
    locomotion.max_speed = config.chasing_speed;
    moves.send(MoveToTarget {
        entity,
        goal: target,
        acceptance_radius: config.acceptance_radius,
    });
}

fn start_patrolling(
    entity: Entity,
    route: &PatrolRoute,
    config: &EnemyConfig,
    state: &mut EnemyState,
    locomotion: &mut Locomotion,
    moves: &mut EventWriter<MoveToTarget>,
) {
    *state = EnemyState::Patrolling;
    locomotion.max_speed = config.patrolling_speed;
    if let Some(goal) = route.current {
        moves.send(MoveToTarget {
            entity,
            goal,
            acceptance_radius: config.acceptance_radius,
        });
    }
}

/// Enter `Attacking` and arm the attack timer with a random delay.
pub(super) fn start_attack_timer(
    config: &EnemyConfig,
    state: &mut EnemyState,
    timer: &mut AttackTimer,
    rng: &mut CombatRng,
) {
    *state = EnemyState::Attacking;
    timer.arm(rng.range(config.attack_min, config.attack_max));
}

/// Advance patrol and attack timers and run whatever fires.
pub fn tick_enemy_timers(
    time: Res<Time>,
    mut enemies: Query<
        (
            Entity,
            &EnemyConfig,
            &PatrolRoute,
            &MontageSections,
            &mut EnemyState,
            &mut CombatTarget,
            &mut PatrolTimer,
            &mut AttackTimer,
        ),
        (With<Enemy>, Without<Dead>),
    >,
    fallen: Query<(), With<Dead>>,
    targets: Query<(), With<Transform>>,
    mut rng: ResMut<CombatRng>,
    mut moves: EventWriter<MoveToTarget>,
    mut montages: EventWriter<PlayMontage>,
) {
    let delta = time.delta();

    for (entity, config, route, sections, mut state, mut target, mut patrol_timer, mut attack_timer) in
        enemies.iter_mut()
    {
        if patrol_timer.tick(delta) {
            if let Some(goal) = route.current {
                moves.send(MoveToTarget {
                    entity,
                    goal,
                    acceptance_radius: config.acceptance_radius,
                });
            }
        }

        if !attack_timer.tick(delta) {
            continue;
        }

        // Attack: drop a target that has died or vanished, then swing.
        if target.is_some_and(|t| fallen.contains(t) || !targets.contains(t)) {
            target.0 = None;
        }
        if target.is_none() {
            continue;
        }

        *state = EnemyState::Engaged;
        match rng.pick(sections.attacks.len()) {
            Some(index) => {
                montages.send(PlayMontage {
                    entity,
                    montage: Montage::Attack,
                    section: sections.attacks[index].clone(),
                });
            }
            None => warn!("{entity} has no attack sections"),
        }
    }
}

/// Per-tick state evaluation: combat checks when aware, patrol checks otherwise.
pub fn evaluate_enemies(
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &EnemyConfig,
            &mut EnemyState,
            &mut CombatTarget,
            &mut PatrolRoute,
            &mut PatrolTimer,
            &mut AttackTimer,
            &mut Locomotion,
            &mut HealthBar,
        ),
        (With<Enemy>, Without<Dead>),
    >,
    locations: Query<&Transform>,
    mut rng: ResMut<CombatRng>,
    mut moves: EventWriter<MoveToTarget>,
) {
    for (
        entity,
        transform,
        config,
        mut state,
        mut target,
        mut route,
        mut patrol_timer,
        mut attack_timer,
        mut locomotion,
        mut health_bar,
    ) in enemies.iter_mut()
    {
        if *state == EnemyState::Dead {
            continue;
        }
        let origin = transform.translation;

        if !state.is_aware() {
            let Some(point) = route.current else {
                continue;
            };
            let point_location = locations.get(point).ok().map(|t| t.translation);
            if within(origin, point_location, config.patrol_radius) {
                if let Some(next) = route.choose_next(&mut rng) {
                    route.current = Some(next);
                    patrol_timer.arm(rng.range(config.patrol_wait_min, config.patrol_wait_max));
                }
            }
            continue;
        }

        let target_location = target.and_then(|t| locations.get(t).ok()).map(|t| t.translation);
        if target_location.is_none() {
            target.0 = None;
        }

        if !within(origin, target_location, config.combat_radius) {
            attack_timer.cancel();
            target.0 = None;
            health_bar.visible = false;
            if *state != EnemyState::Engaged {
                start_patrolling(entity, &route, config, &mut state, &mut locomotion, &mut moves);
            }
        } else if !within(origin, target_location, config.attack_radius) {
            if *state != EnemyState::Chasing {
                attack_timer.cancel();
                if *state != EnemyState::Engaged {
                    if let Some(goal) = target.0 {
                        chase(entity, goal, config, &mut state, &mut locomotion, &mut moves);
                    }
                }
            }
        } else {
            let stance = EnemyStance {
                state: *state,
                target_in_attack_radius: true,
            };
            if stance.can_attack() {
                start_attack_timer(config, &mut state, &mut attack_timer, &mut rng);
            }
        }
    }
}

/// The end of an attack swing leaves `Engaged` for a fresh evaluation.
pub fn handle_enemy_notifies(
    mut notifies: EventReader<MontageNotify>,
    mut enemies: Query<&mut EnemyState, (With<Enemy>, Without<Dead>)>,
) {
    for event in notifies.read() {
        if event.notify != Notify::AttackEnd {
            continue;
        }
        let Ok(mut state) = enemies.get_mut(event.entity) else {
            continue;
        };
        if *state != EnemyState::Dead {
            *state = EnemyState::NoState;
        }
    }
}
