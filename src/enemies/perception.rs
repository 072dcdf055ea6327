//! Enemy sight: noticing pawns and deciding whether to give chase.

use bevy::prelude::*;

use super::ai::chase;
use super::components::*;
use crate::combat::{CombatTarget, Dead, Faction, Locomotion};
use crate::core::{MoveToTarget, PawnSeen};

/// Whether `point` lies inside a horizontal sight cone.
///
/// A point on top of the observer counts as seen.
pub fn in_sight_cone(location: Vec3, forward: Vec3, point: Vec3, radius: f32, half_angle: f32) -> bool {
    let to_point = Vec3::new(point.x - location.x, 0.0, point.z - location.z);
    let distance = to_point.length();
    if distance > radius {
        return false;
    }

    let forward = Vec3::new(forward.x, 0.0, forward.z);
    match (forward.try_normalize(), to_point.try_normalize()) {
        (Some(forward), Some(direction)) => {
            forward.dot(direction).clamp(-1.0, 1.0).acos().to_degrees() <= half_angle
        }
        _ => true,
    }
}

/// Periodically look for pawns in each enemy's sight cone.
pub fn sense_pawns(
    time: Res<Time>,
    mut enemies: Query<(Entity, &Transform, &mut PawnSensing), (With<Enemy>, Without<Dead>)>,
    pawns: Query<(Entity, &Transform), (With<Faction>, Without<Enemy>)>,
    mut seen: EventWriter<PawnSeen>,
) {
    for (observer, transform, mut sensing) in enemies.iter_mut() {
        sensing.interval.tick(time.delta());
        if !sensing.interval.just_finished() {
            continue;
        }

        let forward = transform.forward().as_vec3();
        for (pawn, pawn_transform) in pawns.iter() {
            if in_sight_cone(
                transform.translation,
                forward,
                pawn_transform.translation,
                sensing.sight_radius,
                sensing.peripheral_angle,
            ) {
                seen.send(PawnSeen { observer, pawn });
            }
        }
    }
}

/// A passive enemy that sees a living engageable pawn starts chasing it.
pub fn react_to_seen_pawns(
    mut sightings: EventReader<PawnSeen>,
    mut enemies: Query<
        (
            &EnemyConfig,
            &mut EnemyState,
            &mut CombatTarget,
            &mut PatrolTimer,
            &mut Locomotion,
        ),
        (With<Enemy>, Without<Dead>),
    >,
    pawns: Query<(&Faction, Has<Dead>)>,
    mut moves: EventWriter<MoveToTarget>,
) {
    for sighting in sightings.read() {
        let Ok((config, mut state, mut target, mut patrol_timer, mut locomotion)) =
            enemies.get_mut(sighting.observer)
        else {
            continue;
        };

        let engageable = matches!(pawns.get(sighting.pawn), Ok((Faction::Engageable, false)));
        let should_chase = *state != EnemyState::Dead
            && *state != EnemyState::Chasing
            && state.below_attacking()
            && engageable;
        if !should_chase {
            continue;
        }

        patrol_timer.cancel();
        target.0 = Some(sighting.pawn);
        chase(
            sighting.observer,
            sighting.pawn,
            config,
            &mut state,
            &mut locomotion,
            &mut moves,
        );
    }
}
