//! Nearest-enemy targeting and motion-warp targets.

use bevy::prelude::*;

use super::components::*;
use crate::combat::{CombatTarget, Dead, Faction};
use crate::core::{DeathEvent, OverlapState, TargetRangeOverlap};

/// Closest candidate to `origin`. Ties keep the earliest candidate.
pub fn nearest_candidate(
    origin: Vec3,
    candidates: impl IntoIterator<Item = (Entity, Vec3)>,
) -> Option<(Entity, Vec3)> {
    let mut best: Option<(Entity, Vec3, f32)> = None;

    for (entity, location) in candidates {
        let distance = origin.distance(location);
        if best.map_or(true, |(_, _, closest)| closest > distance) {
            best = Some((entity, location, distance));
        }
    }

    best.map(|(entity, location, _)| (entity, location))
}

/// Point `distance` in front of `target` on the line toward `origin`.
pub fn warp_translation(origin: Vec3, target: Vec3, distance: f32) -> Vec3 {
    target + (origin - target).normalize_or_zero() * distance
}

/// Keep the in-range set in step with the detection volume.
pub fn track_targets_in_range(
    mut overlaps: EventReader<TargetRangeOverlap>,
    mut players: Query<
        (&mut InRangeTargets, &mut CombatTarget, &mut WarpTargets),
        (With<Player>, With<TargetDetector>),
    >,
    enemies: Query<&Faction, Without<Dead>>,
) {
    for overlap in overlaps.read() {
        let Ok((mut in_range, mut target, mut warp)) = players.get_mut(overlap.player) else {
            continue;
        };

        match overlap.state {
            OverlapState::Began => {
                if matches!(enemies.get(overlap.other), Ok(Faction::Enemy)) {
                    in_range.add_unique(overlap.other);
                }
            }
            OverlapState::Ended => {
                in_range.remove(overlap.other);
                if target.0 == Some(overlap.other) {
                    target.0 = None;
                    warp.clear();
                }
            }
        }
    }
}

/// Focus the nearest in-range enemy and aim the attack warp at it.
pub fn select_nearest_target(
    mut players: Query<
        (&Transform, &PlayerConfig, &mut InRangeTargets, &mut CombatTarget, &mut WarpTargets),
        (With<Player>, Without<Dead>),
    >,
    locations: Query<&Transform, Without<Player>>,
) {
    for (transform, config, mut in_range, mut target, mut warp) in players.iter_mut() {
        in_range.0.retain(|candidate| locations.contains(*candidate));

        let origin = transform.translation;
        let candidates = in_range
            .0
            .iter()
            .filter_map(|candidate| locations.get(*candidate).ok().map(|t| (*candidate, t.translation)));

        match nearest_candidate(origin, candidates) {
            Some((entity, location)) => {
                target.0 = Some(entity);
                warp.translation = Some(warp_translation(origin, location, config.warp_target_distance));
                warp.rotation = Some(location);
            }
            None => {
                if target.0.is_some() || warp.translation.is_some() {
                    target.0 = None;
                    warp.clear();
                }
            }
        }
    }
}

/// Forget enemies the moment they die.
pub fn forget_dead_targets(
    mut deaths: EventReader<DeathEvent>,
    mut players: Query<(&mut InRangeTargets, &mut CombatTarget, &mut WarpTargets), With<Player>>,
) {
    for death in deaths.read() {
        for (mut in_range, mut target, mut warp) in players.iter_mut() {
            in_range.remove(death.entity);
            if target.0 == Some(death.entity) {
                target.0 = None;
                warp.clear();
            }
        }
    }
}
