//! Weapon hit detection.
//!
//! When a weapon's damage box overlaps something, the blade is swept from
//! base to tip and the first eligible actor it meets takes the weapon's
//! damage. Every actor struck is remembered until collision is switched
//! again, so one swing lands on each actor at most once.

use bevy::prelude::*;

use super::components::{EquippedWeapon, Faction};
use super::trace::SweepSource;
use super::weapon::{DamageLabel, Weapon, WeaponCollision, Wielder};
use crate::core::{
    DamageEvent, DamageLabelOverlap, EffectCue, HitEvent, MontageNotify, Notify, OverlapState,
    SpawnEffectAt, WeaponOverlap,
};

fn same_faction(factions: &Query<&Faction>, a: Entity, b: Entity) -> bool {
    match (factions.get(a), factions.get(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Resolve weapon-box overlaps into damage and hit events.
pub fn detect_weapon_hits<S: SweepSource>(
    mut overlaps: EventReader<WeaponOverlap>,
    mut weapons: Query<(&Weapon, &mut WeaponCollision, &Wielder, &GlobalTransform)>,
    factions: Query<&Faction>,
    sweepers: Query<&S>,
    mut damage_events: EventWriter<DamageEvent>,
    mut hit_events: EventWriter<HitEvent>,
    mut effects: EventWriter<SpawnEffectAt>,
) {
    for overlap in overlaps.read() {
        let Ok((weapon, mut collision, wielder, transform)) = weapons.get_mut(overlap.weapon) else {
            continue;
        };
        if !collision.is_enabled() {
            continue;
        }

        let wielder = wielder.0;
        if same_faction(&factions, wielder, overlap.other) {
            continue;
        }

        let Some(sweeper) = sweepers.iter().next() else {
            warn!("No sweep source available, dropping weapon overlap");
            continue;
        };

        let start = transform.transform_point(weapon.blade_start);
        let end = transform.transform_point(weapon.blade_end);
        let (_, rotation, _) = transform.to_scale_rotation_translation();

        let hit = {
            let include = |entity: Entity| {
                entity != overlap.weapon && entity != wielder && !collision.ignores(entity)
            };
            sweeper.sweep_box(start, end, weapon.trace_extent, rotation, &include)
        };
        let Some(hit) = hit else {
            continue;
        };

        collision.ignore(hit.entity);

        if same_faction(&factions, wielder, hit.entity) {
            continue;
        }

        debug!("{} struck {:?} for {}", weapon.name, hit.entity, weapon.damage);

        damage_events.send(DamageEvent {
            target: hit.entity,
            instigator: wielder,
            amount: weapon.damage,
        });
        hit_events.send(HitEvent {
            target: hit.entity,
            impact_point: hit.point,
            hitter: Some(wielder),
        });
        effects.send(SpawnEffectAt {
            effect: EffectCue::ImpactField,
            location: hit.point,
        });
    }
}

/// Switch the equipped weapon's damage collision from animation notifies.
pub fn handle_weapon_collision_notifies(
    mut notifies: EventReader<MontageNotify>,
    wielders: Query<&EquippedWeapon>,
    mut weapons: Query<&mut WeaponCollision>,
) {
    for event in notifies.read() {
        let enabled = match event.notify {
            Notify::EnableWeaponCollision => true,
            Notify::DisableWeaponCollision => false,
            _ => continue,
        };

        let Some(weapon) = wielders.get(event.entity).ok().and_then(|equipped| equipped.0) else {
            continue;
        };
        if let Ok(mut collision) = weapons.get_mut(weapon) {
            collision.set_enabled(enabled);
        }
    }
}

/// Show a ground weapon's damage readout while an engageable actor is near it.
pub fn toggle_damage_labels(
    mut overlaps: EventReader<DamageLabelOverlap>,
    mut labels: Query<&mut DamageLabel>,
    factions: Query<&Faction>,
) {
    for overlap in overlaps.read() {
        if !matches!(factions.get(overlap.other), Ok(Faction::Engageable)) {
            continue;
        }
        if let Ok(mut label) = labels.get_mut(overlap.weapon) {
            label.visible = overlap.state == OverlapState::Began;
        }
    }
}
