//! Collecting loot and noticing ground weapons.

use std::collections::HashSet;

use bevy::prelude::*;

use super::components::{OverlappingItem, Player};
use crate::combat::{Dead, Vitals, Weapon};
use crate::core::{EffectCue, OverlapState, PickupOverlap, PlaySoundAt, SoundCue, SpawnEffectAt};
use crate::items::{ItemPhase, Pickup};
use crate::ui::Hud;

/// Handle the player touching items.
///
/// Ground weapons are only remembered here; equipping happens on interact.
/// Loot is applied on contact, then despawned. Each pickup pays out once.
#[allow(clippy::too_many_arguments)]
pub fn handle_pickup_overlaps(
    mut commands: Commands,
    mut overlaps: EventReader<PickupOverlap>,
    mut players: Query<(&mut Vitals, &mut OverlappingItem), (With<Player>, Without<Dead>)>,
    weapons: Query<&ItemPhase, With<Weapon>>,
    loot: Query<(&Pickup, &Transform)>,
    mut sounds: EventWriter<PlaySoundAt>,
    mut effects: EventWriter<SpawnEffectAt>,
    mut hud: Option<ResMut<Hud>>,
) {
    let mut collected = HashSet::new();

    for overlap in overlaps.read() {
        let Ok((mut vitals, mut overlapping)) = players.get_mut(overlap.actor) else {
            continue;
        };

        if let Ok(phase) = weapons.get(overlap.item) {
            match overlap.state {
                OverlapState::Began if *phase == ItemPhase::Hovering => {
                    overlapping.0 = Some(overlap.item);
                }
                OverlapState::Ended if overlapping.0 == Some(overlap.item) => {
                    overlapping.0 = None;
                }
                _ => {}
            }
            continue;
        }

        if overlap.state != OverlapState::Began {
            continue;
        }
        let Ok((pickup, transform)) = loot.get(overlap.item) else {
            continue;
        };
        if !collected.insert(overlap.item) {
            continue;
        }

        match *pickup {
            Pickup::Soul(souls) => {
                vitals.add_souls(souls);
                if let Some(hud) = hud.as_mut() {
                    hud.set_souls(vitals.souls);
                }
            }
            Pickup::Treasure(gold) => {
                vitals.add_gold(gold);
                if let Some(hud) = hud.as_mut() {
                    hud.set_gold(vitals.gold);
                }
            }
            Pickup::Health(amount) => {
                vitals.heal(amount);
                if let Some(hud) = hud.as_mut() {
                    hud.set_health_percent(vitals.health_percent());
                }
            }
        }

        sounds.send(PlaySoundAt {
            cue: SoundCue::Pickup,
            location: transform.translation,
        });
        effects.send(SpawnEffectAt {
            effect: EffectCue::PickupBurst,
            location: transform.translation,
        });
        commands.entity(overlap.item).despawn_recursive();
        debug!("{} collected {:?}", overlap.actor, pickup);
    }
}
