//! Bridge between Rapier collision events and the combat core's overlap events.
//!
//! Trigger volumes are sensor colliders spawned as children of the actor
//! they belong to, tagged with [`SensorOf`]. Rapier reports which collider
//! pairs started or stopped touching; this plugin turns those reports into
//! the typed overlap events the rest of the crate consumes.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::{
    DamageLabelOverlap, OverlapState, PickupOverlap, TargetRangeOverlap, WeaponOverlap,
};
use crate::items::ItemPhase;

/// What a trigger volume is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// Weapon damage box
    WeaponBox,
    /// Player volume that collects nearby enemies
    TargetDetector,
    /// Item volume the player walks into to collect it
    Pickup,
    /// Ground weapon volume that shows the damage readout
    DamageLabel,
}

/// Tags a sensor collider with its owning entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct SensorOf {
    pub owner: Entity,
    pub kind: SensorKind,
}

/// Components for a trigger volume owned by `owner`.
pub fn sensor(owner: Entity, kind: SensorKind, collider: Collider) -> impl Bundle {
    (
        SensorOf { owner, kind },
        collider,
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::all(),
        Transform::default(),
    )
}

/// Translate Rapier collision events on tagged sensors into overlap events.
pub fn translate_collision_events(
    mut collisions: EventReader<CollisionEvent>,
    sensors: Query<&SensorOf>,
    mut weapon_overlaps: EventWriter<WeaponOverlap>,
    mut range_overlaps: EventWriter<TargetRangeOverlap>,
    mut pickup_overlaps: EventWriter<PickupOverlap>,
    mut label_overlaps: EventWriter<DamageLabelOverlap>,
) {
    for collision in collisions.read() {
        let (a, b, state) = match collision {
            CollisionEvent::Started(a, b, _) => (*a, *b, OverlapState::Began),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, OverlapState::Ended),
        };

        for (this, other) in [(a, b), (b, a)] {
            let Ok(sensor) = sensors.get(this) else {
                continue;
            };
            // Only bodies count as the other side, never another trigger volume.
            if sensors.contains(other) || other == sensor.owner {
                continue;
            }

            match sensor.kind {
                SensorKind::WeaponBox => {
                    if state == OverlapState::Began {
                        weapon_overlaps.send(WeaponOverlap {
                            weapon: sensor.owner,
                            other,
                        });
                    }
                }
                SensorKind::TargetDetector => {
                    range_overlaps.send(TargetRangeOverlap {
                        player: sensor.owner,
                        other,
                        state,
                    });
                }
                SensorKind::Pickup => {
                    pickup_overlaps.send(PickupOverlap {
                        item: sensor.owner,
                        actor: other,
                        state,
                    });
                }
                SensorKind::DamageLabel => {
                    label_overlaps.send(DamageLabelOverlap {
                        weapon: sensor.owner,
                        other,
                        state,
                    });
                }
            }
        }
    }
}

/// Remove the ground-only volumes of items that have been equipped.
pub fn strip_equipped_item_sensors(
    mut commands: Commands,
    sensors: Query<(Entity, &SensorOf)>,
    items: Query<&ItemPhase, Changed<ItemPhase>>,
) {
    for (entity, sensor) in sensors.iter() {
        if !matches!(sensor.kind, SensorKind::Pickup | SensorKind::DamageLabel) {
            continue;
        }
        if matches!(items.get(sensor.owner), Ok(ItemPhase::Equipped)) {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Feeds Rapier contacts into the combat core.
pub struct PhysicsBridgePlugin;

impl Plugin for PhysicsBridgePlugin {
    fn build(&self, app: &mut App) {
        // Rapier steps in PostUpdate; translating in PreUpdate hands last
        // frame's contacts to this frame's simulation.
        app.add_event::<CollisionEvent>().add_systems(
            PreUpdate,
            (strip_equipped_item_sensors, translate_collision_events).chain(),
        );
    }
}
