//! Item spawning and hover motion.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use super::components::{Hover, ItemPhase, Pickup};
use crate::physics::{sensor, SensorKind};

const PICKUP_RADIUS: f32 = 0.5;

/// Spawn a hovering loot item with the trigger volume the player collects it through.
fn spawn_pickup(commands: &mut Commands, name: &'static str, pickup: Pickup, location: Vec3) -> Entity {
    let item = commands
        .spawn((
            Name::new(name),
            pickup,
            ItemPhase::Hovering,
            Hover::at(location),
            Transform::from_translation(location),
        ))
        .id();

    commands.entity(item).with_children(|parent| {
        parent.spawn(sensor(item, SensorKind::Pickup, Collider::ball(PICKUP_RADIUS)));
    });
    item
}

pub fn spawn_soul(commands: &mut Commands, location: Vec3, souls: u32) -> Entity {
    spawn_pickup(commands, "Soul", Pickup::Soul(souls), location)
}

pub fn spawn_treasure(commands: &mut Commands, location: Vec3, gold: u32) -> Entity {
    spawn_pickup(commands, "Treasure", Pickup::Treasure(gold), location)
}

pub fn spawn_health_pickup(commands: &mut Commands, location: Vec3, amount: f32) -> Entity {
    spawn_pickup(commands, "Health", Pickup::Health(amount), location)
}

/// Bob hovering items around their resting height.
pub fn hover_items(time: Res<Time>, mut items: Query<(&mut Transform, &mut Hover, &ItemPhase)>) {
    let dt = time.delta_secs();

    for (mut transform, mut hover, phase) in items.iter_mut() {
        if *phase != ItemPhase::Hovering {
            continue;
        }
        hover.elapsed += dt;
        transform.translation.y = hover.base_height + hover.offset();
    }
}
