//! Straight-line move-to navigation for AI-controlled bodies.
//!
//! Consumes `MoveToTarget` requests and walks the body toward the goal
//! entity on the ground plane at its locomotion speed. Games with a real
//! navmesh replace this plugin with their own consumer of the same event.

use bevy::prelude::*;

use super::ai::horizontal_distance;
use crate::combat::{Dead, Locomotion};
use crate::core::{MoveToTarget, SimulationSet};

/// Active move-to request of a body.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MoveOrder {
    pub goal: Entity,
    pub acceptance_radius: f32,
}

/// Latest request wins; a new one replaces the order in progress.
pub fn accept_move_orders(mut commands: Commands, mut requests: EventReader<MoveToTarget>) {
    for request in requests.read() {
        if let Some(mut entity) = commands.get_entity(request.entity) {
            entity.insert(MoveOrder {
                goal: request.goal,
                acceptance_radius: request.acceptance_radius,
            });
        }
    }
}

/// Walk toward the goal; drop the order on arrival or when the goal is gone.
pub fn follow_move_orders(
    mut commands: Commands,
    time: Res<Time>,
    mut movers: Query<(Entity, &mut Transform, &Locomotion, &MoveOrder), Without<Dead>>,
    goals: Query<&Transform, Without<MoveOrder>>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, locomotion, order) in movers.iter_mut() {
        let Ok(goal) = goals.get(order.goal) else {
            commands.entity(entity).remove::<MoveOrder>();
            continue;
        };

        let distance = horizontal_distance(transform.translation, goal.translation);
        if distance <= order.acceptance_radius {
            commands.entity(entity).remove::<MoveOrder>();
            continue;
        }

        let direction = Vec3::new(
            goal.translation.x - transform.translation.x,
            0.0,
            goal.translation.z - transform.translation.z,
        ) / distance;
        let step = (locomotion.max_speed * dt).min(distance - order.acceptance_radius);
        transform.translation += direction * step;

        if locomotion.orient_to_movement {
            transform.look_to(direction, Vec3::Y);
        }
    }
}

/// Moves AI bodies in response to `MoveToTarget`.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (accept_move_orders, follow_move_orders)
                .chain()
                .in_set(SimulationSet::Cleanup),
        );
    }
}
