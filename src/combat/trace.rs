//! Swept box traces used by weapon hit detection.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// First blocking hit of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    pub entity: Entity,
    /// Location of the box along the sweep at the moment of contact
    pub point: Vec3,
}

/// Something that can sweep an oriented box through the world.
///
/// Implemented for Rapier's context; headless setups can supply their
/// own source. Entities for which `include` returns false are skipped.
pub trait SweepSource: Component {
    fn sweep_box(
        &self,
        start: Vec3,
        end: Vec3,
        half_extents: Vec3,
        rotation: Quat,
        include: &dyn Fn(Entity) -> bool,
    ) -> Option<TraceHit>;
}

impl SweepSource for RapierContext {
    fn sweep_box(
        &self,
        start: Vec3,
        end: Vec3,
        half_extents: Vec3,
        rotation: Quat,
        include: &dyn Fn(Entity) -> bool,
    ) -> Option<TraceHit> {
        let shape = Collider::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let travel = end - start;
        let predicate = |entity: Entity| include(entity);
        let filter = QueryFilter::default().exclude_sensors().predicate(&predicate);

        // A travel of 1.0 time units covers exactly start -> end.
        self.cast_shape(
            start,
            rotation,
            travel,
            &shape,
            ShapeCastOptions::with_max_time_of_impact(1.0),
            filter,
        )
        .map(|(entity, hit)| TraceHit {
            entity,
            point: start + travel * hit.time_of_impact,
        })
    }
}
