//! Directional hit reactions.

use bevy::prelude::*;

/// Side of the victim a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitDirection {
    Front,
    Right,
    Left,
    Back,
}

impl HitDirection {
    /// Hit-react montage section for this side.
    pub fn section(self) -> &'static str {
        match self {
            HitDirection::Front => "FromFront",
            HitDirection::Right => "FromRight",
            HitDirection::Left => "FromLeft",
            HitDirection::Back => "FromBack",
        }
    }

    /// Bucket a signed angle in degrees.
    pub fn from_angle(theta: f32) -> Self {
        if (-45.0..45.0).contains(&theta) {
            HitDirection::Front
        } else if (45.0..135.0).contains(&theta) {
            HitDirection::Right
        } else if (-135.0..-45.0).contains(&theta) {
            HitDirection::Left
        } else {
            HitDirection::Back
        }
    }
}

/// Signed angle in degrees between `forward` and the horizontal direction to `point`.
///
/// The point is flattened onto the victim's height first. Positive angles
/// lie on the victim's right: with Y up, that is where the vertical
/// component of `forward × to_point` is negative.
pub fn hit_angle(location: Vec3, forward: Vec3, point: Vec3) -> f32 {
    let flattened = Vec3::new(point.x, location.y, point.z);
    let to_point = (flattened - location).normalize_or_zero();
    let forward = forward.normalize_or_zero();

    let cos_theta = forward.dot(to_point).clamp(-1.0, 1.0);
    let theta = cos_theta.acos().to_degrees();

    if forward.cross(to_point).y > 0.0 {
        -theta
    } else {
        theta
    }
}

/// Which side of a victim at `location` facing `forward` was struck from `point`.
pub fn classify_hit(location: Vec3, forward: Vec3, point: Vec3) -> HitDirection {
    HitDirection::from_angle(hit_angle(location, forward, point))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORWARD: Vec3 = Vec3::X;

    #[test]
    fn hit_ahead_is_front_regardless_of_height() {
        assert_eq!(classify_hit(Vec3::ZERO, FORWARD, Vec3::new(1.0, 5.0, 0.0)), HitDirection::Front);
    }

    #[test]
    fn hit_behind_is_back() {
        assert_eq!(classify_hit(Vec3::ZERO, FORWARD, Vec3::new(-1.0, 0.0, 0.0)), HitDirection::Back);
    }

    #[test]
    fn lateral_hits_match_the_victims_sides() {
        let victim = Transform::IDENTITY;
        let forward = victim.forward().as_vec3();
        let right = victim.right().as_vec3();

        assert!((hit_angle(Vec3::ZERO, forward, right * 2.0) - 90.0).abs() < 1e-3);
        assert_eq!(classify_hit(Vec3::ZERO, forward, right * 2.0), HitDirection::Right);
        assert_eq!(classify_hit(Vec3::ZERO, forward, -right * 2.0), HitDirection::Left);
    }

    #[test]
    fn turned_victim_keeps_its_sides() {
        let victim = Transform::from_xyz(3.0, 0.0, -2.0).looking_to(Vec3::X, Vec3::Y);
        let location = victim.translation;
        let forward = victim.forward().as_vec3();

        let from_right = location + victim.right().as_vec3() + forward * 0.2;
        let from_left = location + victim.left().as_vec3() + forward * 0.2;
        assert_eq!(classify_hit(location, forward, from_right), HitDirection::Right);
        assert_eq!(classify_hit(location, forward, from_left), HitDirection::Left);
    }

    #[test]
    fn bucket_edges_are_half_open() {
        assert_eq!(HitDirection::from_angle(-45.0), HitDirection::Front);
        assert_eq!(HitDirection::from_angle(45.0), HitDirection::Right);
        assert_eq!(HitDirection::from_angle(135.0), HitDirection::Back);
        assert_eq!(HitDirection::from_angle(-135.0), HitDirection::Left);
        assert_eq!(HitDirection::from_angle(-135.1), HitDirection::Back);
        assert_eq!(HitDirection::from_angle(180.0), HitDirection::Back);
    }

    #[test]
    fn victim_position_is_respected() {
        let location = Vec3::new(10.0, 1.0, 10.0);
        let point = location + Vec3::new(-3.0, -1.0, 0.2);
        assert_eq!(classify_hit(location, FORWARD, point), HitDirection::Back);
    }

    #[test]
    fn coincident_point_does_not_produce_nan() {
        let theta = hit_angle(Vec3::ONE, FORWARD, Vec3::ONE);
        assert!(theta.is_finite());
        assert_eq!(HitDirection::from_angle(theta), HitDirection::Right);
    }

    #[test]
    fn sections_match_montage_names() {
        assert_eq!(HitDirection::Front.section(), "FromFront");
        assert_eq!(HitDirection::Left.section(), "FromLeft");
        assert_eq!(HitDirection::Right.section(), "FromRight");
        assert_eq!(HitDirection::Back.section(), "FromBack");
    }
}
