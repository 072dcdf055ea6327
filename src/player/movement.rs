//! Player locomotion and spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{CombatantBundle, Faction, Locomotion, MontageSections, Vitals};
use crate::physics::{sensor, SensorKind};

/// Turn accumulated movement intent into character controller motion.
///
/// Look input yaws the body. Horizontal movement is relative to facing;
/// vertical motion integrates gravity and jumps. Intent is consumed.
pub fn apply_movement_intent(
    time: Res<Time>,
    mut players: Query<
        (
            &mut Transform,
            &PlayerConfig,
            &mut MovementIntent,
            &mut MovementState,
            &mut KinematicCharacterController,
            Option<&KinematicCharacterControllerOutput>,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (mut transform, config, mut intent, mut movement, mut controller, output) in players.iter_mut() {
        if intent.look.x != 0.0 {
            transform.rotate_y(-intent.look.x * config.look_sensitivity);
        }

        movement.is_grounded = output.map_or(true, |output| output.grounded);
        if movement.is_grounded {
            if movement.vertical_velocity < 0.0 {
                movement.vertical_velocity = 0.0;
            }
            if intent.jump {
                movement.vertical_velocity = config.jump_force;
            }
        } else {
            movement.vertical_velocity -= config.gravity * dt;
        }

        // Forward is -Z; positive y input walks forward.
        let direction = Vec3::new(intent.direction.x, 0.0, -intent.direction.y).normalize_or_zero();
        let yaw = transform.rotation.to_euler(EulerRot::YXZ).0;
        let horizontal = Quat::from_rotation_y(yaw) * direction * config.move_speed * dt;
        let vertical = Vec3::Y * movement.vertical_velocity * dt;

        if horizontal != Vec3::ZERO || vertical != Vec3::ZERO {
            controller.translation = Some(horizontal + vertical);
        }

        *intent = MovementIntent::default();
    }
}

/// Spawn the player with its combat components, controller and target detector.
pub fn spawn_player(commands: &mut Commands, position: Vec3, config: &PlayerConfig) -> Entity {
    let vitals = Vitals::new(config.max_health, config.max_stamina).with_regen_rate(config.stamina_regen_rate);

    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            Faction::Engageable,
            CombatantBundle {
                vitals,
                sections: MontageSections::default(),
                locomotion: Locomotion {
                    max_speed: config.move_speed,
                    orient_to_movement: true,
                },
                ..default()
            },
            PlayerState::default(),
            config.clone(),
            InRangeTargets::default(),
            WarpTargets::default(),
            OverlappingItem::default(),
            TargetDetector,
            MovementIntent::default(),
            MovementState::default(),
            Transform::from_translation(position),
        ))
        .insert((
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(CharacterAutostep {
                    max_height: CharacterLength::Absolute(0.4),
                    min_width: CharacterLength::Absolute(0.3),
                    include_dynamic_bodies: false,
                }),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id();

    commands.entity(player).with_children(|parent| {
        parent.spawn(sensor(
            player,
            SensorKind::TargetDetector,
            Collider::ball(config.target_detector_radius),
        ));
    });

    info!("Spawned player at {position}");
    player
}
