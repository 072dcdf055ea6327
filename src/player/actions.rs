//! Player action state machine: input, animation notifies, hits and death.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;

use super::components::*;
use crate::combat::{
    equip_weapon, CombatEntity, CombatTarget, Dead, EquippedWeapon, Locomotion, MontageSections,
    Vitals, Weapon, WeaponSocket,
};
use crate::core::{
    CombatRng, DamageEvent, DeathEvent, HitEvent, Montage, MontageNotify, Notify, PlayMontage,
    PlaySoundAt,
};
use crate::items::ItemPhase;
use crate::ui::Hud;

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    Move(Vec2),
    Look(Vec2),
    Jump,
    /// Pick up, arm or disarm.
    Interact,
    Attack,
    Dodge,
}

#[derive(Event, Debug, Clone)]
pub struct PlayerInput {
    pub player: Entity,
    pub action: PlayerAction,
}

/// Translate keyboard and mouse buttons into player input.
pub fn read_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    players: Query<Entity, With<Player>>,
    mut inputs: EventWriter<PlayerInput>,
) {
    let Ok(player) = players.get_single() else {
        return;
    };
    let mut send = |action| {
        inputs.send(PlayerInput { player, action });
    };

    let mut direction = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }
    if direction != Vec2::ZERO {
        send(PlayerAction::Move(direction.normalize()));
    }

    if keyboard.just_pressed(KeyCode::Space) {
        send(PlayerAction::Jump);
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        send(PlayerAction::Interact);
    }
    if keyboard.just_pressed(KeyCode::ControlLeft) {
        send(PlayerAction::Dodge);
    }
    if mouse.just_pressed(MouseButton::Left) {
        send(PlayerAction::Attack);
    }
}

/// Forward accumulated mouse motion as look input.
pub fn read_mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    players: Query<Entity, With<Player>>,
    mut inputs: EventWriter<PlayerInput>,
) {
    let delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }
    if let Ok(player) = players.get_single() {
        inputs.send(PlayerInput {
            player,
            action: PlayerAction::Look(delta),
        });
    }
}

/// Run player input through the action state machine.
#[allow(clippy::too_many_arguments)]
pub fn handle_player_input(
    mut commands: Commands,
    mut inputs: EventReader<PlayerInput>,
    mut players: Query<
        (
            &Transform,
            &PlayerConfig,
            &MontageSections,
            &mut PlayerState,
            &mut Vitals,
            &mut MovementIntent,
            &mut CombatTarget,
            &mut EquippedWeapon,
            &mut OverlappingItem,
        ),
        With<Player>,
    >,
    fallen: Query<(), With<Dead>>,
    ground_weapons: Query<(&Weapon, &ItemPhase)>,
    mut rng: ResMut<CombatRng>,
    mut montages: EventWriter<PlayMontage>,
    mut sounds: EventWriter<PlaySoundAt>,
    mut hud: Option<ResMut<Hud>>,
) {
    for input in inputs.read() {
        let player = input.player;
        let Ok((
            transform,
            config,
            sections,
            mut state,
            mut vitals,
            mut intent,
            mut target,
            mut equipped,
            mut overlapping,
        )) = players.get_mut(player)
        else {
            continue;
        };
        if state.is_dead() {
            continue;
        }

        match input.action {
            PlayerAction::Move(direction) => {
                if state.is_unoccupied() {
                    intent.direction = direction;
                }
            }
            PlayerAction::Look(delta) => intent.look += delta,
            PlayerAction::Jump => {
                if state.is_unoccupied() {
                    intent.jump = true;
                }
            }
            PlayerAction::Attack => {
                if target.is_some_and(|current| fallen.contains(current)) {
                    target.0 = None;
                }
                if !state.can_attack() {
                    continue;
                }
                if let Some(index) = rng.pick(sections.attacks.len()) {
                    montages.send(PlayMontage {
                        entity: player,
                        montage: Montage::Attack,
                        section: sections.attacks[index].clone(),
                    });
                }
                state.action = ActionState::Attacking;
                debug!("{player} attacking");
            }
            PlayerAction::Dodge => {
                if !state.is_unoccupied() || vitals.stamina <= config.dodge_cost {
                    continue;
                }
                vitals.use_stamina(config.dodge_cost);
                if let Some(hud) = hud.as_mut() {
                    hud.set_stamina_percent(vitals.stamina_percent());
                }
                montages.send(PlayMontage {
                    entity: player,
                    montage: Montage::Dodge,
                    section: "Default".to_string(),
                });
                state.action = ActionState::Dodge;
            }
            PlayerAction::Interact => {
                let pickup = overlapping.0.and_then(|item| match ground_weapons.get(item) {
                    Ok((weapon, ItemPhase::Hovering)) => Some((item, weapon.damage)),
                    _ => None,
                });

                if let Some((item, damage)) = pickup {
                    if let Some(old) = equipped.0.take() {
                        if let Some(old_weapon) = commands.get_entity(old) {
                            old_weapon.despawn_recursive();
                        }
                    }
                    equip_weapon(
                        &mut commands,
                        item,
                        player,
                        WeaponSocket::RightHand,
                        transform.translation,
                        &mut sounds,
                    );
                    equipped.0 = Some(item);
                    state.character = CharacterState::EquippedOneHanded;
                    state.action = ActionState::Unoccupied;
                    overlapping.0 = None;
                    if let Some(hud) = hud.as_mut() {
                        hud.set_weapon_damage(damage);
                    }
                    info!("{player} picked up {item}");
                } else if state.can_disarm() {
                    montages.send(PlayMontage {
                        entity: player,
                        montage: Montage::Equip,
                        section: "Unequip".to_string(),
                    });
                    state.character = CharacterState::Unequipped;
                    state.action = ActionState::EquippingWeapon;
                } else if state.can_arm(equipped.is_some()) {
                    montages.send(PlayMontage {
                        entity: player,
                        montage: Montage::Equip,
                        section: "Equip".to_string(),
                    });
                    state.character = CharacterState::EquippedOneHanded;
                    state.action = ActionState::EquippingWeapon;
                }
            }
        }
    }
}

/// Finish actions and move the weapon between hand and back on animation notifies.
pub fn handle_player_notifies(
    mut notifies: EventReader<MontageNotify>,
    mut players: Query<(&mut PlayerState, &EquippedWeapon), With<Player>>,
    mut sockets: Query<&mut WeaponSocket>,
) {
    for event in notifies.read() {
        let Ok((mut state, equipped)) = players.get_mut(event.entity) else {
            continue;
        };

        let socket = match event.notify {
            Notify::AttackEnd | Notify::DodgeEnd | Notify::HitReactEnd | Notify::FinishEquipping => {
                state.finish_action();
                continue;
            }
            Notify::AttachWeaponToBack => WeaponSocket::Back,
            Notify::AttachWeaponToHand => WeaponSocket::RightHand,
            _ => continue,
        };

        if let Some(mut current) = equipped.0.and_then(|weapon| sockets.get_mut(weapon).ok()) {
            *current = socket;
        }
    }
}

/// Mirror player health on the HUD after damage.
pub fn update_health_hud(
    mut damage_events: EventReader<DamageEvent>,
    players: Query<&Vitals, With<Player>>,
    hud: Option<ResMut<Hud>>,
) {
    let Some(mut hud) = hud else {
        damage_events.clear();
        return;
    };
    for event in damage_events.read() {
        if let Ok(vitals) = players.get(event.target) {
            hud.set_health_percent(vitals.health_percent());
        }
    }
}

/// Flinch when a hit is survived.
pub fn react_to_player_hits(
    mut hit_events: EventReader<HitEvent>,
    mut players: Query<(&Vitals, &mut PlayerState), (With<Player>, Without<Dead>)>,
) {
    for hit in hit_events.read() {
        let Ok((vitals, mut state)) = players.get_mut(hit.target) else {
            continue;
        };
        if vitals.health_percent() > 0.0 {
            state.action = ActionState::HitReaction;
        }
    }
}

/// Enter the terminal state when the player dies.
pub fn handle_player_death(
    mut commands: Commands,
    mut deaths: EventReader<DeathEvent>,
    mut players: Query<
        (
            &mut PlayerState,
            &mut Locomotion,
            &mut InRangeTargets,
            &mut CombatTarget,
            &mut WarpTargets,
        ),
        With<Player>,
    >,
) {
    for death in deaths.read() {
        let Ok((mut state, mut locomotion, mut in_range, mut target, mut warp)) =
            players.get_mut(death.entity)
        else {
            continue;
        };

        state.action = ActionState::Dead;
        locomotion.orient_to_movement = false;
        in_range.0.clear();
        target.0 = None;
        warp.clear();

        commands
            .entity(death.entity)
            .insert(ColliderDisabled)
            .remove::<TargetDetector>();
        info!("Player {} is dead", death.entity);
    }
}

/// Regenerate stamina for living players.
pub fn regenerate_stamina(
    time: Res<Time>,
    mut players: Query<(&PlayerState, &mut Vitals), (With<Player>, Without<Dead>)>,
    mut hud: Option<ResMut<Hud>>,
) {
    let dt = time.delta_secs();
    for (state, mut vitals) in players.iter_mut() {
        if state.is_dead() {
            continue;
        }
        vitals.regen_stamina(dt);
        if let Some(hud) = hud.as_mut() {
            hud.set_stamina_percent(vitals.stamina_percent());
        }
    }
}
