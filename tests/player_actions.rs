//! Player action state machine: attack, dodge, equip, pickup, hit reaction and death.

mod common;

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ColliderDisabled, KinematicCharacterController};

use common::*;
use slash_combat::combat::{
    spawn_ground_weapon, CombatTarget, DamageLabel, Dead, EquippedWeapon, Faction, Locomotion,
    Vitals, Weapon, WeaponDefinition, WeaponSocket, Wielder,
};
use slash_combat::core::{
    DamageEvent, DeathEvent, HitEvent, Montage, MontageNotify, Notify, OverlapState, PickupOverlap,
    PlayMontage, PlaySoundAt, SoundCue,
};
use slash_combat::items::ItemPhase;
use slash_combat::player::{
    ActionState, CharacterState, InRangeTargets, OverlappingItem, PlayerAction, PlayerInput,
    PlayerState, TargetDetector,
};
use slash_combat::ui::Hud;

fn setup() -> (App, Entity) {
    let mut app = create_headless_app(42);
    record_events::<PlayMontage>(&mut app);
    record_events::<PlaySoundAt>(&mut app);
    record_events::<DeathEvent>(&mut app);
    let player = spawn_test_player(&mut app, Vec3::ZERO);
    app.update();
    (app, player)
}

fn act(app: &mut App, player: Entity, action: PlayerAction) {
    app.world_mut().send_event(PlayerInput { player, action });
    app.update();
}

fn notify(app: &mut App, entity: Entity, notify: Notify) {
    app.world_mut().send_event(MontageNotify { entity, notify });
    app.update();
}

fn player_state(app: &App, player: Entity) -> PlayerState {
    *app.world().get::<PlayerState>(player).unwrap()
}

fn montages(app: &App, montage: Montage) -> Vec<String> {
    recorded::<PlayMontage>(app)
        .iter()
        .filter(|event| event.montage == montage)
        .map(|event| event.section.clone())
        .collect()
}

/// Without a weapon in hand the attack input does nothing.
#[test]
fn unarmed_player_cannot_attack() {
    let (mut app, player) = setup();

    act(&mut app, player, PlayerAction::Attack);

    assert_eq!(player_state(&app, player).action, ActionState::Unoccupied);
    assert!(montages(&app, Montage::Attack).is_empty());
}

/// An armed attack runs until its end notify; inputs meanwhile are ignored.
#[test]
fn armed_attack_runs_until_end_notify() {
    let (mut app, player) = setup();
    arm(&mut app, player, &sword(20.0));

    act(&mut app, player, PlayerAction::Attack);
    act(&mut app, player, PlayerAction::Attack);

    assert_eq!(player_state(&app, player).action, ActionState::Attacking);
    let swings = montages(&app, Montage::Attack);
    assert_eq!(swings.len(), 1);
    assert!(swings[0] == "Attack1" || swings[0] == "Attack2");

    notify(&mut app, player, Notify::AttackEnd);
    assert_eq!(player_state(&app, player).action, ActionState::Unoccupied);
}

/// Attacking drops a focused target that has already died.
#[test]
fn attack_forgets_dead_target() {
    let (mut app, player) = setup();
    arm(&mut app, player, &sword(20.0));
    let corpse = spawn_dummy(&mut app, Faction::Enemy, Vec3::new(0.0, 0.0, -2.0), 10.0);
    app.world_mut().entity_mut(corpse).insert(Dead);
    app.world_mut().get_mut::<CombatTarget>(player).unwrap().0 = Some(corpse);

    act(&mut app, player, PlayerAction::Attack);

    assert_eq!(app.world().get::<CombatTarget>(player).unwrap().0, None);
    assert_eq!(player_state(&app, player).action, ActionState::Attacking);
}

/// Dodging costs stamina and is refused when stamina does not exceed the cost.
#[test]
fn dodge_spends_stamina_and_needs_enough() {
    let (mut app, player) = setup();

    act(&mut app, player, PlayerAction::Dodge);
    assert_eq!(player_state(&app, player).action, ActionState::Dodge);
    assert_eq!(montages(&app, Montage::Dodge), vec!["Default".to_string()]);
    let stamina = app.world().get::<Vitals>(player).unwrap().stamina;
    assert!(stamina < 87.0, "stamina {stamina}");

    // Mid-dodge: a second dodge is refused.
    act(&mut app, player, PlayerAction::Dodge);
    assert_eq!(montages(&app, Montage::Dodge).len(), 1);

    notify(&mut app, player, Notify::DodgeEnd);
    assert_eq!(player_state(&app, player).action, ActionState::Unoccupied);

    app.world_mut().get_mut::<Vitals>(player).unwrap().stamina = 14.0;
    act(&mut app, player, PlayerAction::Dodge);
    assert_eq!(player_state(&app, player).action, ActionState::Unoccupied);
    assert_eq!(montages(&app, Montage::Dodge).len(), 1);
}

/// Movement input only moves an unoccupied player.
#[test]
fn movement_ignored_while_occupied() {
    let (mut app, player) = setup();

    act(&mut app, player, PlayerAction::Move(Vec2::Y));
    let step = app
        .world()
        .get::<KinematicCharacterController>(player)
        .unwrap()
        .translation
        .unwrap();
    assert!(step.z < 0.0, "forward is -Z, got {step}");

    act(&mut app, player, PlayerAction::Dodge);
    app.world_mut()
        .get_mut::<KinematicCharacterController>(player)
        .unwrap()
        .translation = None;
    act(&mut app, player, PlayerAction::Move(Vec2::Y));
    act(&mut app, player, PlayerAction::Jump);

    let controller = app.world().get::<KinematicCharacterController>(player).unwrap();
    assert!(controller.translation.is_none());
}

/// Interact with a ground weapon in reach: the old weapon goes, the new one is wielded.
#[test]
fn picking_up_replaces_equipped_weapon() {
    let (mut app, player) = setup();
    let old = arm(&mut app, player, &sword(20.0));
    let axe = spawn_ground_weapon(
        &mut app.world_mut().commands(),
        &WeaponDefinition {
            name: "Axe".into(),
            damage: 35.0,
            ..default()
        },
        Vec3::new(0.5, 0.0, 0.0),
    );
    app.world_mut().flush();
    app.update();

    app.world_mut().send_event(PickupOverlap {
        item: axe,
        actor: player,
        state: OverlapState::Began,
    });
    app.update();
    assert_eq!(app.world().get::<OverlappingItem>(player).unwrap().0, Some(axe));

    act(&mut app, player, PlayerAction::Interact);

    assert!(app.world().get::<Weapon>(old).is_none());
    assert_eq!(app.world().get::<EquippedWeapon>(player).unwrap().0, Some(axe));
    assert_eq!(app.world().get::<OverlappingItem>(player).unwrap().0, None);
    assert_eq!(player_state(&app, player).character, CharacterState::EquippedOneHanded);

    let weapon = app.world().entity(axe);
    assert_eq!(weapon.get::<ItemPhase>(), Some(&ItemPhase::Equipped));
    assert_eq!(weapon.get::<Wielder>().map(|w| w.0), Some(player));
    assert_eq!(weapon.get::<WeaponSocket>(), Some(&WeaponSocket::RightHand));
    assert!(weapon.get::<DamageLabel>().is_none());

    assert_eq!(app.world().resource::<Hud>().weapon_damage, 35);
    assert!(recorded::<PlaySoundAt>(&app)
        .iter()
        .any(|sound| sound.cue == SoundCue::Equip));
}

fn hovering_axe(app: &mut App, player: Entity) -> Entity {
    let axe = spawn_ground_weapon(
        &mut app.world_mut().commands(),
        &WeaponDefinition {
            name: "Axe".into(),
            ..default()
        },
        Vec3::new(0.5, 0.0, 0.0),
    );
    app.world_mut().flush();
    app.update();
    app.world_mut().send_event(PickupOverlap {
        item: axe,
        actor: player,
        state: OverlapState::Began,
    });
    app.update();
    axe
}

/// Grabbing a weapon mid-action leaves the player free to act; the dead grab nothing.
#[test]
fn picking_up_frees_the_player() {
    let (mut app, player) = setup();
    let axe = hovering_axe(&mut app, player);
    app.world_mut().get_mut::<PlayerState>(player).unwrap().action = ActionState::HitReaction;

    act(&mut app, player, PlayerAction::Interact);

    assert_eq!(app.world().get::<EquippedWeapon>(player).unwrap().0, Some(axe));
    assert_eq!(player_state(&app, player).action, ActionState::Unoccupied);
    assert_eq!(player_state(&app, player).character, CharacterState::EquippedOneHanded);

    let (mut app, player) = setup();
    let axe = hovering_axe(&mut app, player);
    app.world_mut().get_mut::<PlayerState>(player).unwrap().action = ActionState::Dead;

    act(&mut app, player, PlayerAction::Interact);

    assert_eq!(app.world().get::<EquippedWeapon>(player).unwrap().0, None);
    assert_eq!(player_state(&app, player).action, ActionState::Dead);
    assert_eq!(app.world().get::<ItemPhase>(axe), Some(&ItemPhase::Hovering));
}

/// Disarm then re-arm, each gated by the equip animation finishing.
#[test]
fn disarm_and_arm_cycle() {
    let (mut app, player) = setup();
    let weapon = arm(&mut app, player, &sword(20.0));

    act(&mut app, player, PlayerAction::Interact);
    let state = player_state(&app, player);
    assert_eq!(state.action, ActionState::EquippingWeapon);
    assert_eq!(state.character, CharacterState::Unequipped);

    // Busy: a second interact is ignored.
    act(&mut app, player, PlayerAction::Interact);
    assert_eq!(montages(&app, Montage::Equip), vec!["Unequip".to_string()]);

    notify(&mut app, player, Notify::AttachWeaponToBack);
    assert_eq!(app.world().get::<WeaponSocket>(weapon), Some(&WeaponSocket::Back));
    notify(&mut app, player, Notify::FinishEquipping);
    assert_eq!(player_state(&app, player).action, ActionState::Unoccupied);

    act(&mut app, player, PlayerAction::Interact);
    assert_eq!(player_state(&app, player).character, CharacterState::EquippedOneHanded);
    assert_eq!(
        montages(&app, Montage::Equip),
        vec!["Unequip".to_string(), "Equip".to_string()]
    );
    notify(&mut app, player, Notify::AttachWeaponToHand);
    assert_eq!(app.world().get::<WeaponSocket>(weapon), Some(&WeaponSocket::RightHand));
}

/// A survived hit flinches the player until the reaction ends.
#[test]
fn survived_hit_flinches() {
    let (mut app, player) = setup();
    let brute = spawn_dummy(&mut app, Faction::Enemy, Vec3::new(0.0, 0.0, 2.0), 100.0);

    app.world_mut().send_event(DamageEvent {
        target: player,
        instigator: brute,
        amount: 10.0,
    });
    app.world_mut().send_event(HitEvent {
        target: player,
        impact_point: Vec3::new(0.0, 1.0, 0.5),
        hitter: Some(brute),
    });
    app.update();

    assert_eq!(player_state(&app, player).action, ActionState::HitReaction);
    assert_eq!(montages(&app, Montage::HitReact), vec!["FromBack".to_string()]);
    assert!((app.world().resource::<Hud>().health_percent - 0.9).abs() < 1e-6);

    notify(&mut app, player, Notify::HitReactEnd);
    assert_eq!(player_state(&app, player).action, ActionState::Unoccupied);
}

/// A lethal hit is final: no more actions, collisions or targeting.
#[test]
fn lethal_hit_is_final() {
    let (mut app, player) = setup();
    arm(&mut app, player, &sword(20.0));
    let brute = spawn_dummy(&mut app, Faction::Enemy, Vec3::new(0.0, 0.0, -2.0), 100.0);
    app.world_mut().get_mut::<InRangeTargets>(player).unwrap().0.push(brute);

    app.world_mut().send_event(DamageEvent {
        target: player,
        instigator: brute,
        amount: 150.0,
    });
    app.world_mut().send_event(HitEvent {
        target: player,
        impact_point: Vec3::new(0.0, 1.0, -0.5),
        hitter: Some(brute),
    });
    app.update();

    assert_eq!(player_state(&app, player).action, ActionState::Dead);
    let entity = app.world().entity(player);
    assert!(entity.contains::<Dead>());
    assert!(entity.contains::<ColliderDisabled>());
    assert!(!entity.contains::<TargetDetector>());
    assert!(!entity.get::<Locomotion>().unwrap().orient_to_movement);
    assert!(entity.get::<InRangeTargets>().unwrap().0.is_empty());
    assert_eq!(entity.get::<Vitals>().unwrap().health, 0.0);
    assert_eq!(montages(&app, Montage::Death).len(), 1);

    act(&mut app, player, PlayerAction::Attack);
    notify(&mut app, player, Notify::AttackEnd);
    app.world_mut().send_event(DamageEvent {
        target: player,
        instigator: brute,
        amount: 10.0,
    });
    app.update();

    assert_eq!(player_state(&app, player).action, ActionState::Dead);
    assert!(montages(&app, Montage::Attack).is_empty());
    assert_eq!(recorded::<DeathEvent>(&app).len(), 1);
}
