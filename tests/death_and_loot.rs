//! Death sequencing and loot: idempotent death, drops, corpse removal, pickups.

mod common;

use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;

use common::*;
use slash_combat::combat::{Dead, Vitals, Weapon, WeaponCollision};
use slash_combat::core::{
    DamageEvent, DeathEvent, HitEvent, MontageNotify, Notify, OverlapState, PickupOverlap,
    PlaySoundAt, SoundCue, WeaponOverlap,
};
use slash_combat::enemies::{AttackTimer, EnemyState, Lifespan, PatrolRoute, PatrolTimer};
use slash_combat::items::{spawn_health_pickup, spawn_soul, spawn_treasure, ItemPhase, Pickup};
use slash_combat::ui::{HealthBar, Hud};

/// Loot on the ground with its ground-plane position; height bobs while hovering.
fn pickups(app: &mut App) -> Vec<(Pickup, Vec2)> {
    let mut query = app.world_mut().query::<(&Pickup, &Transform)>();
    query
        .iter(app.world())
        .map(|(pickup, transform)| (*pickup, transform.translation.xz()))
        .collect()
}

fn hovering_weapons(app: &mut App) -> usize {
    let mut query = app.world_mut().query::<(&Weapon, &ItemPhase)>();
    query
        .iter(app.world())
        .filter(|(_, phase)| **phase == ItemPhase::Hovering)
        .count()
}

fn kill(app: &mut App, enemy: Entity, instigator: Entity) {
    app.world_mut().send_event(DamageEvent {
        target: enemy,
        instigator,
        amount: 1000.0,
    });
    app.update();
}

/// A lethal sword blow kills once; repeated hits, damage and death calls change nothing.
#[test]
fn enemy_dies_once_and_drops_one_soul() {
    let mut app = create_headless_app(42);
    record_events::<DeathEvent>(&mut app);

    let player = spawn_test_player(&mut app, Vec3::ZERO);
    let sword = arm(&mut app, player, &sword(20.0));
    let enemy = spawn_test_enemy(
        &mut app,
        &enemy_definition(r#"(name: "Weakling", max_health: 20.0, souls: 7)"#),
        Vec3::new(0.0, 0.0, -1.0),
        PatrolRoute::default(),
    );
    script_contact(&mut app, enemy, Vec3::new(0.0, 1.0, -1.0));
    app.update();

    app.world_mut().send_event(MontageNotify {
        entity: player,
        notify: Notify::EnableWeaponCollision,
    });
    app.world_mut().send_event(WeaponOverlap {
        weapon: sword,
        other: enemy,
    });
    app.update();

    let deaths = recorded::<DeathEvent>(&app);
    assert_eq!(deaths.len(), 1);
    assert_eq!(deaths[0].killed_by, Some(player));

    let corpse = app.world().entity(enemy);
    assert!(corpse.contains::<Dead>());
    assert!(corpse.contains::<ColliderDisabled>());
    assert!(corpse.contains::<Lifespan>());
    assert_eq!(corpse.get::<EnemyState>(), Some(&EnemyState::Dead));
    assert!(!corpse.get::<HealthBar>().unwrap().visible);
    assert!(!corpse.get::<AttackTimer>().unwrap().is_armed());
    assert!(!corpse.get::<PatrolTimer>().unwrap().is_armed());

    let souls = pickups(&mut app);
    assert_eq!(souls.len(), 1);
    assert_eq!(souls[0].0, Pickup::Soul(7));
    assert_eq!(souls[0].1, Vec2::new(0.0, -1.0));

    // Everything after death is a no-op.
    app.world_mut().send_event(HitEvent {
        target: enemy,
        impact_point: Vec3::ZERO,
        hitter: Some(player),
    });
    kill(&mut app, enemy, player);
    assert_eq!(recorded::<DeathEvent>(&app).len(), 1);
    assert_eq!(app.world().get::<Vitals>(enemy).unwrap().health, 0.0);

    // A repeated death notice does not drop loot again.
    app.world_mut().send_event(DeathEvent {
        entity: enemy,
        killed_by: Some(player),
    });
    app.update();
    assert_eq!(pickups(&mut app).len(), 1);
    assert_eq!(app.world().get::<EnemyState>(enemy), Some(&EnemyState::Dead));
}

/// Health only drops when the enemy has a health budget.
#[test]
fn health_drop_needs_a_budget() {
    let mut app = create_headless_app(5);
    let player = spawn_test_player(&mut app, Vec3::new(0.0, 0.0, 20.0));
    let broke = spawn_test_enemy(
        &mut app,
        &enemy_definition(
            r#"(name: "Broke", max_health: 10.0, loot: (spawnable_health: 0.0, health_drop_chance: 1.0))"#,
        ),
        Vec3::ZERO,
        PatrolRoute::default(),
    );
    let generous = spawn_test_enemy(
        &mut app,
        &enemy_definition(
            r#"(name: "Generous", max_health: 10.0, loot: (spawnable_health: 25.0, health_drop_chance: 1.0))"#,
        ),
        Vec3::new(10.0, 0.0, 0.0),
        PatrolRoute::default(),
    );
    app.update();

    kill(&mut app, broke, player);
    assert!(!pickups(&mut app)
        .iter()
        .any(|(pickup, _)| matches!(pickup, Pickup::Health(_))));

    kill(&mut app, generous, player);
    let health: Vec<_> = pickups(&mut app)
        .into_iter()
        .filter(|(pickup, _)| matches!(pickup, Pickup::Health(_)))
        .collect();
    assert_eq!(health, vec![(Pickup::Health(25.0), Vec2::new(9.0, 0.8))]);
}

/// A guaranteed weapon drop lands as a hovering, collectable weapon.
#[test]
fn weapon_drop_comes_from_the_drop_list() {
    let mut app = create_headless_app(9);
    let player = spawn_test_player(&mut app, Vec3::new(0.0, 0.0, 20.0));
    let enemy = spawn_test_enemy(
        &mut app,
        &enemy_definition(
            r#"(name: "Armory", max_health: 10.0, loot: (weapon_drops: ["sword", "missing"], weapon_drop_chance: 1.0))"#,
        ),
        Vec3::ZERO,
        PatrolRoute::default(),
    );
    app.update();
    assert_eq!(hovering_weapons(&mut app), 0);

    kill(&mut app, enemy, player);
    assert_eq!(hovering_weapons(&mut app), 1);
}

/// Dead enemies lose their weapon's bite and disappear, weapon included.
#[test]
fn corpse_despawns_with_its_weapon() {
    let mut app = create_headless_app(11);
    let player = spawn_test_player(&mut app, Vec3::new(0.0, 0.0, 20.0));
    let enemy = spawn_test_enemy(
        &mut app,
        &enemy_definition(
            r#"(name: "Brute", max_health: 10.0, default_weapon: Some("sword"), ai: (death_lifespan: 0.5))"#,
        ),
        Vec3::ZERO,
        PatrolRoute::default(),
    );
    app.update();

    let weapon = app
        .world()
        .get::<slash_combat::combat::EquippedWeapon>(enemy)
        .and_then(|equipped| equipped.0)
        .expect("default weapon equipped at spawn");
    app.world_mut().send_event(MontageNotify {
        entity: enemy,
        notify: Notify::EnableWeaponCollision,
    });
    app.update();
    assert!(app.world().get::<WeaponCollision>(weapon).unwrap().is_enabled());

    kill(&mut app, enemy, player);
    assert!(!app.world().get::<WeaponCollision>(weapon).unwrap().is_enabled());

    for _ in 0..8 {
        app.update();
    }
    assert!(app.world().get::<EnemyState>(enemy).is_none());
    assert!(app.world().get::<Weapon>(weapon).is_none());
}

/// Each loot pickup pays out once and disappears.
#[test]
fn loot_pays_out_once() {
    let mut app = create_headless_app(13);
    record_events::<PlaySoundAt>(&mut app);
    let player = spawn_test_player(&mut app, Vec3::ZERO);
    let (soul, treasure, potion) = {
        let mut commands = app.world_mut().commands();
        (
            spawn_soul(&mut commands, Vec3::X, 10),
            spawn_treasure(&mut commands, Vec3::Z, 25),
            spawn_health_pickup(&mut commands, Vec3::NEG_X, 30.0),
        )
    };
    app.world_mut().flush();
    app.update();
    app.world_mut().get_mut::<Vitals>(player).unwrap().health = 50.0;

    for item in [soul, soul, treasure, potion] {
        app.world_mut().send_event(PickupOverlap {
            item,
            actor: player,
            state: OverlapState::Began,
        });
    }
    app.update();

    let vitals = app.world().get::<Vitals>(player).unwrap().clone();
    assert_eq!(vitals.souls, 10);
    assert_eq!(vitals.gold, 25);
    assert_eq!(vitals.health, 80.0);
    assert!(pickups(&mut app).is_empty());

    let hud = app.world().resource::<Hud>();
    assert_eq!((hud.souls, hud.gold), (10, 25));
    let chimes = recorded::<PlaySoundAt>(&app)
        .iter()
        .filter(|sound| sound.cue == SoundCue::Pickup)
        .count();
    assert_eq!(chimes, 3);

    app.world_mut().send_event(PickupOverlap {
        item: soul,
        actor: player,
        state: OverlapState::Began,
    });
    app.update();
    assert_eq!(app.world().get::<Vitals>(player).unwrap().souls, 10);
}

/// Only players collect loot.
#[test]
fn enemies_ignore_loot() {
    let mut app = create_headless_app(17);
    let enemy = spawn_test_enemy(
        &mut app,
        &enemy_definition(r#"(name: "Grunt", max_health: 10.0)"#),
        Vec3::ZERO,
        PatrolRoute::default(),
    );
    let soul = spawn_soul(&mut app.world_mut().commands(), Vec3::X, 10);
    app.world_mut().flush();
    app.update();

    app.world_mut().send_event(PickupOverlap {
        item: soul,
        actor: enemy,
        state: OverlapState::Began,
    });
    app.update();

    assert_eq!(pickups(&mut app).len(), 1);
    assert_eq!(app.world().get::<Vitals>(enemy).unwrap().souls, 0);
}
