//! Nearest-target selection from the player's detection volume.

mod common;

use bevy::prelude::*;

use common::*;
use slash_combat::combat::{CombatTarget, Dead, Faction};
use slash_combat::core::{DamageEvent, OverlapState, TargetRangeOverlap};
use slash_combat::player::{InRangeTargets, WarpTargets};

fn range(app: &mut App, player: Entity, other: Entity, state: OverlapState) {
    app.world_mut().send_event(TargetRangeOverlap {
        player,
        other,
        state,
    });
}

fn target(app: &App, player: Entity) -> Option<Entity> {
    app.world().get::<CombatTarget>(player).unwrap().0
}

/// Player at the origin with enemies at distances 5, 2 and 8, all in range.
fn surrounded() -> (App, Entity, [Entity; 3]) {
    let mut app = create_headless_app(42);
    let player = spawn_test_player(&mut app, Vec3::ZERO);
    let enemies = [
        spawn_dummy(&mut app, Faction::Enemy, Vec3::new(5.0, 0.0, 0.0), 50.0),
        spawn_dummy(&mut app, Faction::Enemy, Vec3::new(0.0, 0.0, -2.0), 50.0),
        spawn_dummy(&mut app, Faction::Enemy, Vec3::new(-8.0, 0.0, 0.0), 50.0),
    ];
    app.update();

    for enemy in enemies {
        range(&mut app, player, enemy, OverlapState::Began);
    }
    app.update();
    (app, player, enemies)
}

/// The closest candidate becomes the target and the warp aims just short of it.
#[test]
fn nearest_candidate_is_targeted() {
    let (app, player, [_, near, _]) = surrounded();

    assert_eq!(target(&app, player), Some(near));
    let warp = app.world().get::<WarpTargets>(player).unwrap();
    assert_eq!(warp.rotation, Some(Vec3::new(0.0, 0.0, -2.0)));
    let landing = warp.translation.unwrap();
    assert!(landing.abs_diff_eq(Vec3::new(0.0, 0.0, -1.25), 1e-5), "{landing}");
}

/// Losing the target reselects on the same tick; losing everyone clears it all.
#[test]
fn leaving_range_reselects_then_clears() {
    let (mut app, player, [mid, near, far]) = surrounded();

    range(&mut app, player, near, OverlapState::Ended);
    app.update();
    assert_eq!(target(&app, player), Some(mid));

    range(&mut app, player, mid, OverlapState::Ended);
    range(&mut app, player, far, OverlapState::Ended);
    app.update();

    assert_eq!(target(&app, player), None);
    assert_eq!(*app.world().get::<WarpTargets>(player).unwrap(), WarpTargets::default());
    assert!(app.world().get::<InRangeTargets>(player).unwrap().0.is_empty());
}

/// A target that dies is dropped in favor of the next nearest.
#[test]
fn dead_target_is_forgotten() {
    let (mut app, player, [mid, near, _]) = surrounded();

    app.world_mut().send_event(DamageEvent {
        target: near,
        instigator: player,
        amount: 100.0,
    });
    app.update();

    assert!(app.world().entity(near).contains::<Dead>());
    assert!(!app.world().get::<InRangeTargets>(player).unwrap().0.contains(&near));
    assert_eq!(target(&app, player), Some(mid));
}

/// A despawned candidate is pruned from the set.
#[test]
fn despawned_candidate_is_pruned() {
    let (mut app, player, [mid, near, _]) = surrounded();

    app.world_mut().despawn(near);
    app.update();

    assert_eq!(target(&app, player), Some(mid));
    assert_eq!(app.world().get::<InRangeTargets>(player).unwrap().0.len(), 2);
}

/// Only living enemies enter the candidate set; ties keep the first arrival.
#[test]
fn only_living_enemies_are_candidates() {
    let mut app = create_headless_app(3);
    let player = spawn_test_player(&mut app, Vec3::ZERO);
    let friend = spawn_dummy(&mut app, Faction::Engageable, Vec3::new(0.0, 0.0, -1.0), 50.0);
    let corpse = spawn_dummy(&mut app, Faction::Enemy, Vec3::new(0.0, 0.0, 1.0), 50.0);
    app.world_mut().entity_mut(corpse).insert(Dead);
    let first = spawn_dummy(&mut app, Faction::Enemy, Vec3::new(3.0, 0.0, 0.0), 50.0);
    let second = spawn_dummy(&mut app, Faction::Enemy, Vec3::new(-3.0, 0.0, 0.0), 50.0);
    app.update();

    for other in [friend, corpse, first, second] {
        range(&mut app, player, other, OverlapState::Began);
    }
    app.update();

    assert_eq!(app.world().get::<InRangeTargets>(player).unwrap().0, vec![first, second]);
    assert_eq!(target(&app, player), Some(first));
}
