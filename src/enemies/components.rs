//! Enemy-related components.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::{CombatEntity, WeaponDefinition};
use crate::core::{CombatRng, OneShot};

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Marker for a point enemies patrol between.
#[derive(Component)]
pub struct PatrolPoint;

/// AI state machine for enemy behavior.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum EnemyState {
    /// Between attacks; re-evaluates combat on the next tick.
    NoState,
    /// Walking between patrol points, unaware of any target.
    #[default]
    Patrolling,
    /// Moving toward the combat target.
    Chasing,
    /// Waiting on the attack timer.
    Attacking,
    /// Swinging; only the attack-end notify leaves this state.
    Engaged,
    Dead,
}

impl EnemyState {
    /// Every state except `Patrolling` runs combat evaluation each tick.
    pub fn is_aware(self) -> bool {
        self != EnemyState::Patrolling
    }

    /// States ranked below `Attacking`.
    pub fn below_attacking(self) -> bool {
        matches!(
            self,
            EnemyState::NoState | EnemyState::Patrolling | EnemyState::Chasing
        )
    }
}

/// Snapshot of what an enemy needs to decide whether to start an attack.
#[derive(Debug, Clone, Copy)]
pub struct EnemyStance {
    pub state: EnemyState,
    pub target_in_attack_radius: bool,
}

impl CombatEntity for EnemyStance {
    fn can_attack(&self) -> bool {
        self.target_in_attack_radius
            && !matches!(
                self.state,
                EnemyState::Attacking | EnemyState::Engaged | EnemyState::Dead
            )
    }
}

/// Per-enemy AI tuning. Distances in metres, times in seconds.
#[derive(Component, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct EnemyConfig {
    /// Beyond this the enemy loses interest in its target
    pub combat_radius: f32,
    pub attack_radius: f32,
    /// Move-to requests count as arrived within this distance
    pub acceptance_radius: f32,
    /// Distance at which a patrol point counts as reached
    pub patrol_radius: f32,
    pub patrol_wait_min: f32,
    pub patrol_wait_max: f32,
    pub patrolling_speed: f32,
    pub chasing_speed: f32,
    pub attack_min: f32,
    pub attack_max: f32,
    /// Seconds a corpse lingers before removal
    pub death_lifespan: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            combat_radius: 10.0,
            attack_radius: 1.5,
            acceptance_radius: 0.5,
            patrol_radius: 2.0,
            patrol_wait_min: 5.0,
            patrol_wait_max: 10.0,
            patrolling_speed: 1.25,
            chasing_speed: 3.0,
            attack_min: 0.5,
            attack_max: 1.0,
            death_lifespan: 8.0,
        }
    }
}

/// Patrol points an enemy cycles through, and the one it is heading to.
#[derive(Component, Debug, Default, Clone)]
pub struct PatrolRoute {
    pub points: Vec<Entity>,
    pub current: Option<Entity>,
}

impl PatrolRoute {
    pub fn new(points: Vec<Entity>) -> Self {
        let current = points.first().copied();
        Self { points, current }
    }

    /// Pick a point other than the current one, uniformly at random.
    pub fn choose_next(&self, rng: &mut CombatRng) -> Option<Entity> {
        let candidates: Vec<Entity> = self
            .points
            .iter()
            .copied()
            .filter(|point| Some(*point) != self.current)
            .collect();
        rng.pick(candidates.len()).map(|index| candidates[index])
    }
}

/// Wait before walking to the next patrol point.
#[derive(Component, Debug, Default, Deref, DerefMut)]
pub struct PatrolTimer(pub OneShot);

/// Delay before the next attack swing.
#[derive(Component, Debug, Default, Deref, DerefMut)]
pub struct AttackTimer(pub OneShot);

/// Countdown to removing a dead enemy.
#[derive(Component, Debug)]
pub struct Lifespan(pub Timer);

/// What an enemy leaves behind when it dies.
#[derive(Component, Debug, Default, Clone)]
pub struct Loot {
    /// Health restored by the dropped health pickup; zero disables the drop
    pub spawnable_health: f32,
    pub health_drop_chance: f32,
    pub weapon_drops: Vec<WeaponDefinition>,
    pub weapon_drop_chance: f32,
}

/// Sight cone used to notice engageable pawns.
#[derive(Component, Debug)]
pub struct PawnSensing {
    pub sight_radius: f32,
    /// Half-angle of the cone, in degrees
    pub peripheral_angle: f32,
    pub interval: Timer,
}

impl Default for PawnSensing {
    fn default() -> Self {
        Self {
            sight_radius: 40.0,
            peripheral_angle: 45.0,
            interval: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}
