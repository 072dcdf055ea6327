//! Player-related components.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::CombatEntity;
use crate::core::{DataLoadError, Definition};

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// What the player is busy doing. Only `Unoccupied` may start a new action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Unoccupied,
    HitReaction,
    Attacking,
    Dodge,
    EquippingWeapon,
    Dead,
}

/// Whether a weapon is in hand. Independent of [`ActionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterState {
    #[default]
    Unequipped,
    EquippedOneHanded,
}

/// The player's two state axes.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerState {
    pub action: ActionState,
    pub character: CharacterState,
}

impl PlayerState {
    pub fn is_unoccupied(&self) -> bool {
        self.action == ActionState::Unoccupied
    }

    pub fn is_dead(&self) -> bool {
        self.action == ActionState::Dead
    }

    /// Return to `Unoccupied` at the end of an action. Death is final.
    pub fn finish_action(&mut self) {
        if !self.is_dead() {
            self.action = ActionState::Unoccupied;
        }
    }

    pub fn can_disarm(&self) -> bool {
        self.is_unoccupied() && self.character != CharacterState::Unequipped
    }

    pub fn can_arm(&self, has_weapon: bool) -> bool {
        self.is_unoccupied() && self.character == CharacterState::Unequipped && has_weapon
    }
}

impl CombatEntity for PlayerState {
    fn can_attack(&self) -> bool {
        self.is_unoccupied() && self.character != CharacterState::Unequipped
    }
}

/// Per-player tuning, loaded from `assets/data/player.ron`.
#[derive(Component, Deserialize, Debug, Clone)]
pub struct PlayerConfig {
    #[serde(default = "default_max_health")]
    pub max_health: f32,
    #[serde(default = "default_max_stamina")]
    pub max_stamina: f32,
    #[serde(default = "default_stamina_regen")]
    pub stamina_regen_rate: f32,
    #[serde(default = "default_dodge_cost")]
    pub dodge_cost: f32,
    /// Radius of the volume that collects nearby enemies as targets
    #[serde(default = "default_detector_radius")]
    pub target_detector_radius: f32,
    /// How far in front of a target the attack warp lands
    #[serde(default = "default_warp_distance")]
    pub warp_target_distance: f32,
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "default_jump_force")]
    pub jump_force: f32,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Radians of yaw per unit of look input
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,
}

fn default_max_health() -> f32 {
    100.0
}
fn default_max_stamina() -> f32 {
    100.0
}
fn default_stamina_regen() -> f32 {
    8.0
}
fn default_dodge_cost() -> f32 {
    14.0
}
fn default_detector_radius() -> f32 {
    8.0
}
fn default_warp_distance() -> f32 {
    0.75
}
fn default_move_speed() -> f32 {
    5.0
}
fn default_jump_force() -> f32 {
    6.0
}
fn default_gravity() -> f32 {
    15.0
}
fn default_look_sensitivity() -> f32 {
    0.0015
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: default_max_health(),
            max_stamina: default_max_stamina(),
            stamina_regen_rate: default_stamina_regen(),
            dodge_cost: default_dodge_cost(),
            target_detector_radius: default_detector_radius(),
            warp_target_distance: default_warp_distance(),
            move_speed: default_move_speed(),
            jump_force: default_jump_force(),
            gravity: default_gravity(),
            look_sensitivity: default_look_sensitivity(),
        }
    }
}

impl Definition for PlayerConfig {
    fn validate(&self) -> Result<(), DataLoadError> {
        if self.max_health <= 0.0 {
            return Err(DataLoadError::invalid("player", "max_health must be positive"));
        }
        if self.max_stamina < 0.0 || self.dodge_cost < 0.0 {
            return Err(DataLoadError::invalid("player", "stamina values must not be negative"));
        }
        Ok(())
    }
}

/// Enemies currently inside the player's detection volume, in arrival order.
#[derive(Component, Debug, Default, Clone)]
pub struct InRangeTargets(pub Vec<Entity>);

impl InRangeTargets {
    /// Add `entity` unless it is already tracked.
    pub fn add_unique(&mut self, entity: Entity) {
        if !self.0.contains(&entity) {
            self.0.push(entity);
        }
    }

    pub fn remove(&mut self, entity: Entity) {
        self.0.retain(|tracked| *tracked != entity);
    }
}

/// Where attack motion warping should carry and face the player.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct WarpTargets {
    pub translation: Option<Vec3>,
    pub rotation: Option<Vec3>,
}

impl WarpTargets {
    pub fn clear(&mut self) {
        self.translation = None;
        self.rotation = None;
    }
}

/// Ground item the player is standing in, if any.
#[derive(Component, Debug, Default, Clone, Copy, Deref, DerefMut)]
pub struct OverlappingItem(pub Option<Entity>);

/// Marker for a player whose target detection volume is active.
#[derive(Component, Debug)]
pub struct TargetDetector;

/// Locomotion requests accumulated from input, consumed by movement.
#[derive(Component, Debug, Default)]
pub struct MovementIntent {
    pub direction: Vec2,
    pub look: Vec2,
    pub jump: bool,
}

/// Tracks vertical motion for the character controller.
#[derive(Component, Debug)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
        }
    }
}
