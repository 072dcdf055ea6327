//! Melee weapons: definition data, components, and equipping.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use serde::Deserialize;

use crate::core::{read_definition_dir, DataLoadError, Definition, PlaySoundAt, SoundCue, DATA_ROOT};
use crate::items::{Hover, ItemPhase};
use crate::physics::{sensor, SensorKind};

const PICKUP_RADIUS: f32 = 0.6;
const DAMAGE_LABEL_RADIUS: f32 = 5.0;

/// Weapon definition loaded from RON.
#[derive(Deserialize, Clone, Debug)]
pub struct WeaponDefinition {
    pub name: String,
    #[serde(default = "default_damage")]
    pub damage: f32,
    /// Half extents of the swept trace box
    #[serde(default = "default_trace_extent")]
    pub trace_extent: (f32, f32, f32),
    /// Blade base, relative to the weapon origin
    #[serde(default = "default_blade_start")]
    pub blade_start: (f32, f32, f32),
    /// Blade tip, relative to the weapon origin
    #[serde(default = "default_blade_end")]
    pub blade_end: (f32, f32, f32),
}

fn default_damage() -> f32 {
    20.0
}

fn default_trace_extent() -> (f32, f32, f32) {
    (0.05, 0.05, 0.05)
}

fn default_blade_start() -> (f32, f32, f32) {
    (0.0, 0.1, 0.0)
}

fn default_blade_end() -> (f32, f32, f32) {
    (0.0, 1.0, 0.0)
}

impl Default for WeaponDefinition {
    fn default() -> Self {
        Self {
            name: "Sword".to_string(),
            damage: default_damage(),
            trace_extent: default_trace_extent(),
            blade_start: default_blade_start(),
            blade_end: default_blade_end(),
        }
    }
}

impl Definition for WeaponDefinition {
    fn validate(&self) -> Result<(), DataLoadError> {
        if self.damage < 0.0 {
            return Err(DataLoadError::invalid(&self.name, "damage must not be negative"));
        }
        let (x, y, z) = self.trace_extent;
        if x < 0.0 || y < 0.0 || z < 0.0 {
            return Err(DataLoadError::invalid(&self.name, "trace extent must not be negative"));
        }
        Ok(())
    }
}

impl WeaponDefinition {
    pub fn to_weapon(&self) -> Weapon {
        Weapon {
            name: self.name.clone(),
            damage: self.damage,
            trace_extent: Vec3::from(self.trace_extent),
            blade_start: Vec3::from(self.blade_start),
            blade_end: Vec3::from(self.blade_end),
        }
    }
}

/// Resource holding all loaded weapon definitions, keyed by file stem.
#[derive(Resource, Default)]
pub struct WeaponRegistry {
    pub definitions: HashMap<String, WeaponDefinition>,
}

impl WeaponRegistry {
    pub fn get(&self, key: &str) -> Option<&WeaponDefinition> {
        self.definitions.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, definition: WeaponDefinition) {
        self.definitions.insert(key.into(), definition);
    }

    /// Resolve a list of keys, skipping (and logging) unknown ones.
    pub fn resolve(&self, keys: &[String]) -> Vec<WeaponDefinition> {
        keys.iter()
            .filter_map(|key| {
                let found = self.get(key).cloned();
                if found.is_none() {
                    warn!("Unknown weapon definition: {}", key);
                }
                found
            })
            .collect()
    }
}

/// Load all weapon definitions from `assets/data/weapons/`.
pub fn load_weapon_definitions(mut registry: ResMut<WeaponRegistry>) {
    for (key, definition) in read_definition_dir::<WeaponDefinition>(&Path::new(DATA_ROOT).join("weapons")) {
        info!("Loaded weapon definition: {} ({})", definition.name, key);
        registry.insert(key, definition);
    }
}

/// Melee weapon stats.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub name: String,
    pub damage: f32,
    pub trace_extent: Vec3,
    pub blade_start: Vec3,
    pub blade_end: Vec3,
}

/// Damage-collision switch of a weapon plus the actors already struck this swing.
#[derive(Component, Debug, Default)]
pub struct WeaponCollision {
    enabled: bool,
    ignore: HashSet<Entity>,
}

impl WeaponCollision {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch damage collision. The per-swing ignore set is always emptied.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.ignore.clear();
    }

    pub fn ignores(&self, entity: Entity) -> bool {
        self.ignore.contains(&entity)
    }

    pub fn ignore(&mut self, entity: Entity) {
        self.ignore.insert(entity);
    }

    pub fn ignored_count(&self) -> usize {
        self.ignore.len()
    }
}

/// The combatant holding this weapon; damage is credited to it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Wielder(pub Entity);

/// Where on the wielder the weapon is attached.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponSocket {
    RightHand,
    Back,
    /// Default attachment for enemy weapons
    EnemyHand,
}

/// Floating damage readout shown over a ground weapon.
#[derive(Component, Debug, Clone)]
pub struct DamageLabel {
    pub visible: bool,
    pub value: i32,
}

fn spawn_weapon(commands: &mut Commands, definition: &WeaponDefinition, location: Vec3) -> Entity {
    let weapon = definition.to_weapon();
    let blade = weapon.blade_end - weapon.blade_start;
    let damage_box = Collider::cuboid(
        weapon.trace_extent.x.max(0.05),
        blade.length() * 0.5,
        weapon.trace_extent.z.max(0.05),
    );
    let blade_center = Transform::from_translation((weapon.blade_start + weapon.blade_end) * 0.5)
        .with_rotation(Quat::from_rotation_arc(Vec3::Y, blade.try_normalize().unwrap_or(Vec3::Y)));

    let entity = commands
        .spawn((
            Name::new(definition.name.clone()),
            weapon,
            WeaponCollision::default(),
            Transform::from_translation(location),
        ))
        .id();

    commands.entity(entity).with_children(|parent| {
        parent.spawn(sensor(entity, SensorKind::WeaponBox, damage_box)).insert(blade_center);
    });
    entity
}

/// Spawn a weapon lying on the ground, ready to be picked up.
pub fn spawn_ground_weapon(commands: &mut Commands, definition: &WeaponDefinition, location: Vec3) -> Entity {
    let weapon = spawn_weapon(commands, definition, location);
    let label = DamageLabel {
        visible: false,
        value: definition.damage as i32,
    };

    commands
        .entity(weapon)
        .insert((ItemPhase::Hovering, Hover::at(location), label))
        .with_children(|parent| {
            parent.spawn(sensor(weapon, SensorKind::Pickup, Collider::ball(PICKUP_RADIUS)));
            parent.spawn(sensor(weapon, SensorKind::DamageLabel, Collider::ball(DAMAGE_LABEL_RADIUS)));
        });
    weapon
}

/// Spawn a weapon straight into `wielder`'s hands.
pub fn spawn_equipped_weapon(
    commands: &mut Commands,
    definition: &WeaponDefinition,
    wielder: Entity,
    socket: WeaponSocket,
) -> Entity {
    let weapon = spawn_weapon(commands, definition, Vec3::ZERO);
    commands
        .entity(weapon)
        .insert((ItemPhase::Equipped, Wielder(wielder), socket))
        .set_parent(wielder);
    weapon
}

/// Move a weapon into the `Equipped` phase on `wielder`.
///
/// Attaches it to `socket`, strips the ground-only parts (pickup volume,
/// damage readout, hover) and plays the equip sound at the wielder.
pub fn equip_weapon(
    commands: &mut Commands,
    weapon: Entity,
    wielder: Entity,
    socket: WeaponSocket,
    wielder_location: Vec3,
    sounds: &mut EventWriter<PlaySoundAt>,
) {
    let Some(mut entity) = commands.get_entity(weapon) else {
        return;
    };

    entity
        .insert((ItemPhase::Equipped, Wielder(wielder), socket, Transform::IDENTITY))
        .remove::<(DamageLabel, Hover)>()
        .set_parent(wielder);

    sounds.send(PlaySoundAt {
        cue: SoundCue::Equip,
        location: wielder_location,
    });
}
