//! Enemy data loading from RON files.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::components::EnemyConfig;
use crate::core::{read_definition_dir, DataLoadError, Definition, DATA_ROOT};

/// Collider configuration for an enemy type.
#[derive(Deserialize, Clone, Debug)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.5,
            radius: 0.3,
        }
    }
}

/// Drop table of an enemy type. Weapons are referenced by registry key.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct LootDefinition {
    pub spawnable_health: f32,
    pub health_drop_chance: f32,
    pub weapon_drops: Vec<String>,
    pub weapon_drop_chance: f32,
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    #[serde(default)]
    pub souls: u32,
    /// Weapon registry key equipped at spawn
    #[serde(default)]
    pub default_weapon: Option<String>,
    #[serde(default)]
    pub ai: EnemyConfig,
    #[serde(default)]
    pub loot: LootDefinition,
    #[serde(default)]
    pub attack_sections: Option<Vec<String>>,
    #[serde(default)]
    pub death_sections: Option<Vec<String>>,
    #[serde(default)]
    pub collider: ColliderConfig,
}

fn check_probability(name: &str, label: &str, value: f32) -> Result<(), DataLoadError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DataLoadError::invalid(name, format!("{label} must be within [0, 1]")))
    }
}

impl Definition for EnemyDefinition {
    fn validate(&self) -> Result<(), DataLoadError> {
        let ai = &self.ai;
        if self.max_health <= 0.0 {
            return Err(DataLoadError::invalid(&self.name, "max_health must be positive"));
        }
        if ai.attack_radius > ai.combat_radius {
            return Err(DataLoadError::invalid(&self.name, "attack_radius exceeds combat_radius"));
        }
        if ai.patrol_wait_min > ai.patrol_wait_max {
            return Err(DataLoadError::invalid(&self.name, "patrol_wait_min exceeds patrol_wait_max"));
        }
        if ai.attack_min > ai.attack_max {
            return Err(DataLoadError::invalid(&self.name, "attack_min exceeds attack_max"));
        }
        check_probability(&self.name, "health_drop_chance", self.loot.health_drop_chance)?;
        check_probability(&self.name, "weapon_drop_chance", self.loot.weapon_drop_chance)
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(DATA_ROOT).join("enemies");

    for (enemy_type, definition) in read_definition_dir::<EnemyDefinition>(&enemies_dir) {
        info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
        registry.definitions.insert(enemy_type, definition);
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
