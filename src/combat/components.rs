//! Combat-related components.

use bevy::prelude::*;

/// Health, stamina and currencies of a combatant.
///
/// Health and stamina are kept inside `[0, max]` by every mutator.
#[derive(Component, Debug, Clone)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    /// Stamina regained per second
    pub stamina_regen_rate: f32,
    pub gold: u32,
    pub souls: u32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new(100.0, 100.0)
    }
}

impl Vitals {
    pub fn new(max_health: f32, max_stamina: f32) -> Self {
        let max_health = max_health.max(0.0);
        let max_stamina = max_stamina.max(0.0);
        Self {
            health: max_health,
            max_health,
            stamina: max_stamina,
            max_stamina,
            stamina_regen_rate: 8.0,
            gold: 0,
            souls: 0,
        }
    }

    pub fn with_regen_rate(mut self, rate: f32) -> Self {
        self.stamina_regen_rate = rate.max(0.0);
        self
    }

    pub fn with_souls(mut self, souls: u32) -> Self {
        self.souls = souls;
        self
    }

    /// Subtract damage, floored at zero. Returns the amount actually removed.
    pub fn receive_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.health);
        self.health -= actual;
        actual
    }

    /// Add health up to the maximum. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.max_health - self.health);
        self.health += actual;
        actual
    }

    pub fn use_stamina(&mut self, cost: f32) {
        self.stamina = (self.stamina - cost).clamp(0.0, self.max_stamina);
    }

    pub fn regen_stamina(&mut self, delta: f32) {
        self.stamina = (self.stamina + self.stamina_regen_rate * delta).clamp(0.0, self.max_stamina);
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn add_souls(&mut self, amount: u32) {
        self.souls = self.souls.saturating_add(amount);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn health_percent(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn stamina_percent(&self) -> f32 {
        if self.max_stamina > 0.0 {
            self.stamina / self.max_stamina
        } else {
            0.0
        }
    }
}

/// Which side an actor fights on. Weapons never hurt their wielder's side.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    /// Things enemies may engage: the player and its allies.
    Engageable,
    Enemy,
}

/// Marker for entities that have died. Damage against them is ignored.
#[derive(Component, Debug)]
pub struct Dead;

/// The entity this combatant is currently focused on.
///
/// A weak reference: cleared on death, range exit, or when the entity is gone.
#[derive(Component, Debug, Default, Clone, Copy, Deref, DerefMut)]
pub struct CombatTarget(pub Option<Entity>);

/// Weapon entity held by a combatant. The combatant owns it exclusively.
#[derive(Component, Debug, Default, Clone, Copy, Deref, DerefMut)]
pub struct EquippedWeapon(pub Option<Entity>);

/// Resting pose after the death montage, picked with the death section.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathPose {
    Death1,
    Death2,
    Death3,
    Death4,
    Death5,
    Death6,
}

impl DeathPose {
    const ALL: [DeathPose; 6] = [
        DeathPose::Death1,
        DeathPose::Death2,
        DeathPose::Death3,
        DeathPose::Death4,
        DeathPose::Death5,
        DeathPose::Death6,
    ];

    /// Pose matching the index of the chosen death section, if one exists.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Montage sections a combatant picks from at random.
#[derive(Component, Debug, Clone)]
pub struct MontageSections {
    pub attacks: Vec<String>,
    pub deaths: Vec<String>,
}

impl Default for MontageSections {
    fn default() -> Self {
        Self {
            attacks: vec!["Attack1".to_string(), "Attack2".to_string()],
            deaths: (1..=6).map(|i| format!("Death{i}")).collect(),
        }
    }
}

/// Movement parameters the locomotion layer reads.
#[derive(Component, Debug, Clone)]
pub struct Locomotion {
    pub max_speed: f32,
    /// Rotate the body to face the direction of travel
    pub orient_to_movement: bool,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            max_speed: 3.0,
            orient_to_movement: true,
        }
    }
}

/// Components every fighter carries.
#[derive(Bundle, Default)]
pub struct CombatantBundle {
    pub vitals: Vitals,
    pub target: CombatTarget,
    pub weapon: EquippedWeapon,
    pub sections: MontageSections,
    pub locomotion: Locomotion,
}

/// Capability shared by every kind of combatant.
///
/// The base answer to "may this entity start an attack?" is no; the
/// player and enemy state components override it with their own rules.
pub trait CombatEntity {
    fn can_attack(&self) -> bool {
        false
    }
}
