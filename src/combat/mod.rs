//! Combat module - vitals, weapons, hit detection, damage and death.

mod components;
pub mod direction;
mod hit_detector;
mod plugin;
mod systems;
pub mod trace;
mod weapon;

pub use components::*;
pub use direction::{classify_hit, HitDirection};
pub use plugin::CombatPlugin;
pub use systems::CombatSet;
pub use trace::{SweepSource, TraceHit};
pub use weapon::{
    equip_weapon, load_weapon_definitions, spawn_equipped_weapon, spawn_ground_weapon,
    DamageLabel, Weapon, WeaponCollision, WeaponDefinition, WeaponRegistry, WeaponSocket, Wielder,
};
