//! In-game HUD state - the values the overlay widgets display.
//!
//! The core only writes numbers here; drawing them is the job of whatever
//! UI layer the game plugs in. Systems take `Option<ResMut<Hud>>` so a
//! headless app without a HUD simply skips the updates.

use bevy::prelude::*;

use crate::combat::Vitals;
use crate::player::Player;

/// Player overlay values.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Hud {
    pub health_percent: f32,
    pub stamina_percent: f32,
    pub gold: u32,
    pub souls: u32,
    pub weapon_damage: i32,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            health_percent: 1.0,
            stamina_percent: 1.0,
            gold: 0,
            souls: 0,
            weapon_damage: 0,
        }
    }
}

impl Hud {
    pub fn set_health_percent(&mut self, percent: f32) {
        self.health_percent = percent.clamp(0.0, 1.0);
    }

    pub fn set_stamina_percent(&mut self, percent: f32) {
        self.stamina_percent = percent.clamp(0.0, 1.0);
    }

    pub fn set_gold(&mut self, gold: u32) {
        self.gold = gold;
    }

    pub fn set_souls(&mut self, souls: u32) {
        self.souls = souls;
    }

    pub fn set_weapon_damage(&mut self, damage: f32) {
        self.weapon_damage = damage as i32;
    }
}

/// Floating health bar over an enemy.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct HealthBar {
    pub visible: bool,
    pub percent: f32,
}

impl Default for HealthBar {
    fn default() -> Self {
        Self {
            visible: false,
            percent: 1.0,
        }
    }
}

/// Reset the overlay when a player enters the world.
pub fn init_player_hud(players: Query<&Vitals, Added<Player>>, hud: Option<ResMut<Hud>>) {
    let Some(mut hud) = hud else {
        return;
    };

    for vitals in players.iter() {
        hud.set_health_percent(vitals.health_percent());
        hud.set_stamina_percent(1.0);
        hud.set_gold(0);
        hud.set_souls(0);
        hud.set_weapon_damage(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_are_clamped() {
        let mut hud = Hud::default();
        hud.set_health_percent(1.5);
        assert_eq!(hud.health_percent, 1.0);
        hud.set_stamina_percent(-0.2);
        assert_eq!(hud.stamina_percent, 0.0);
    }

    #[test]
    fn weapon_damage_is_shown_as_integer() {
        let mut hud = Hud::default();
        hud.set_weapon_damage(27.9);
        assert_eq!(hud.weapon_damage, 27);
    }
}
