//! Combat systems - damage, hit reactions and death.

use std::collections::{HashMap, HashSet};

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::*;
use super::direction::classify_hit;
use super::weapon::WeaponCollision;
use crate::core::{
    CombatRng, DamageEvent, DeathEvent, EffectCue, HitEvent, Montage, PlayMontage, PlaySoundAt,
    SoundCue, SpawnEffectAt,
};

/// Ordering of the damage chain inside `SimulationSet::Damage`.
///
/// Variant plugins hook their reactions into the `*Reactions` stages so
/// they observe health after damage and `Dead` after death.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Damage,
    DamageReactions,
    Hits,
    HitReactions,
    Deaths,
    DeathReactions,
}

/// Everything needed to put a combatant down.
#[derive(SystemParam)]
pub struct Mortality<'w, 's> {
    commands: Commands<'w, 's>,
    rng: ResMut<'w, CombatRng>,
    montages: EventWriter<'w, PlayMontage>,
    deaths: EventWriter<'w, DeathEvent>,
}

impl Mortality<'_, '_> {
    /// Mark `entity` dead, play a random death section and announce it.
    fn kill(&mut self, entity: Entity, sections: &MontageSections, killed_by: Option<Entity>) {
        let mut entity_commands = self.commands.entity(entity);
        entity_commands.insert(Dead);

        match self.rng.pick(sections.deaths.len()) {
            Some(index) => {
                self.montages.send(PlayMontage {
                    entity,
                    montage: Montage::Death,
                    section: sections.deaths[index].clone(),
                });
                if let Some(pose) = DeathPose::from_index(index) {
                    entity_commands.insert(pose);
                }
            }
            None => warn!("{entity} died without any death sections"),
        }

        info!("{entity} died (killed by {killed_by:?})");
        self.deaths.send(DeathEvent { entity, killed_by });
    }

    fn play(&mut self, entity: Entity, montage: Montage, section: &str) {
        self.montages.send(PlayMontage {
            entity,
            montage,
            section: section.to_string(),
        });
    }
}

/// Apply damage to living entities.
pub fn apply_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut targets: Query<&mut Vitals, Without<Dead>>,
) {
    for event in damage_events.read() {
        let Ok(mut vitals) = targets.get_mut(event.target) else {
            continue;
        };

        let dealt = vitals.receive_damage(event.amount);
        debug!(
            "{} took {dealt} from {} ({} left)",
            event.target, event.instigator, vitals.health
        );
    }
}

/// React to weapon hits: directional flinch or death, plus impact feedback.
pub fn receive_hits(
    mut hit_events: EventReader<HitEvent>,
    victims: Query<(&Transform, &Vitals, &MontageSections, Option<&EquippedWeapon>, Has<Dead>)>,
    locations: Query<&Transform>,
    mut weapons: Query<&mut WeaponCollision>,
    mut mortality: Mortality,
    mut sounds: EventWriter<PlaySoundAt>,
    mut effects: EventWriter<SpawnEffectAt>,
) {
    let mut dying = HashSet::new();

    for hit in hit_events.read() {
        let Ok((transform, vitals, sections, equipped, dead)) = victims.get(hit.target) else {
            continue;
        };

        let hitter_location = hit
            .hitter
            .and_then(|hitter| locations.get(hitter).ok())
            .map(|hitter| hitter.translation);

        match hitter_location {
            Some(from) if vitals.is_alive() => {
                let direction = classify_hit(transform.translation, *transform.forward(), from);
                mortality.play(hit.target, Montage::HitReact, direction.section());
            }
            _ => {
                if !dead && dying.insert(hit.target) {
                    mortality.kill(hit.target, sections, hit.hitter);
                }
            }
        }

        sounds.send(PlaySoundAt {
            cue: SoundCue::Hit,
            location: hit.impact_point,
        });
        effects.send(SpawnEffectAt {
            effect: EffectCue::HitParticles,
            location: hit.impact_point,
        });

        // A flinching fighter's own swing stops dealing damage.
        if let Some(weapon) = equipped.and_then(|equipped| equipped.0) {
            if let Ok(mut collision) = weapons.get_mut(weapon) {
                collision.set_enabled(false);
            }
        }
    }
}

/// Kill anything whose health ran out without a hit to resolve it.
pub fn resolve_deaths(
    mut damage_events: EventReader<DamageEvent>,
    fallen: Query<(Entity, &Vitals, &MontageSections), Without<Dead>>,
    mut mortality: Mortality,
) {
    let killers: HashMap<Entity, Entity> = damage_events
        .read()
        .map(|event| (event.target, event.instigator))
        .collect();

    for (entity, vitals, sections) in &fallen {
        if !vitals.is_alive() {
            mortality.kill(entity, sections, killers.get(&entity).copied());
        }
    }
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    use crate::core::SimulationSet;

    app.configure_sets(
        Update,
        (
            CombatSet::Damage,
            CombatSet::DamageReactions,
            CombatSet::Hits,
            CombatSet::HitReactions,
            CombatSet::Deaths,
            CombatSet::DeathReactions,
        )
            .chain()
            .in_set(SimulationSet::Damage),
    )
    .add_systems(Update, apply_damage.in_set(CombatSet::Damage))
    .add_systems(Update, receive_hits.in_set(CombatSet::Hits))
    .add_systems(Update, resolve_deaths.in_set(CombatSet::Deaths));
}
