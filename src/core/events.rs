//! Global events used for cross-system communication.
//!
//! Two kinds live here. Inbound events are raised by the engine side
//! (physics overlaps, animation notifies, input) and consumed by the
//! combat core. Outbound events are requests the core makes of its
//! collaborators (play a montage section, a sound, an effect, a move-to).
//! Keeping both as plain events lets every system be driven headless.

use bevy::prelude::*;

/// Montages a combatant can play sections from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Montage {
    Attack,
    HitReact,
    Death,
    Dodge,
    Equip,
}

/// Named points in a montage timeline forwarded by the animation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notify {
    AttackEnd,
    DodgeEnd,
    HitReactEnd,
    FinishEquipping,
    AttachWeaponToBack,
    AttachWeaponToHand,
    EnableWeaponCollision,
    DisableWeaponCollision,
}

/// Whether an overlap just started or just stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapState {
    Began,
    Ended,
}

/// Sound cues the core asks the audio layer to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Hit,
    Equip,
    Pickup,
}

/// Visual effects the core asks the effects layer to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCue {
    HitParticles,
    /// Impulse field at a weapon impact, used by breakables.
    ImpactField,
    PickupBurst,
}

// ---------------------------------------------------------------------------
// Combat flow
// ---------------------------------------------------------------------------

/// Sent when an entity takes damage.
///
/// Health is reduced by the damage system; variant systems (player HUD,
/// enemy retargeting) listen for the same event.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity credited with the damage
    pub instigator: Entity,
    pub amount: f32,
}

/// Sent after damage when a weapon connects, carrying where it connected.
#[derive(Event, Debug, Clone)]
pub struct HitEvent {
    pub target: Entity,
    /// World-space point where the sweep met the target
    pub impact_point: Vec3,
    /// Wielder of the weapon, if it still exists
    pub hitter: Option<Entity>,
}

/// Sent once when an entity dies.
///
/// Systems can listen for this to play out death, spawn loot, clear
/// targeting, etc.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that dealt the killing damage (if known)
    pub killed_by: Option<Entity>,
}

// ---------------------------------------------------------------------------
// Inbound: engine -> core
// ---------------------------------------------------------------------------

/// An animation notify reached on one of the entity's montages.
#[derive(Event, Debug, Clone)]
pub struct MontageNotify {
    pub entity: Entity,
    pub notify: Notify,
}

/// The damage box of a weapon started overlapping something.
#[derive(Event, Debug, Clone)]
pub struct WeaponOverlap {
    pub weapon: Entity,
    pub other: Entity,
}

/// Something entered or left a ground weapon's damage-readout volume.
#[derive(Event, Debug, Clone)]
pub struct DamageLabelOverlap {
    pub weapon: Entity,
    pub other: Entity,
    pub state: OverlapState,
}

/// Something entered or left the player's target detection volume.
#[derive(Event, Debug, Clone)]
pub struct TargetRangeOverlap {
    pub player: Entity,
    pub other: Entity,
    pub state: OverlapState,
}

/// An actor entered or left an item's pickup volume.
#[derive(Event, Debug, Clone)]
pub struct PickupOverlap {
    pub item: Entity,
    pub actor: Entity,
    pub state: OverlapState,
}

/// An enemy's senses registered a pawn.
#[derive(Event, Debug, Clone)]
pub struct PawnSeen {
    pub observer: Entity,
    pub pawn: Entity,
}

// ---------------------------------------------------------------------------
// Outbound: core -> collaborators
// ---------------------------------------------------------------------------

/// Request to jump to and play a named section of a montage.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayMontage {
    pub entity: Entity,
    pub montage: Montage,
    pub section: String,
}

/// Request to stop a playing montage, blending out over `blend_out` seconds.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct StopMontage {
    pub entity: Entity,
    pub montage: Montage,
    pub blend_out: f32,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlaySoundAt {
    pub cue: SoundCue,
    pub location: Vec3,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct SpawnEffectAt {
    pub effect: EffectCue,
    pub location: Vec3,
}

/// Ask the navigation layer to walk `entity` toward `goal`.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct MoveToTarget {
    pub entity: Entity,
    pub goal: Entity,
    /// Distance at which the move counts as arrived
    pub acceptance_radius: f32,
}
