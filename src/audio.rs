//! Plays the core's sound cues through Kira.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioPlugin, AudioSource};

use crate::core::{PlaySoundAt, SimulationSet, SoundCue};

/// Loaded clip for every sound cue.
#[derive(Resource)]
pub struct SoundLibrary {
    hit: Handle<AudioSource>,
    equip: Handle<AudioSource>,
    pickup: Handle<AudioSource>,
}

impl SoundLibrary {
    pub fn clip(&self, cue: SoundCue) -> Handle<AudioSource> {
        match cue {
            SoundCue::Hit => self.hit.clone(),
            SoundCue::Equip => self.equip.clone(),
            SoundCue::Pickup => self.pickup.clone(),
        }
    }
}

fn load_sound_library(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundLibrary {
        hit: asset_server.load("sounds/hit.ogg"),
        equip: asset_server.load("sounds/equip.wav"),
        pickup: asset_server.load("sounds/pickup.wav"),
    });
}

/// Play requested cues. Kira's main track is not positional, so the
/// location is only logged.
fn play_sound_cues(
    mut requests: EventReader<PlaySoundAt>,
    library: Option<Res<SoundLibrary>>,
    audio: Res<Audio>,
) {
    let Some(library) = library else {
        requests.clear();
        return;
    };

    for request in requests.read() {
        debug!("Playing {:?} at {}", request.cue, request.location);
        audio.play(library.clip(request.cue));
    }
}

/// Audio collaborator for the combat core.
pub struct CombatAudioPlugin;

impl Plugin for CombatAudioPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<AudioPlugin>() {
            app.add_plugins(AudioPlugin);
        }

        app.add_systems(Startup, load_sound_library)
            .add_systems(Update, play_sound_cues.after(SimulationSet::Cleanup));
    }
}
