//! Background music playlist.
//!
//! Every track is spawned once as a looping audio entity; only the current
//! one is unpaused. Switching pauses the current sink and resumes the next,
//! so a track picks up where it left off when cycled back to.

use bevy::audio::{AudioSinkPlayback, PlaybackSettings, Volume};
use bevy::prelude::*;

use crate::gallery::GalleryLayout;
use crate::settings::Settings;

/// Index into the playlist. Wraps in both directions.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackCycler {
    current: usize,
    len: usize,
}

impl TrackCycler {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    #[must_use]
    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.current)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Advance and return the new index. `None` for an empty playlist.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.current = (self.current + 1) % self.len;
        Some(self.current)
    }

    /// Step back and return the new index. `None` for an empty playlist.
    pub fn previous(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.current = (self.current + self.len - 1) % self.len;
        Some(self.current)
    }
}

/// Position of an audio entity in the playlist.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicTrack(pub usize);

/// Volume for music: the layout override if present, else the settings.
#[must_use]
pub fn music_volume(layout: &GalleryLayout, settings: &Settings) -> f32 {
    layout.music_volume.unwrap_or_else(|| settings.audio.music_level())
}

/// Spawn all playlist entries, paused except the first.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_music(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    layout: Res<GalleryLayout>,
    settings: Res<Settings>,
) {
    let volume = Volume::new(music_volume(&layout, &settings));
    for (index, path) in layout.music.iter().enumerate() {
        let mut playback = PlaybackSettings::LOOP.with_volume(volume);
        if index != 0 {
            playback = playback.paused();
        }
        commands.spawn((
            AudioBundle { source: asset_server.load(path.clone()), settings: playback },
            MusicTrack(index),
            Name::new(format!("music {path}")),
        ));
    }
    commands.insert_resource(TrackCycler::new(layout.music.len()));
}

/// Switch tracks on the next/previous keys.
#[allow(clippy::needless_pass_by_value)]
pub fn cycle_music(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut cycler: ResMut<TrackCycler>,
    sinks: Query<(&MusicTrack, &AudioSink)>,
) {
    let forward = keyboard.just_pressed(settings.key_for("next_track", KeyCode::KeyN));
    let backward = keyboard.just_pressed(settings.key_for("previous_track", KeyCode::KeyP));
    if forward == backward {
        return;
    }

    let Some(old) = cycler.current() else { return };
    let new = if forward { cycler.next() } else { cycler.previous() };
    let Some(new) = new else { return };

    if switch_track(&sinks, old, new) {
        info!("now playing track {}", new + 1);
    } else {
        warn!("track {} is not ready to play yet", new + 1);
    }
}

/// Pause track `old` and resume track `new`. Returns `false` when `new` has
/// no sink yet.
pub fn switch_track<'a, S: AudioSinkPlayback + 'a>(
    sinks: impl IntoIterator<Item = (&'a MusicTrack, &'a S)>,
    old: usize,
    new: usize,
) -> bool {
    let mut started = false;
    for (track, sink) in sinks {
        if track.0 == old {
            sink.pause();
        }
        if track.0 == new {
            sink.play();
            started = true;
        }
    }
    started
}

/// Set every music sink to `volume`.
pub fn apply_music_volume<'a, S: AudioSinkPlayback + 'a>(sinks: impl IntoIterator<Item = &'a S>, volume: f32) {
    for sink in sinks {
        sink.set_volume(volume);
    }
}

/// Re-apply the music volume after a settings reload, and to sinks that
/// only just finished loading.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_music_volume(
    settings: Res<Settings>,
    layout: Res<GalleryLayout>,
    sinks: Query<&AudioSink, With<MusicTrack>>,
    fresh: Query<(), (With<MusicTrack>, Added<AudioSink>)>,
) {
    if !settings.is_changed() && fresh.is_empty() {
        return;
    }
    apply_music_volume(&sinks, music_volume(&layout, &settings));
}
