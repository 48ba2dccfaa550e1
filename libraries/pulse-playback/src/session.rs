//! Playback session state
//!
//! The single entity the controller owns and mutates.

use crate::time::progress_fraction;
use crate::types::{ControllerConfig, PlayerState, RepeatMode, Track};
use crate::volume::Volume;
use serde::Serialize;

/// Snapshot of everything the player shows
///
/// Only `PlaybackController` mutates a session; everyone else gets `&`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSession {
    pub(crate) state: PlayerState,
    pub(crate) playlist: Vec<Track>,
    pub(crate) current_index: usize,
    pub(crate) position_secs: f64,
    pub(crate) duration_secs: f64,
    pub(crate) volume: Volume,
    pub(crate) is_shuffle: bool,
    pub(crate) repeat_mode: RepeatMode,
}

impl PlaybackSession {
    /// Fresh session: paused at the first track
    pub fn new(config: &ControllerConfig, playlist: Vec<Track>) -> Self {
        Self {
            state: PlayerState::Paused,
            playlist,
            current_index: 0,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: Volume::new(config.volume),
            is_shuffle: config.shuffle && config.shuffle_available,
            repeat_mode: if config.repeat_available {
                config.repeat
            } else {
                RepeatMode::Off
            },
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Current track, `None` for an empty playlist
    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.current_index)
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    /// Duration of the current track, 0 until metadata arrives
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Whether the current track's metadata has arrived
    pub fn has_duration(&self) -> bool {
        self.duration_secs > 0.0
    }

    /// Position as a fraction of duration (0 while unknown)
    pub fn progress(&self) -> f64 {
        progress_fraction(self.position_secs, self.duration_secs)
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn volume_percent(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn is_shuffle(&self) -> bool {
        self.is_shuffle
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub fn is_first_track(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last_track(&self) -> bool {
        self.current_index + 1 >= self.playlist.len()
    }
}
