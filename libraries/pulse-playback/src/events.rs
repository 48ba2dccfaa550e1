//! Playback Events
//!
//! Event-based communication for UI synchronization.
//! The controller queues an event whenever observable session state
//! changes; the presentation layer drains them (e.g. once per frame).

use crate::types::{PlayerState, RepeatMode};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Player state changed (paused, loading, playing)
    StateChanged {
        /// The new state
        state: PlayerState,
    },

    /// Current track changed
    TrackChanged {
        /// Index of the new track
        index: usize,
        /// Index of the previous track
        previous_index: usize,
    },

    /// Position moved (device report or optimistic seek)
    PositionUpdate {
        position_secs: f64,
        duration_secs: f64,
    },

    /// Duration of the current track became known (or was reset)
    DurationChanged { duration_secs: f64 },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Shuffle flag flipped
    ShuffleChanged { enabled: bool },

    /// Repeat mode cycled
    RepeatChanged { mode: RepeatMode },

    /// Track played to its end
    TrackFinished {
        /// Index of the finished track
        index: usize,
    },
}

impl PlaybackEvent {
    /// Progress fraction carried by a position update
    pub fn progress(&self) -> Option<f64> {
        match self {
            PlaybackEvent::PositionUpdate {
                position_secs,
                duration_secs,
            } => Some(crate::time::progress_fraction(*position_secs, *duration_secs)),
            _ => None,
        }
    }
}
