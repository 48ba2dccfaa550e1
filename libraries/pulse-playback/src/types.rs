//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable unit
///
/// `source` is an opaque reference the media device knows how to load
/// (typically a static file path such as `/Blue - Yung Kai.wav`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Addressable audio resource
    pub source: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            source: source.into(),
        }
    }
}

/// Player state
///
/// `Loading` only lives between an issued play/pause command and the
/// device's acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// Not playing (initial state)
    Paused,

    /// Waiting for the device to acknowledge play/pause
    Loading,

    /// Device confirmed playback
    Playing,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Advance normally, stop after the last track
    Off,

    /// Loop the whole playlist
    All,

    /// Loop the current track
    One,
}

impl RepeatMode {
    /// Next mode for the repeat button
    ///
    /// Three-state: `Off → One → All → Off`. Two-state: `Off ↔ All`.
    pub fn cycle(self, style: RepeatStyle) -> Self {
        match style {
            RepeatStyle::ThreeState => match self {
                RepeatMode::Off => RepeatMode::One,
                RepeatMode::One => RepeatMode::All,
                RepeatMode::All => RepeatMode::Off,
            },
            RepeatStyle::Toggle => match self {
                RepeatMode::Off => RepeatMode::All,
                RepeatMode::All | RepeatMode::One => RepeatMode::Off,
            },
        }
    }
}

/// How the repeat button cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatStyle {
    /// Off / All / One
    ThreeState,

    /// Off / On (On behaves as `All`)
    Toggle,
}

/// Configuration for the playback controller
///
/// The presets cover the player variants: a single fixed track, a plain
/// playlist, and the full player with three-state repeat and smoothed
/// play/pause transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Initial volume (0-100, default: 70)
    pub volume: u8,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Whether the shuffle toggle is offered (default: true)
    pub shuffle_available: bool,

    /// Whether the repeat button is offered (default: true)
    pub repeat_available: bool,

    /// Repeat button behaviour (default: three-state)
    pub repeat_style: RepeatStyle,

    /// Delay before a play/pause acknowledgment settles the state
    /// (default: none, settle immediately)
    pub settle_delay_ms: Option<u64>,

    /// Seed for shuffle selection (default: entropy)
    pub shuffle_seed: Option<u64>,
}

impl ControllerConfig {
    /// One fixed track with an on/off repeat toggle
    pub fn single_track() -> Self {
        Self {
            shuffle_available: false,
            repeat_style: RepeatStyle::Toggle,
            ..Self::default()
        }
    }

    /// Multi-track playlist with shuffle and on/off repeat
    pub fn playlist() -> Self {
        Self {
            repeat_style: RepeatStyle::Toggle,
            ..Self::default()
        }
    }

    /// Full player: three-state repeat, shuffle, smoothed transitions
    pub fn full() -> Self {
        Self {
            settle_delay_ms: Some(500),
            ..Self::default()
        }
    }

    /// Simulated-progress demo: no shuffle/repeat, smoothed transitions
    pub fn simulated() -> Self {
        Self {
            shuffle_available: false,
            repeat_available: false,
            settle_delay_ms: Some(500),
            ..Self::default()
        }
    }

    /// Settle delay as a `Duration`
    pub fn settle_delay(&self) -> Option<Duration> {
        self.settle_delay_ms.map(Duration::from_millis)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            volume: 70,
            shuffle: false,
            repeat: RepeatMode::Off,
            shuffle_available: true,
            repeat_available: true,
            repeat_style: RepeatStyle::ThreeState,
            settle_delay_ms: None,
            shuffle_seed: None,
        }
    }
}
