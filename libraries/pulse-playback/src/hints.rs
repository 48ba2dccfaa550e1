//! Control hint labels
//!
//! Tooltip text for each player control, derived from the session.

use crate::session::PlaybackSession;
use crate::types::{PlayerState, RepeatMode};
use serde::Serialize;

/// Labels for every control on the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlHints {
    pub skip_back: &'static str,
    pub play_pause: &'static str,
    pub skip_forward: &'static str,
    pub shuffle: &'static str,
    pub repeat: &'static str,
    pub mute: &'static str,
}

impl ControlHints {
    pub fn from_session(session: &PlaybackSession) -> Self {
        let repeat = session.repeat_mode();

        let skip_back = if repeat == RepeatMode::One {
            "Restart current track"
        } else if session.is_first_track() {
            "This is the first track"
        } else {
            "Skip to previous track"
        };

        let play_pause = match session.state() {
            PlayerState::Loading => "Loading...",
            PlayerState::Playing => "Pause",
            PlayerState::Paused => "Play",
        };

        let skip_forward = if repeat == RepeatMode::One {
            "Restart current track"
        } else if repeat == RepeatMode::Off && session.is_last_track() {
            "This is the last track"
        } else {
            "Skip to next track"
        };

        let shuffle = if session.is_shuffle() {
            "Shuffle mode is on"
        } else {
            "Shuffle mode is off"
        };

        let repeat = match repeat {
            RepeatMode::Off => "Repeat mode is off",
            RepeatMode::All => "Repeat all tracks",
            RepeatMode::One => "Repeat current track",
        };

        let mute = if session.is_muted() || session.volume_percent() == 0 {
            "Unmute"
        } else {
            "Mute"
        };

        Self {
            skip_back,
            play_pause,
            skip_forward,
            shuffle,
            repeat,
            mute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ControllerConfig, Track};

    fn session(len: usize) -> PlaybackSession {
        let tracks = (0..len)
            .map(|i| Track::new(format!("Track {i}"), "Artist", format!("/{i}.wav")))
            .collect();
        PlaybackSession::new(&ControllerConfig::default(), tracks)
    }

    #[test]
    fn first_track_defaults() {
        let hints = ControlHints::from_session(&session(3));

        assert_eq!(hints.skip_back, "This is the first track");
        assert_eq!(hints.play_pause, "Play");
        assert_eq!(hints.skip_forward, "Skip to next track");
        assert_eq!(hints.shuffle, "Shuffle mode is off");
        assert_eq!(hints.repeat, "Repeat mode is off");
        assert_eq!(hints.mute, "Mute");
    }

    #[test]
    fn last_track_without_repeat() {
        let mut s = session(3);
        s.current_index = 2;
        let hints = ControlHints::from_session(&s);

        assert_eq!(hints.skip_back, "Skip to previous track");
        assert_eq!(hints.skip_forward, "This is the last track");

        s.repeat_mode = RepeatMode::All;
        let hints = ControlHints::from_session(&s);
        assert_eq!(hints.skip_forward, "Skip to next track");
        assert_eq!(hints.repeat, "Repeat all tracks");
    }

    #[test]
    fn repeat_one_restarts_both_ways() {
        let mut s = session(3);
        s.current_index = 1;
        s.repeat_mode = RepeatMode::One;
        let hints = ControlHints::from_session(&s);

        assert_eq!(hints.skip_back, "Restart current track");
        assert_eq!(hints.skip_forward, "Restart current track");
        assert_eq!(hints.repeat, "Repeat current track");
    }

    #[test]
    fn state_and_mute_labels() {
        let mut s = session(1);
        s.state = PlayerState::Loading;
        s.volume.toggle_mute();
        let hints = ControlHints::from_session(&s);

        assert_eq!(hints.play_pause, "Loading...");
        assert_eq!(hints.mute, "Unmute");

        s.state = PlayerState::Playing;
        assert_eq!(ControlHints::from_session(&s).play_pause, "Pause");
    }
}
