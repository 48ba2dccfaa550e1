//! Script runner
//!
//! Owns a controller attached to a `SimulatedDevice` and applies
//! [`Command`]s to it, producing a JSON report after each step.

use crate::commands::Command;
use crate::config::CliConfig;
use pulse_playback::{
    format_time, Clock, ControlHints, ManualClock, PlaybackController, PlaybackEvent,
    PlaybackSession, PlayerState, SimulatedDevice, SystemClock,
};
use serde::Serialize;
use std::time::Duration;

/// What a step reports back
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report<'a> {
    Session {
        command: String,
        session: &'a PlaybackSession,
        events: Vec<PlaybackEvent>,
    },
    Hints {
        hints: ControlHints,
    },
}

pub struct Runner {
    controller: PlaybackController<SimulatedDevice>,
    step_secs: f64,
    // Blocks until the controller's clock has moved on by the given delay
    wait: Box<dyn FnMut(Duration)>,
}

impl Runner {
    /// Runner on the wall clock; settle delays are slept through
    pub fn new(config: &CliConfig) -> Self {
        Self::build(config, SystemClock, Box::new(std::thread::sleep))
    }

    /// Runner on a manual clock; settle delays advance the clock instead
    pub fn with_clock(config: &CliConfig, clock: ManualClock) -> Self {
        let handle = clock.clone();
        Self::build(config, clock, Box::new(move |delay| handle.advance(delay)))
    }

    fn build(
        config: &CliConfig,
        clock: impl Clock + 'static,
        wait: Box<dyn FnMut(Duration)>,
    ) -> Self {
        let mut device =
            SimulatedDevice::new().with_default_duration(config.simulation.track_duration_secs);
        device.set_autoplay_blocked(config.simulation.autoplay_blocked);

        let mut controller =
            PlaybackController::new(config.player.clone(), config.playlist.clone())
                .with_clock(clock);
        controller.attach(device);
        controller.pump_events();
        controller.drain_events();

        Self {
            controller,
            step_secs: config.simulation.step_secs,
            wait,
        }
    }

    pub fn controller(&self) -> &PlaybackController<SimulatedDevice> {
        &self.controller
    }

    /// Apply one command and report the resulting session
    pub fn execute(&mut self, command: Command) -> Report<'_> {
        tracing::debug!("Executing {:?}", command);

        match command {
            Command::Toggle => self.controller.toggle(),
            Command::Back => self.controller.skip_back(),
            Command::Next => self.controller.skip_forward(),
            Command::Seek(fraction) => self.controller.seek(fraction),
            Command::Volume(level) => self.controller.set_volume(level),
            Command::Mute => self.controller.toggle_mute(),
            Command::Shuffle => self.controller.toggle_shuffle(),
            Command::Repeat => self.controller.cycle_repeat(),
            Command::Select(index) => self.controller.select_track(index),
            Command::Advance(secs) => self.advance(secs),
            Command::Status => {}
            Command::Hints => {
                return Report::Hints {
                    hints: self.controller.hints(),
                }
            }
        }

        self.controller.pump_events();

        Report::Session {
            command: format!("{:?}", command),
            events: self.controller.drain_events(),
            session: self.controller.session(),
        }
    }

    /// Move simulated time forward in steps of `step_secs`
    ///
    /// Each step is pumped separately so a track change at the end of one
    /// track lets the next one keep advancing.
    pub fn advance(&mut self, secs: f64) {
        let mut remaining = secs;

        while remaining > 0.0 {
            let step = remaining.min(self.step_secs);
            if let Some(device) = self.controller.device_mut() {
                device.advance(step);
            }
            self.controller.pump_events();
            remaining -= step;
        }
    }

    /// Simulated-progress demo: play and report `m:ss / m:ss` each step
    ///
    /// Stops early once playback pauses (end of playlist or rejected play).
    pub fn demo(&mut self, seconds: f64) -> Vec<String> {
        let mut lines = Vec::new();

        if self.controller.state() != PlayerState::Playing {
            self.controller.toggle();
        }
        self.settle();

        let mut elapsed = 0.0;
        while elapsed < seconds && self.controller.state() == PlayerState::Playing {
            self.advance(self.step_secs);
            self.settle();
            elapsed += self.step_secs;

            let session = self.controller.session();
            lines.push(format!(
                "{} / {}",
                format_time(session.position_secs()),
                format_time(session.duration_secs())
            ));
        }

        lines
    }

    /// Pump until a pending play/pause settle has fired
    fn settle(&mut self) {
        self.controller.pump_events();

        if let Some(delay) = self.controller.config().settle_delay() {
            if self.controller.pending_settle().is_some() {
                (self.wait)(delay);
                self.controller.pump_events();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_playback::{ControllerConfig, RepeatMode, Track};

    fn config() -> CliConfig {
        CliConfig {
            playlist: vec![
                Track::new("One", "Artist", "/one.wav"),
                Track::new("Two", "Artist", "/two.wav"),
            ],
            ..CliConfig::default()
        }
    }

    #[test]
    fn toggle_reports_playing_session() {
        let mut runner = Runner::new(&config());

        match runner.execute(Command::Toggle) {
            Report::Session {
                session, events, ..
            } => {
                assert_eq!(session.state(), PlayerState::Playing);
                assert!(events.contains(&PlaybackEvent::StateChanged {
                    state: PlayerState::Playing
                }));
            }
            Report::Hints { .. } => panic!("expected a session report"),
        }
    }

    #[test]
    fn advance_crosses_track_boundary() {
        let mut cfg = config();
        cfg.simulation.track_duration_secs = 10.0;
        let mut runner = Runner::new(&cfg);

        runner.execute(Command::Toggle);
        runner.execute(Command::Advance(14.0));

        let session = runner.controller().session();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.position_secs(), 4.0);
        assert_eq!(session.state(), PlayerState::Playing);
    }

    #[test]
    fn hints_report_labels() {
        let mut runner = Runner::new(&config());
        runner.execute(Command::Repeat);

        match runner.execute(Command::Hints) {
            Report::Hints { hints } => {
                assert_eq!(hints.repeat, "Repeat current track");
                assert_eq!(hints.skip_forward, "Restart current track");
            }
            Report::Session { .. } => panic!("expected hints"),
        }
        assert_eq!(runner.controller().session().repeat_mode(), RepeatMode::One);
    }

    #[test]
    fn demo_prints_progress() {
        let mut cfg = config();
        cfg.simulation.track_duration_secs = 125.0;
        let mut runner = Runner::new(&cfg);

        let lines = runner.demo(3.0);

        assert_eq!(lines, vec!["0:01 / 2:05", "0:02 / 2:05", "0:03 / 2:05"]);
    }

    #[test]
    fn demo_waits_out_settle_delay() {
        let mut cfg = config();
        cfg.player = ControllerConfig::simulated();
        cfg.simulation.track_duration_secs = 125.0;
        let clock = ManualClock::new();
        let start = clock.now();
        let mut runner = Runner::with_clock(&cfg, clock.clone());

        let lines = runner.demo(2.0);

        assert_eq!(lines, vec!["0:01 / 2:05", "0:02 / 2:05"]);
        assert_eq!(runner.controller().state(), PlayerState::Playing);
        assert_eq!(runner.controller().pending_settle(), None);
        assert_eq!(clock.now() - start, Duration::from_millis(500));
    }

    #[test]
    fn demo_stops_when_play_is_rejected() {
        let mut cfg = config();
        cfg.simulation.autoplay_blocked = true;
        let mut runner = Runner::new(&cfg);

        assert!(runner.demo(5.0).is_empty());
        assert_eq!(runner.controller().state(), PlayerState::Paused);
    }

    #[test]
    fn report_serializes_with_kind_tag() {
        let mut runner = Runner::new(&config());
        let report = runner.execute(Command::Status);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["kind"], "session");
        assert_eq!(json["command"], "Status");
        assert_eq!(json["session"]["state"], "paused");
    }
}
