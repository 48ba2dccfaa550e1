//! In-memory media device
//!
//! `SimulatedDevice` behaves like a browser audio element without producing
//! sound: it acknowledges commands immediately, advances time on request and
//! records every command it receives. It backs the simulated-progress demo
//! and the test suites.

use crate::device::{DeviceEvent, EventEmitter, MediaDevice, Subscription, SubscriptionId};
use crate::error::{PlaybackError, Result};
use crate::settle::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Track length used when a source has no explicit duration (3:45)
pub const DEFAULT_SIMULATED_DURATION_SECS: f64 = 225.0;

/// Command received by a simulated device
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
}

/// Media device that plays nothing
#[derive(Debug)]
pub struct SimulatedDevice {
    emitter: EventEmitter,
    durations: HashMap<String, f64>,
    default_duration: f64,
    source: Option<String>,
    current_time: f64,
    duration: f64,
    paused: bool,
    volume: f32,
    autoplay_blocked: bool,
    commands: Vec<DeviceCommand>,
}

impl SimulatedDevice {
    pub fn new() -> Self {
        Self {
            emitter: EventEmitter::new(),
            durations: HashMap::new(),
            default_duration: DEFAULT_SIMULATED_DURATION_SECS,
            source: None,
            current_time: 0.0,
            duration: 0.0,
            paused: true,
            volume: 1.0,
            autoplay_blocked: false,
            commands: Vec::new(),
        }
    }

    /// Duration reported for sources without an explicit entry
    pub fn with_default_duration(mut self, seconds: f64) -> Self {
        self.default_duration = seconds;
        self
    }

    /// Duration reported when `source` is loaded
    pub fn with_duration(mut self, source: impl Into<String>, seconds: f64) -> Self {
        self.durations.insert(source.into(), seconds);
        self
    }

    /// Make `play()` fail, like a browser enforcing its autoplay policy
    pub fn set_autoplay_blocked(&mut self, blocked: bool) {
        self.autoplay_blocked = blocked;
    }

    /// Advance playback time by `seconds`
    ///
    /// Does nothing while paused. Reaching the end pauses the device and
    /// emits `TimeUpdate`, `Pause` and `Ended`, in that order.
    pub fn advance(&mut self, seconds: f64) {
        if self.paused || self.source.is_none() || seconds <= 0.0 {
            return;
        }

        self.current_time = (self.current_time + seconds).min(self.duration);
        self.emitter.emit(DeviceEvent::TimeUpdate {
            position: self.current_time,
        });

        if self.current_time >= self.duration {
            self.paused = true;
            self.emitter.emit(DeviceEvent::Pause);
            self.emitter.emit(DeviceEvent::Ended);
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn subscriber_count(&self) -> usize {
        self.emitter.subscriber_count()
    }

    /// Every command received so far
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Drain the command log
    pub fn take_commands(&mut self) -> Vec<DeviceCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaDevice for SimulatedDevice {
    fn subscribe(&mut self) -> Subscription {
        self.emitter.subscribe()
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.emitter.unsubscribe(id);
    }

    fn load(&mut self, source: &str) -> Result<()> {
        self.commands.push(DeviceCommand::Load(source.to_string()));

        self.duration = self
            .durations
            .get(source)
            .copied()
            .unwrap_or(self.default_duration);
        self.source = Some(source.to_string());
        self.current_time = 0.0;
        self.paused = true;

        self.emitter.emit(DeviceEvent::MetadataLoaded {
            duration: self.duration,
        });
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.commands.push(DeviceCommand::Play);

        if self.source.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if self.autoplay_blocked {
            return Err(PlaybackError::Device(
                "play() rejected by autoplay policy".to_string(),
            ));
        }

        // Restart from the top when played after reaching the end
        if self.current_time >= self.duration {
            self.current_time = 0.0;
        }
        self.paused = false;
        self.emitter.emit(DeviceEvent::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.commands.push(DeviceCommand::Pause);

        if !self.paused {
            self.paused = true;
            self.emitter.emit(DeviceEvent::Pause);
        }
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<()> {
        self.commands.push(DeviceCommand::Seek(seconds));

        if self.source.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if !seconds.is_finite() {
            return Err(PlaybackError::InvalidOperation(format!(
                "cannot seek to {}",
                seconds
            )));
        }

        self.current_time = seconds.clamp(0.0, self.duration);
        self.emitter.emit(DeviceEvent::TimeUpdate {
            position: self.current_time,
        });
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_volume(&mut self, gain: f32) -> Result<()> {
        self.commands.push(DeviceCommand::SetVolume(gain));
        self.volume = gain.clamp(0.0, 1.0);
        Ok(())
    }
}

/// Manually advanced clock
///
/// Clones share the same time, so a test can keep one handle while the
/// controller owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
