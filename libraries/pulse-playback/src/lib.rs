//! Pulse Player - Playback Control
//!
//! Platform-agnostic playback state machine for Pulse Player.
//!
//! This crate provides:
//! - Play/pause with a transient `Loading` state until the device confirms
//! - Track navigation (skip back/forward, direct selection)
//! - Shuffle (never repeats the current track)
//! - Repeat modes (Off, All, One; or a two-state on/off toggle)
//! - Seek by fraction of duration
//! - Volume control (0-100%, mute/unmute with restore)
//! - Optional smoothing of play/pause transitions
//!
//! # Architecture
//!
//! `pulse-playback` never touches audio itself. The media element that
//! decodes and outputs sound is abstracted behind [`MediaDevice`]: the
//! controller issues fire-and-forget commands and reacts to the events the
//! device emits. Everything runs on one thread; intents and device events
//! are applied in the order they arrive.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use pulse_playback::{ControllerConfig, PlaybackController, PlayerState, SimulatedDevice, Track};
//!
//! let playlist = vec![
//!     Track::new("Blue", "Yung Kai", "/Blue - Yung Kai.wav"),
//!     Track::new("Tanah Airku", "My Spring Lullaby", "/Tanah Airku - My Spring Lullaby.wav"),
//! ];
//!
//! let mut controller = PlaybackController::new(ControllerConfig::playlist(), playlist);
//! controller.attach(SimulatedDevice::new());
//!
//! // Loading until the device acknowledges
//! controller.toggle();
//! assert_eq!(controller.state(), PlayerState::Loading);
//!
//! controller.pump_events();
//! assert_eq!(controller.state(), PlayerState::Playing);
//!
//! // Next track keeps playing
//! controller.skip_forward();
//! controller.pump_events();
//! assert_eq!(controller.session().current_index(), 1);
//! assert_eq!(controller.state(), PlayerState::Playing);
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use pulse_playback::{ControllerConfig, PlaybackController, RepeatMode, SimulatedDevice};
//!
//! let mut controller: PlaybackController<SimulatedDevice> =
//!     PlaybackController::new(ControllerConfig::default(), Vec::new());
//!
//! controller.toggle_shuffle();
//! controller.cycle_repeat();
//! assert!(controller.session().is_shuffle());
//! assert_eq!(controller.session().repeat_mode(), RepeatMode::One);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use pulse_playback::{DeviceEvent, EventEmitter, MediaDevice, Result, Subscription, SubscriptionId};
//!
//! // Implement MediaDevice for your platform
//! struct MyAudioElement {
//!     events: EventEmitter,
//!     // ... platform-specific handle
//! }
//!
//! impl MediaDevice for MyAudioElement {
//!     fn subscribe(&mut self) -> Subscription {
//!         self.events.subscribe()
//!     }
//!
//!     fn unsubscribe(&mut self, id: SubscriptionId) {
//!         self.events.unsubscribe(id);
//!     }
//!
//!     fn load(&mut self, source: &str) -> Result<()> {
//!         // Point the element at `source`; emit MetadataLoaded once known
//!         Ok(())
//!     }
//!
//!     fn play(&mut self) -> Result<()> {
//!         self.events.emit(DeviceEvent::Play);
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) -> Result<()> {
//!         self.events.emit(DeviceEvent::Pause);
//!         Ok(())
//!     }
//!
//!     fn current_time(&self) -> f64 {
//!         0.0
//!     }
//!
//!     fn set_current_time(&mut self, seconds: f64) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn duration(&self) -> f64 {
//!         0.0
//!     }
//!
//!     fn set_volume(&mut self, gain: f32) -> Result<()> {
//!         Ok(())
//!     }
//! }
//! ```

mod controller;
mod device;
mod error;
pub mod events;
mod hints;
mod session;
mod settle;
mod shuffle;
mod simulated;
pub mod time;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use device::{DeviceEvent, EventEmitter, MediaDevice, Subscription, SubscriptionId};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use hints::ControlHints;
pub use session::PlaybackSession;
pub use settle::{Clock, SettleTimer, SystemClock};
pub use shuffle::pick_shuffle_index;
pub use simulated::{DeviceCommand, ManualClock, SimulatedDevice, DEFAULT_SIMULATED_DURATION_SECS};
pub use time::{format_time, progress_fraction, progress_percent};
pub use types::{ControllerConfig, PlayerState, RepeatMode, RepeatStyle, Track};
pub use volume::Volume;
