//! Playback controller - core state machine
//!
//! Owns the `PlaybackSession`, reacts to user intents and media device
//! events, and issues fire-and-forget commands to the device.

use crate::{
    device::{DeviceEvent, MediaDevice, Subscription},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    hints::ControlHints,
    session::PlaybackSession,
    settle::{Clock, SettleTimer, SystemClock},
    shuffle::pick_shuffle_index,
    types::{ControllerConfig, PlayerState, RepeatMode, Track},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Skip back restarts the current track once playback is past this point
const RESTART_THRESHOLD_SECS: f64 = 3.0;

/// Device plus the event subscription taken on it
struct Attachment<D> {
    device: D,
    subscription: Subscription,
}

/// Where playback goes after the current track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextTrack {
    Index(usize),
    Stop,
}

/// Playback controller
///
/// One controller serves every player variant; `ControllerConfig` decides
/// which features (shuffle, repeat style, settle delay) are active.
///
/// All intents are infallible: degenerate situations (no device attached,
/// empty playlist, unknown duration) are logged and ignored.
pub struct PlaybackController<D: MediaDevice> {
    config: ControllerConfig,
    session: PlaybackSession,
    attachment: Option<Attachment<D>>,

    // Target of the latest play/pause request
    requested: PlayerState,

    // Deferred play/pause acknowledgment
    settle: SettleTimer,
    clock: Box<dyn Clock>,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<D: MediaDevice> PlaybackController<D> {
    /// Create a controller with no device attached
    pub fn new(config: ControllerConfig, playlist: Vec<Track>) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            session: PlaybackSession::new(&config, playlist),
            settle: SettleTimer::new(config.settle_delay()),
            config,
            attachment: None,
            requested: PlayerState::Paused,
            clock: Box::new(SystemClock),
            rng,
            pending_events: Vec::new(),
        }
    }

    /// Replace the time source used for settle delays
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ===== Device Lifecycle =====

    /// Attach a media device
    ///
    /// Subscribes to its events, pushes the current volume and loads the
    /// current track. A previously attached device is detached and dropped.
    pub fn attach(&mut self, mut device: D) {
        if self.attachment.is_some() {
            self.detach();
        }

        let subscription = device.subscribe();
        debug!("Attached media device (subscription {:?})", subscription.id());
        self.attachment = Some(Attachment {
            device,
            subscription,
        });

        self.settle.cancel();
        self.requested = PlayerState::Paused;
        self.set_state(PlayerState::Paused);
        self.apply_volume();
        self.reset_progress();

        if let Some(source) = self.current_source() {
            self.command("load", |d| d.load(&source));
        }
    }

    /// Detach the media device, releasing its event subscription
    pub fn detach(&mut self) -> Option<D> {
        let Attachment {
            mut device,
            subscription,
        } = self.attachment.take()?;

        device.unsubscribe(subscription.id());
        self.settle.cancel();
        debug!("Detached media device (subscription {:?})", subscription.id());

        Some(device)
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn device(&self) -> Option<&D> {
        self.attachment.as_ref().map(|a| &a.device)
    }

    pub fn device_mut(&mut self) -> Option<&mut D> {
        self.attachment.as_mut().map(|a| &mut a.device)
    }

    // ===== Playback Control =====

    /// Toggle between playing and paused
    ///
    /// Enters `Loading` right away; the device's acknowledgment settles the
    /// final state. Cancels any pending settle from an earlier toggle.
    pub fn toggle(&mut self) {
        if !self.can_control("toggle") {
            return;
        }

        if self.session.state == PlayerState::Playing {
            self.request(PlayerState::Paused, PlayerState::Playing);
        } else {
            self.request(PlayerState::Playing, PlayerState::Paused);
        }
    }

    /// Go back
    ///
    /// Repeat-one restarts the track and keeps playing. Past the first
    /// 3 seconds (or on the first track) the track restarts paused.
    /// Otherwise moves to the previous track.
    pub fn skip_back(&mut self) {
        if !self.can_control("skip back") {
            return;
        }

        if self.session.repeat_mode == RepeatMode::One {
            self.seek_to_secs(0.0);
            return;
        }

        if self.session.position_secs > RESTART_THRESHOLD_SECS || self.session.current_index == 0 {
            self.seek_to_secs(0.0);
            self.stop_paused();
            return;
        }

        let previous = self.session.current_index.saturating_sub(1);
        self.change_track(previous, false);
    }

    /// Go forward
    ///
    /// Repeat-one restarts the track. Otherwise shuffle, then the next
    /// track, then wrap-around with repeat-all; on the last track with
    /// repeat off, jumps to the end and pauses.
    pub fn skip_forward(&mut self) {
        if !self.can_control("skip forward") {
            return;
        }

        if self.session.repeat_mode == RepeatMode::One {
            self.seek_to_secs(0.0);
            return;
        }

        match self.resolve_next() {
            NextTrack::Index(index) if index == self.session.current_index => {
                // Repeat-all over a single track
                self.seek_to_secs(0.0);
            }
            NextTrack::Index(index) => self.change_track(index, false),
            NextTrack::Stop => {
                let end = self.session.duration_secs;
                self.seek_to_secs(end);
                self.stop_paused();
            }
        }
    }

    /// Play the track at `index`
    pub fn select_track(&mut self, index: usize) {
        if !self.can_control("select track") {
            return;
        }

        if index >= self.session.playlist.len() {
            warn!(
                "Ignoring track selection: {} (playlist has {})",
                PlaybackError::IndexOutOfBounds(index),
                self.session.playlist.len()
            );
            return;
        }

        if index == self.session.current_index {
            if self.session.state != PlayerState::Playing {
                self.request(PlayerState::Playing, PlayerState::Paused);
            }
            return;
        }

        self.change_track(index, true);
    }

    // ===== Seek =====

    /// Seek to a fraction (0.0 - 1.0) of the current track
    ///
    /// Ignored until the duration is known.
    pub fn seek(&mut self, fraction: f64) {
        if !self.can_control("seek") {
            return;
        }

        if !self.session.has_duration() || !fraction.is_finite() {
            debug!("Ignoring seek to {}: duration unknown", fraction);
            return;
        }

        let position = fraction.clamp(0.0, 1.0) * self.session.duration_secs;
        self.seek_to_secs(position);
    }

    // ===== Volume =====

    /// Set volume (0-100); 0 counts as muted
    pub fn set_volume(&mut self, percent: u8) {
        self.session.volume.set_level(percent);
        self.apply_volume();
    }

    /// Toggle mute, restoring the previous level on unmute
    pub fn toggle_mute(&mut self) {
        self.session.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle (takes effect on the next track change)
    pub fn toggle_shuffle(&mut self) {
        if !self.config.shuffle_available {
            debug!("Shuffle is not available for this player");
            return;
        }

        self.session.is_shuffle = !self.session.is_shuffle;
        self.push_event(PlaybackEvent::ShuffleChanged {
            enabled: self.session.is_shuffle,
        });
    }

    /// Advance the repeat button to its next mode
    pub fn cycle_repeat(&mut self) {
        if !self.config.repeat_available {
            debug!("Repeat is not available for this player");
            return;
        }

        self.session.repeat_mode = self.session.repeat_mode.cycle(self.config.repeat_style);
        self.push_event(PlaybackEvent::RepeatChanged {
            mode: self.session.repeat_mode,
        });
    }

    // ===== Device Events =====

    /// Apply one event reported by the device
    pub fn handle_device_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::TimeUpdate { position } => self.on_time_update(position),
            DeviceEvent::MetadataLoaded { duration } => self.on_metadata_loaded(duration),
            DeviceEvent::Play => self.on_acknowledged(PlayerState::Playing),
            DeviceEvent::Pause => self.on_acknowledged(PlayerState::Paused),
            DeviceEvent::Ended => self.on_ended(),
        }
    }

    /// Handle every event queued on the device subscription, then apply
    /// any settle that came due
    ///
    /// Returns the number of device events handled.
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;

        while let Some(event) = self
            .attachment
            .as_ref()
            .and_then(|a| a.subscription.try_next())
        {
            self.handle_device_event(event);
            handled += 1;
        }

        self.tick();
        handled
    }

    /// Apply a deferred state settle if it is due
    pub fn tick(&mut self) {
        let now = self.clock.now();
        if let Some(state) = self.settle.poll(now) {
            self.set_state(state);
        }
    }

    fn on_time_update(&mut self, position: f64) {
        self.session.position_secs = if self.session.has_duration() && position.is_finite() {
            position.clamp(0.0, self.session.duration_secs)
        } else {
            0.0
        };
        self.emit_position_update();
    }

    fn on_metadata_loaded(&mut self, duration: f64) {
        self.session.duration_secs = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        self.session.position_secs = self
            .session
            .position_secs
            .clamp(0.0, self.session.duration_secs);

        self.push_event(PlaybackEvent::DurationChanged {
            duration_secs: self.session.duration_secs,
        });
    }

    fn on_acknowledged(&mut self, target: PlayerState) {
        let now = self.clock.now();
        if let Some(state) = self.settle.request(target, now) {
            self.set_state(state);
        }
    }

    /// Same decision tree as `skip_forward`, except that the next (or
    /// repeated) track always starts playing
    fn on_ended(&mut self) {
        if self.session.current_track().is_none() {
            return;
        }

        let finished = self.session.current_index;
        self.push_event(PlaybackEvent::TrackFinished { index: finished });

        if self.session.repeat_mode == RepeatMode::One {
            self.seek_to_secs(0.0);
            self.request(PlayerState::Playing, PlayerState::Paused);
            return;
        }

        match self.resolve_next() {
            NextTrack::Index(index) if index == finished => {
                self.seek_to_secs(0.0);
                self.request(PlayerState::Playing, PlayerState::Paused);
            }
            NextTrack::Index(index) => self.change_track(index, true),
            NextTrack::Stop => {
                info!("Reached end of playlist");
                self.settle.cancel();
                self.requested = PlayerState::Paused;
                self.session.position_secs = self.session.duration_secs;
                self.emit_position_update();
                self.set_state(PlayerState::Paused);
            }
        }
    }

    // ===== State Queries =====

    /// Current session snapshot
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn state(&self) -> PlayerState {
        self.session.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Tooltip labels for the current session
    pub fn hints(&self) -> ControlHints {
        ControlHints::from_session(&self.session)
    }

    /// Target of a deferred settle that has not fired yet
    pub fn pending_settle(&self) -> Option<PlayerState> {
        self.settle.pending()
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Intents need a device and a track
    fn can_control(&self, intent: &str) -> bool {
        if self.attachment.is_none() {
            debug!("No device attached, ignoring {}", intent);
            return false;
        }
        if self.session.current_track().is_none() {
            debug!("Playlist is empty, ignoring {}", intent);
            return false;
        }
        true
    }

    /// Issue a device command; returns whether the device accepted it
    fn command<F>(&mut self, what: &str, f: F) -> bool
    where
        F: FnOnce(&mut D) -> Result<()>,
    {
        let Some(attachment) = self.attachment.as_mut() else {
            debug!("No device attached, dropping {} command", what);
            return false;
        };

        match f(&mut attachment.device) {
            Ok(()) => true,
            Err(e) => {
                warn!("Device rejected {}: {}", what, e);
                false
            }
        }
    }

    /// Enter `Loading` and ask the device for `target`
    ///
    /// A synchronous rejection falls back to `fallback` instead of leaving
    /// the player stuck in `Loading`.
    fn request(&mut self, target: PlayerState, fallback: PlayerState) {
        self.settle.cancel();
        self.requested = target;
        self.set_state(PlayerState::Loading);

        let accepted = match target {
            PlayerState::Playing => self.command("play", D::play),
            PlayerState::Paused | PlayerState::Loading => self.command("pause", D::pause),
        };

        if !accepted {
            self.set_state(fallback);
        }
    }

    /// Pause immediately without waiting for an acknowledgment
    fn stop_paused(&mut self) {
        self.settle.cancel();
        self.requested = PlayerState::Paused;
        self.set_state(PlayerState::Paused);
        self.command("pause", D::pause);
    }

    fn resolve_next(&mut self) -> NextTrack {
        let len = self.session.playlist.len();
        let current = self.session.current_index;

        if self.session.is_shuffle {
            if let Some(index) = pick_shuffle_index(&mut self.rng, len, current) {
                return NextTrack::Index(index);
            }
        }

        if current + 1 < len {
            NextTrack::Index(current + 1)
        } else if self.session.repeat_mode == RepeatMode::All {
            NextTrack::Index(0)
        } else {
            NextTrack::Stop
        }
    }

    /// Playing, or loading towards playing
    fn is_playing_or_starting(&self) -> bool {
        match self.session.state {
            PlayerState::Playing => true,
            PlayerState::Loading => self.requested == PlayerState::Playing,
            PlayerState::Paused => false,
        }
    }

    /// Switch to another track
    ///
    /// Resets progress and loads the new source. Playback continues if the
    /// player was playing or about to; `autoplay` forces a play request.
    /// Loading a source stops the device, so anything else settles paused.
    fn change_track(&mut self, index: usize, autoplay: bool) {
        let previous_index = self.session.current_index;
        let was_playing = self.is_playing_or_starting();

        self.session.current_index = index;
        self.reset_progress();
        self.push_event(PlaybackEvent::TrackChanged {
            index,
            previous_index,
        });

        let Some(source) = self.current_source() else {
            return;
        };
        info!("Track changed: {} -> {} ({})", previous_index, index, source);

        self.command("load", |d| d.load(&source));

        if autoplay {
            self.request(PlayerState::Playing, PlayerState::Paused);
        } else if was_playing {
            self.requested = PlayerState::Playing;
            if !self.command("play", D::play) {
                self.settle.cancel();
                self.set_state(PlayerState::Paused);
            }
        } else {
            self.settle.cancel();
            self.requested = PlayerState::Paused;
            self.set_state(PlayerState::Paused);
        }
    }

    fn current_source(&self) -> Option<String> {
        self.session.current_track().map(|t| t.source.clone())
    }

    /// Move to `seconds` in the current track (optimistic update)
    fn seek_to_secs(&mut self, seconds: f64) {
        let position = if self.session.has_duration() {
            seconds.clamp(0.0, self.session.duration_secs)
        } else {
            0.0
        };

        self.command("seek", |d| d.set_current_time(position));
        self.session.position_secs = position;
        self.emit_position_update();
    }

    fn reset_progress(&mut self) {
        self.session.position_secs = 0.0;
        self.session.duration_secs = 0.0;
        self.emit_position_update();
    }

    fn apply_volume(&mut self) {
        let gain = self.session.volume.gain();
        self.command("set volume", |d| d.set_volume(gain));
        self.push_event(PlaybackEvent::VolumeChanged {
            level: self.session.volume.level(),
            is_muted: self.session.volume.is_muted(),
        });
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.session.state == state {
            return;
        }

        debug!("Player state: {:?} -> {:?}", self.session.state, state);
        self.session.state = state;
        self.push_event(PlaybackEvent::StateChanged { state });
    }

    fn emit_position_update(&mut self) {
        self.push_event(PlaybackEvent::PositionUpdate {
            position_secs: self.session.position_secs,
            duration_secs: self.session.duration_secs,
        });
    }

    fn push_event(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}

impl<D: MediaDevice> Drop for PlaybackController<D> {
    fn drop(&mut self) {
        if let Some(mut attachment) = self.attachment.take() {
            attachment.device.unsubscribe(attachment.subscription.id());
        }
    }
}
