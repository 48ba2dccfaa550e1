//! Platform-agnostic media device trait
//!
//! Abstracts the media element (browser audio element, native player, ...)
//! that actually decodes and outputs audio. Commands are fire-and-forget:
//! their outcome is observed through [`DeviceEvent`]s delivered on a
//! [`Subscription`].

use crate::error::Result;
use serde::{Deserialize, Serialize};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

/// Events emitted by a media device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// Playback position advanced (seconds)
    TimeUpdate { position: f64 },

    /// Metadata for the loaded source is available (seconds)
    MetadataLoaded { duration: f64 },

    /// Device started playing
    Play,

    /// Device paused
    Pause,

    /// Playback reached the end of the source
    Ended,
}

/// Identifies one event subscription on a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Receiving end of a device event subscription
///
/// Hand the id back to [`MediaDevice::unsubscribe`] to release it.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    events: Receiver<DeviceEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Take the next pending event, if any
    ///
    /// Returns `None` when the queue is empty or the device went away.
    pub fn try_next(&self) -> Option<DeviceEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

/// Platform-agnostic media device
///
/// Implementors wrap whatever actually plays audio. `PlaybackController`
/// only issues commands and reacts to the events the device emits.
pub trait MediaDevice {
    /// Register for device events
    fn subscribe(&mut self) -> Subscription;

    /// Release a subscription
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Load a new source (resets position, metadata arrives later)
    fn load(&mut self, source: &str) -> Result<()>;

    /// Request playback
    ///
    /// # Returns
    /// * `Ok(())` - Request issued, `DeviceEvent::Play` follows on success
    /// * `Err(_)` - Device rejected the request (e.g. autoplay policy)
    fn play(&mut self) -> Result<()>;

    /// Request pause
    fn pause(&mut self) -> Result<()>;

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position (seconds)
    fn set_current_time(&mut self, seconds: f64) -> Result<()>;

    /// Duration of the loaded source in seconds (0 until known)
    fn duration(&self) -> f64;

    /// Set output gain (0.0 - 1.0)
    fn set_volume(&mut self, gain: f32) -> Result<()>;
}

/// Subscriber bookkeeping for device implementations
///
/// Senders whose receiver was dropped are pruned on the next emit.
#[derive(Debug, Default)]
pub struct EventEmitter {
    subscribers: Vec<(SubscriptionId, Sender<DeviceEvent>)>,
    next_id: u64,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = unbounded();
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, tx));

        Subscription { id, events: rx }
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    pub fn emit(&mut self, event: DeviceEvent) {
        self.subscribers.retain(|(_, tx)| tx.send(event).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
