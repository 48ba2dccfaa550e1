//! Deferred state settling
//!
//! Some player variants smooth rapid toggling by holding the `Loading`
//! state for a fixed delay after the device acknowledges play/pause.
//! The delay is modelled as an explicit pending action that the controller
//! polls, so a newer request can cancel or replace it.

use crate::types::PlayerState;
use std::time::{Duration, Instant};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSettle {
    target: PlayerState,
    due: Instant,
}

/// Single-slot deferred state transition
///
/// Only one settle can be pending; the most recent request wins.
#[derive(Debug, Clone)]
pub struct SettleTimer {
    delay: Option<Duration>,
    pending: Option<PendingSettle>,
}

impl SettleTimer {
    /// Create a timer; `None` settles immediately
    pub fn new(delay: Option<Duration>) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Request a transition to `target`
    ///
    /// Returns `Some(target)` when it should be applied right away
    /// (no delay configured). Otherwise the transition is scheduled,
    /// replacing any pending one, and `None` is returned.
    pub fn request(&mut self, target: PlayerState, now: Instant) -> Option<PlayerState> {
        match self.delay {
            None => {
                self.pending = None;
                Some(target)
            }
            Some(delay) => {
                self.pending = Some(PendingSettle {
                    target,
                    due: now + delay,
                });
                None
            }
        }
    }

    /// Drop the pending transition, returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Take the pending transition if it is due
    pub fn poll(&mut self, now: Instant) -> Option<PlayerState> {
        match self.pending {
            Some(pending) if now >= pending.due => {
                self.pending = None;
                Some(pending.target)
            }
            _ => None,
        }
    }

    /// Target of the pending transition, if any
    pub fn pending(&self) -> Option<PlayerState> {
        self.pending.map(|p| p.target)
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }
}
