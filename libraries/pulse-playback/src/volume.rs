//! Volume control with mute/restore
//!
//! Volume is a 0-100% level applied linearly to the device (`level / 100`).
//! Muting drops the level to 0 and remembers the previous one.

use serde::{Deserialize, Serialize};

/// Volume controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state
    muted: bool,

    /// Level restored by unmute
    level_before_mute: u8,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0-100, default: 70)
    pub fn new(level: u8) -> Self {
        let level = level.min(100);

        Self {
            level,
            muted: level == 0,
            level_before_mute: level,
        }
    }

    /// Set volume level (0-100)
    ///
    /// A level of 0 counts as muted, anything else unmutes.
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
        self.muted = self.level == 0;
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Level that unmute will restore
    pub fn level_before_mute(&self) -> u8 {
        self.level_before_mute
    }

    /// Toggle mute state
    ///
    /// Muting stores the current level and drops to 0; unmuting restores it.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            self.level = self.level_before_mute;
        } else {
            self.level_before_mute = self.level;
            self.muted = true;
            self.level = 0;
        }
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain to hand to the device
    ///
    /// Returns 0.0 if muted, otherwise `level / 100`.
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.level) / 100.0
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(70)
    }
}
