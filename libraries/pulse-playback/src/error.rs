//! Error types for playback control

use thiserror::Error;

/// Playback errors
///
/// Intents never return these; they surface at the device seam and are
/// logged by the controller.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The media device refused or failed a command
    #[error("Device error: {0}")]
    Device(String),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
