//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// None of these are fatal: the worst outcome is the controller stopping in
/// `Idle` until a new queue is loaded.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Argument rejected by a queue or transport operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation needs a current item but the queue is empty
    #[error("No current item")]
    NoCurrentItem,

    /// Media resource failure reported by (or raised while driving) the adapter
    #[error("Media error: {0}")]
    Media(String),

    /// Preference store could not be read or written
    #[error("Preferences error: {0}")]
    Preferences(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
