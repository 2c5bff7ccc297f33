//! Media adapter contract
//!
//! The adapter is whatever actually decodes and plays audio: a browser media
//! element behind a bridge, a desktop decoder, or a simulation in tests. The
//! transport controller drives it through [`MediaAdapter`] and receives its
//! asynchronous callbacks as [`AdapterEvent`] messages forwarded by the UI
//! layer.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag distinguishing one load from every load before it
///
/// The controller bumps the generation on every item switch and discards
/// events carrying any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    /// Generation that precedes every load
    pub const INITIAL: Generation = Generation(0);

    /// Following generation
    #[must_use]
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// Playback capability the transport controller drives
///
/// Calls return once the request is issued; outcomes arrive later as events.
/// At most one load is active per adapter: `load` releases whatever was
/// loaded before.
pub trait MediaAdapter {
    /// Start loading `uri`; every event about it must carry `generation`
    fn load(&mut self, uri: &str, generation: Generation) -> Result<()>;

    /// Request playback; acknowledged with [`MediaEvent::PlaybackStarted`]
    fn play(&mut self) -> Result<()>;

    /// Stop producing audio, keeping position
    fn pause(&mut self) -> Result<()>;

    /// Move the playhead; only called after metadata is known
    fn seek(&mut self, seconds: f64) -> Result<()>;

    /// Set output level in `[0, 1]`
    fn set_volume(&mut self, level: f32) -> Result<()>;
}

/// Raw adapter callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Metadata available; duration is now authoritative
    MetadataLoaded { duration_seconds: f64 },

    /// Playhead moved
    TimeProgressed { position_seconds: f64 },

    /// A play request took effect
    PlaybackStarted,

    /// Reached the end of the resource
    Ended,

    /// Resource unreachable, corrupt, or playback refused
    Error { reason: String },
}

/// Adapter callback tagged with the load it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterEvent {
    pub generation: Generation,
    pub event: MediaEvent,
}

impl AdapterEvent {
    pub fn new(generation: Generation, event: MediaEvent) -> Self {
        Self { generation, event }
    }

    pub fn metadata_loaded(generation: Generation, duration_seconds: f64) -> Self {
        Self::new(generation, MediaEvent::MetadataLoaded { duration_seconds })
    }

    pub fn time_progressed(generation: Generation, position_seconds: f64) -> Self {
        Self::new(generation, MediaEvent::TimeProgressed { position_seconds })
    }

    pub fn playback_started(generation: Generation) -> Self {
        Self::new(generation, MediaEvent::PlaybackStarted)
    }

    pub fn ended(generation: Generation) -> Self {
        Self::new(generation, MediaEvent::Ended)
    }

    pub fn error(generation: Generation, reason: impl Into<String>) -> Self {
        Self::new(
            generation,
            MediaEvent::Error {
                reason: reason.into(),
            },
        )
    }
}
