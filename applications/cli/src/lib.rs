//! SwyPhex Player - terminal front end for the playback engine
//!
//! Drives a [`swyphex_playback::TransportController`] against a simulated
//! media element so queue, shuffle, repeat and error handling can be
//! exercised without an audio device.

pub mod commands;
pub mod config;
pub mod error;
pub mod playlist;
pub mod simulated;

pub use commands::Command;
pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
pub use simulated::SimulatedMedia;
