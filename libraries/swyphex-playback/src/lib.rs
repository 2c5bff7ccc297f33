//! SwyPhex - Playback Engine
//!
//! Platform-agnostic playback state machine for the SwyPhex player.
//!
//! This crate provides:
//! - Queue with a current position (select, next, previous)
//! - Shuffle that visits every item once per cycle without reordering the queue
//! - Repeat modes (Off, All, One)
//! - Transport control (play/pause, clamped seek, volume, mute)
//! - Generation-tagged adapter events, so callbacks from a skipped track
//!   can never advance the queue twice
//! - Persisted preferences (volume, mute, shuffle, repeat)
//!
//! # Architecture
//!
//! `swyphex-playback` owns no audio output. Whatever actually plays media
//! (a browser element behind a bridge, a desktop decoder, a simulation)
//! implements [`MediaAdapter`]; the UI layer forwards the adapter's callbacks
//! into [`TransportController::handle_event`] and drains [`PlaybackEvent`]s
//! for display.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use swyphex_playback::{
//!     AdapterEvent, Generation, MediaAdapter, PlayableItem, PlaybackConfig, Result,
//!     TransportController, TransportState,
//! };
//!
//! // Implement MediaAdapter for your platform
//! struct SilentAdapter;
//!
//! impl MediaAdapter for SilentAdapter {
//!     fn load(&mut self, _uri: &str, _generation: Generation) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn seek(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _level: f32) -> Result<()> { Ok(()) }
//! }
//!
//! let mut player = TransportController::new(SilentAdapter, PlaybackConfig::default());
//!
//! let songs = vec![
//!     PlayableItem::new("1", "Intro", "Band", "/uploads/intro.mp3"),
//!     PlayableItem::new("2", "Outro", "Band", "/uploads/outro.mp3"),
//! ];
//! player.play_queue(songs, None).unwrap();
//! assert_eq!(player.state(), TransportState::Loading);
//!
//! // The platform reports metadata, then acknowledges playback
//! let generation = player.generation();
//! player.handle_event(AdapterEvent::metadata_loaded(generation, 214.0));
//! player.handle_event(AdapterEvent::playback_started(generation));
//! assert_eq!(player.state(), TransportState::Playing);
//!
//! // End of track advances the queue and loads the next song
//! player.handle_event(AdapterEvent::ended(generation));
//! assert_eq!(player.current_item().unwrap().id, "2");
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use swyphex_playback::{Queue, RepeatMode, PlayableItem};
//!
//! let mut queue = Queue::new(Some(7));
//! let items = (0..4)
//!     .map(|i| PlayableItem::new(i.to_string(), "Song", "Band", format!("/{}.mp3", i)))
//!     .collect();
//! queue.set_queue(items, None).unwrap();
//!
//! queue.toggle_shuffle();
//! queue.set_repeat_mode(RepeatMode::All);
//! let next = queue.advance().unwrap();
//! assert_ne!(next.index(), 0);
//! ```

mod adapter;
mod error;
mod events;
mod preferences;
mod queue;
mod shuffle;
mod transport;
pub mod types;
mod volume;

// Public exports
pub use adapter::{AdapterEvent, Generation, MediaAdapter, MediaEvent};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use preferences::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences};
pub use queue::{Queue, QueueMove};
pub use shuffle::ShuffleCycle;
pub use transport::TransportController;
pub use types::{
    format_clock, PlayableItem, PlaybackConfig, PlaybackState, RepeatMode, TransportState,
};
pub use volume::Volume;
