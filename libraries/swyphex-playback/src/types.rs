//! Core types for playback management

use serde::{Deserialize, Serialize};

/// A queued track reference
///
/// Carries everything the player needs for display and for handing a locator
/// to the media adapter. Immutable once enqueued; the queue only hands out
/// shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayableItem {
    /// Unique song identifier from the catalogue
    pub id: String,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Locator handed to the media adapter
    pub media_uri: String,

    /// Cover art locator
    #[serde(default)]
    pub artwork_uri: Option<String>,

    /// Advisory duration in seconds
    ///
    /// The adapter's `MetadataLoaded` value is authoritative once it arrives.
    #[serde(default)]
    pub duration_hint: Option<f64>,
}

impl PlayableItem {
    /// Create an item with the required fields
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        media_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            media_uri: media_uri.into(),
            artwork_uri: None,
            duration_hint: None,
        }
    }

    /// Attach a cover art locator
    #[must_use]
    pub fn with_artwork(mut self, uri: impl Into<String>) -> Self {
        self.artwork_uri = Some(uri.into());
        self
    }

    /// Attach an advisory duration
    #[must_use]
    pub fn with_duration_hint(mut self, seconds: f64) -> Self {
        self.duration_hint = Some(seconds);
        self
    }
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the queue ends
    #[default]
    #[serde(rename = "none")]
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current item on natural end
    One,
}

impl RepeatMode {
    /// Next mode for a single repeat button: Off → All → One → Off
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Transport state for the current item
///
/// `Paused` and `Playing` are the two sub-states of "ready" (duration known).
/// The per-item ended state is transient and resolved inside the event
/// handler, so it never shows up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No current item
    Idle,

    /// Current item handed to the adapter, metadata not reported yet
    Loading,

    /// Ready and not playing
    Paused,

    /// Ready and the adapter acknowledged playback
    Playing,
}

impl TransportState {
    /// Whether the adapter has reported metadata for the current item
    pub fn is_ready(self) -> bool {
        matches!(self, TransportState::Paused | TransportState::Playing)
    }
}

/// Snapshot of the playback state for display
///
/// `position_seconds` and `duration_seconds` mirror the adapter; the
/// controller owns only the intent fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_item: Option<PlayableItem>,
    pub state: TransportState,
    pub is_playing: bool,
    pub volume: f32,
    pub is_muted: bool,
    pub position_seconds: f64,
    /// `None` until the adapter reports metadata
    pub duration_seconds: Option<f64>,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

/// Configuration for the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume in `[0, 1]` (default: 1.0)
    pub volume: f32,

    /// Initial mute state (default: false)
    pub muted: bool,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Seconds into a track after which "previous" restarts it (default: 3.0)
    pub restart_threshold_secs: f64,

    /// Fixed shuffle seed for reproducible sessions
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
            shuffle: false,
            repeat: RepeatMode::Off,
            restart_threshold_secs: 3.0,
            shuffle_seed: None,
        }
    }
}

/// Format seconds as `m:ss` for a progress display
///
/// Unknown or negative values render as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 1.0);
        assert!(!config.muted);
        assert!(!config.shuffle);
        assert_eq!(config.repeat, RepeatMode::Off);
        assert_eq!(config.restart_threshold_secs, 3.0);
        assert!(config.shuffle_seed.is_none());
    }

    #[test]
    fn repeat_cycles_through_all_modes() {
        assert_eq!(RepeatMode::Off.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::Off);
    }

    #[test]
    fn repeat_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RepeatMode::Off).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&RepeatMode::All).unwrap(), "\"all\"");
        let mode: RepeatMode = serde_json::from_str("\"one\"").unwrap();
        assert_eq!(mode, RepeatMode::One);
    }

    #[test]
    fn item_deserializes_without_optional_fields() {
        let json = r#"{"id":"s1","title":"Intro","artist":"Band","media_uri":"/uploads/s1.mp3"}"#;
        let item: PlayableItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "s1");
        assert!(item.artwork_uri.is_none());
        assert!(item.duration_hint.is_none());
    }

    #[test]
    fn format_clock_pads_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(7.9), "0:07");
        assert_eq!(format_clock(65.0), "1:05");
        assert_eq!(format_clock(3600.0), "60:00");
    }

    #[test]
    fn format_clock_handles_unknown() {
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(-1.0), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
    }

    #[test]
    fn ready_states() {
        assert!(!TransportState::Idle.is_ready());
        assert!(!TransportState::Loading.is_ready());
        assert!(TransportState::Paused.is_ready());
        assert!(TransportState::Playing.is_ready());
    }
}
