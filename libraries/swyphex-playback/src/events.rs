//! Playback events
//!
//! Observable notifications for the UI. The controller queues them as state
//! changes and the UI drains them, typically once per frame or after
//! forwarding an adapter callback.

use crate::types::{RepeatMode, TransportState};
use serde::{Deserialize, Serialize};

/// Events emitted by the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new state
        state: TransportState,
    },

    /// Current item changed (load issued for it)
    TrackChanged {
        /// ID of the new current item
        track_id: String,
        /// ID of the item it replaced (if any)
        previous_track_id: Option<String>,
    },

    /// Duration reported by the adapter
    DurationKnown {
        duration_seconds: f64,
    },

    /// Position update mirrored from the adapter
    PositionUpdate {
        position_seconds: f64,
        duration_seconds: Option<f64>,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Queue replaced or cleared
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Shuffle or repeat changed
    ModesChanged {
        shuffle: bool,
        repeat: RepeatMode,
    },

    /// Reached the end of the queue; playback stopped on the last item
    QueueExhausted {
        /// ID of the item left current
        track_id: String,
    },

    /// Media resource failed; the controller skipped past it
    MediaError {
        /// ID of the failed item
        track_id: String,
        /// Adapter-provided reason
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_variant_tag() {
        let event = PlaybackEvent::QueueExhausted {
            track_id: "c".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"QueueExhausted":{"track_id":"c"}}"#);
    }
}
