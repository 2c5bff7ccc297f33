//! Simulated media element
//!
//! Stands in for a real media element: loads resolve on the next tick,
//! playback advances a virtual clock, and reaching the duration reports
//! `ended`. URIs starting with `broken:` load but fail on the next tick the
//! way an unreachable stream does.

use std::collections::HashMap;
use swyphex_playback::{
    AdapterEvent, Generation, MediaAdapter, PlayableItem, PlaybackError, Result,
};

/// URI prefix that makes a load fail
pub const BROKEN_PREFIX: &str = "broken:";

#[derive(Debug, Clone)]
struct LoadedMedia {
    uri: String,
    generation: Generation,
    duration: f64,
    position: f64,
    playing: bool,
    metadata_sent: bool,
}

/// Media adapter backed by a virtual clock
#[derive(Debug, Default)]
pub struct SimulatedMedia {
    durations: HashMap<String, f64>,
    default_duration: f64,
    loaded: Option<LoadedMedia>,
    level: f32,

    /// Callbacks raised by calls, delivered on the next tick
    outbox: Vec<AdapterEvent>,
}

impl SimulatedMedia {
    pub fn new(default_duration: f64) -> Self {
        Self {
            default_duration,
            level: 1.0,
            ..Default::default()
        }
    }

    /// Adapter whose media durations come from the items' duration hints
    pub fn for_items(items: &[PlayableItem], default_duration: f64) -> Self {
        let mut media = Self::new(default_duration);
        for item in items {
            if let Some(duration) = item.duration_hint {
                media.durations.insert(item.media_uri.clone(), duration);
            }
        }
        media
    }

    /// Advance the virtual clock by `seconds` and collect due callbacks
    pub fn tick(&mut self, seconds: f64) -> Vec<AdapterEvent> {
        let mut events = std::mem::take(&mut self.outbox);

        let Some(media) = self.loaded.as_mut() else {
            return events;
        };

        if !media.metadata_sent {
            if media.uri.starts_with(BROKEN_PREFIX) {
                events.push(AdapterEvent::error(
                    media.generation,
                    format!("cannot reach {}", media.uri),
                ));
                self.loaded = None;
                return events;
            }

            media.metadata_sent = true;
            events.push(AdapterEvent::metadata_loaded(media.generation, media.duration));
            return events;
        }

        if media.playing {
            media.position = (media.position + seconds).min(media.duration);
            events.push(AdapterEvent::time_progressed(media.generation, media.position));

            if media.position >= media.duration {
                media.playing = false;
                events.push(AdapterEvent::ended(media.generation));
            }
        }

        events
    }

    /// Current output level as last set by the controller
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_playing(&self) -> bool {
        self.loaded.as_ref().is_some_and(|m| m.playing)
    }

    pub fn position(&self) -> Option<f64> {
        self.loaded.as_ref().map(|m| m.position)
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedMedia> {
        self.loaded
            .as_mut()
            .ok_or_else(|| PlaybackError::Media("no media loaded".to_string()))
    }
}

impl MediaAdapter for SimulatedMedia {
    fn load(&mut self, uri: &str, generation: Generation) -> Result<()> {
        if uri.is_empty() {
            return Err(PlaybackError::Media("empty media URI".to_string()));
        }

        let duration = self
            .durations
            .get(uri)
            .copied()
            .unwrap_or(self.default_duration);

        tracing::debug!("Simulated load of {} ({:.1}s) as {}", uri, duration, generation);
        self.outbox.clear();
        self.loaded = Some(LoadedMedia {
            uri: uri.to_string(),
            generation,
            duration,
            position: 0.0,
            playing: false,
            metadata_sent: false,
        });
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let media = self.loaded_mut()?;
        if !media.metadata_sent {
            return Err(PlaybackError::Media("media not ready".to_string()));
        }

        // Replaying a finished item starts over
        if media.position >= media.duration {
            media.position = 0.0;
        }
        media.playing = true;
        let started = AdapterEvent::playback_started(media.generation);
        self.outbox.push(started);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if let Some(media) = self.loaded.as_mut() {
            media.playing = false;
        }
        Ok(())
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        let media = self.loaded_mut()?;
        media.position = seconds.clamp(0.0, media.duration);
        Ok(())
    }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        self.level = level;
        Ok(())
    }
}
