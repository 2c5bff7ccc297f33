//! Shared helpers for playback integration tests

#![allow(dead_code)]

use swyphex_playback::{
    AdapterEvent, Generation, MediaAdapter, PlayableItem, PlaybackConfig, PlaybackError, Result,
    TransportController,
};

/// Calls the controller issued to the adapter
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterCall {
    Load(String, Generation),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
}

/// Adapter that records calls and can refuse selected URIs or every play
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    pub calls: Vec<AdapterCall>,
    pub broken_uris: Vec<String>,
    pub refuse_play: bool,
}

impl RecordingAdapter {
    pub fn plays(&self) -> usize {
        self.calls.iter().filter(|c| **c == AdapterCall::Play).count()
    }

    pub fn loads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                AdapterCall::Load(uri, _) => Some(uri.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn seeks(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, AdapterCall::Seek(_)))
            .count()
    }

    pub fn last(&self) -> Option<&AdapterCall> {
        self.calls.last()
    }
}

impl MediaAdapter for RecordingAdapter {
    fn load(&mut self, uri: &str, generation: Generation) -> Result<()> {
        self.calls.push(AdapterCall::Load(uri.to_string(), generation));
        if self.broken_uris.iter().any(|b| b == uri) {
            return Err(PlaybackError::Media(format!("unreachable: {}", uri)));
        }
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push(AdapterCall::Play);
        if self.refuse_play {
            return Err(PlaybackError::Media("autoplay blocked".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.calls.push(AdapterCall::Pause);
        Ok(())
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        self.calls.push(AdapterCall::Seek(seconds));
        Ok(())
    }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        self.calls.push(AdapterCall::SetVolume(level));
        Ok(())
    }
}

pub fn create_item(id: &str) -> PlayableItem {
    PlayableItem::new(id, format!("Song {}", id), "Test Artist", format!("/uploads/{}.mp3", id))
        .with_duration_hint(180.0)
}

pub fn create_items(ids: &[&str]) -> Vec<PlayableItem> {
    ids.iter().map(|id| create_item(id)).collect()
}

pub fn controller() -> TransportController<RecordingAdapter> {
    TransportController::new(
        RecordingAdapter::default(),
        PlaybackConfig {
            shuffle_seed: Some(1234),
            ..Default::default()
        },
    )
}

/// Report metadata and acknowledge playback for the current load
pub fn start_playing(ctl: &mut TransportController<RecordingAdapter>, duration: f64) {
    let generation = ctl.generation();
    ctl.handle_event(AdapterEvent::metadata_loaded(generation, duration));
    ctl.handle_event(AdapterEvent::playback_started(generation));
}

/// Fire `ended` for the current load
pub fn finish_current(ctl: &mut TransportController<RecordingAdapter>) {
    let generation = ctl.generation();
    ctl.handle_event(AdapterEvent::ended(generation));
}
