//! Transport controller - core orchestration
//!
//! Reconciles user intent (play/pause, seek, volume) with the media adapter's
//! asynchronous lifecycle, and turns adapter callbacks into queue steps.
//!
//! ```text
//!   Idle ──load──▶ Loading ──metadata──▶ Paused ◀──pause── Playing
//!                     ▲                    │ play            ▲
//!                     │                    └───────ack───────┘
//!                     └──── ended / error / skip (new generation)
//! ```
//!
//! Every load is tagged with a fresh [`Generation`]; callbacks carrying any
//! other generation belong to a superseded load and are dropped.

use crate::{
    adapter::{AdapterEvent, Generation, MediaAdapter, MediaEvent},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    preferences::{MemoryPreferenceStore, PreferenceStore, Preferences},
    queue::{Queue, QueueMove},
    types::{PlayableItem, PlaybackConfig, PlaybackState, RepeatMode, TransportState},
    volume::Volume,
};

/// Playback state machine driving a [`MediaAdapter`]
///
/// Single owner, single thread: the UI holds the controller, forwards adapter
/// callbacks into [`TransportController::handle_event`], and drains
/// [`PlaybackEvent`]s for display.
pub struct TransportController<A: MediaAdapter> {
    adapter: A,

    // Queue and intent
    queue: Queue,
    volume: Volume,
    intent_playing: bool,

    // Mirrored from the adapter
    state: TransportState,
    position: f64,
    duration: Option<f64>,

    /// Seek requested before metadata arrived
    pending_seek: Option<f64>,

    generation: Generation,

    /// Media errors since playback last started (or an item loaded while paused)
    consecutive_failures: usize,

    restart_threshold: f64,
    preferences: Box<dyn PreferenceStore>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<A: MediaAdapter> TransportController<A> {
    /// Create a controller without persistent preferences
    pub fn new(adapter: A, config: PlaybackConfig) -> Self {
        Self::with_preferences(adapter, config, Box::new(MemoryPreferenceStore::new()))
    }

    /// Create a controller, restoring preferences from `store`
    ///
    /// The store is read exactly once here. A store that fails to load is
    /// logged and the config values are used instead.
    pub fn with_preferences(
        adapter: A,
        config: PlaybackConfig,
        store: Box<dyn PreferenceStore>,
    ) -> Self {
        let preferences = match store.load() {
            Ok(Some(stored)) => {
                tracing::debug!("Restored player preferences: {:?}", stored);
                stored
            }
            Ok(None) => Preferences::from_config(&config),
            Err(e) => {
                tracing::warn!("Failed to load player preferences, using defaults: {}", e);
                Preferences::from_config(&config)
            }
        };

        let mut queue = Queue::new(config.shuffle_seed);
        queue.set_shuffle(preferences.shuffle);
        queue.set_repeat_mode(preferences.repeat);

        Self {
            adapter,
            queue,
            volume: Volume::new(preferences.volume, preferences.muted),
            intent_playing: false,
            state: TransportState::Idle,
            position: 0.0,
            duration: None,
            pending_seek: None,
            generation: Generation::INITIAL,
            consecutive_failures: 0,
            restart_threshold: config.restart_threshold_secs.max(0.0),
            preferences: store,
            pending_events: Vec::new(),
        }
    }

    // ===== Queue =====

    /// Replace the queue and load its start item
    ///
    /// Play intent is kept: replacing the queue while playing keeps playing.
    pub fn set_queue(&mut self, items: Vec<PlayableItem>, start_index: Option<usize>) -> Result<()> {
        let previous_id = self.current_id();
        self.queue.set_queue(items, start_index)?;

        tracing::info!(
            "Queue replaced: {} items, starting at {:?}",
            self.queue.len(),
            self.queue.current_index()
        );
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });

        if self.queue.is_empty() {
            self.go_idle();
        } else {
            self.load_current(previous_id);
        }
        Ok(())
    }

    /// Replace the queue and start playing from `start_index`
    pub fn play_queue(&mut self, items: Vec<PlayableItem>, start_index: Option<usize>) -> Result<()> {
        if items.is_empty() {
            return Err(PlaybackError::InvalidArgument(
                "cannot play an empty queue".to_string(),
            ));
        }
        self.intent_playing = true;
        self.set_queue(items, start_index)
    }

    /// Drop the queue and return to `Idle`
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.emit(PlaybackEvent::QueueChanged { length: 0 });
        self.go_idle();
    }

    /// Step forward as on natural end (repeat-one restarts the item)
    pub fn advance(&mut self) -> Result<()> {
        let previous_id = self.current_id();
        let step = self.queue.advance()?;
        self.apply_move(step, previous_id);
        Ok(())
    }

    /// Step backward, mirror of [`TransportController::advance`]
    pub fn retreat(&mut self) -> Result<()> {
        let previous_id = self.current_id();
        let step = self.queue.retreat()?;
        self.apply_move(step, previous_id);
        Ok(())
    }

    /// Skip forward button; moves on even under repeat-one
    pub fn next(&mut self) -> Result<()> {
        let previous_id = self.current_id();
        let step = self.queue.skip_forward()?;
        self.apply_move(step, previous_id);
        Ok(())
    }

    /// Skip backward button
    ///
    /// Past the restart threshold this restarts the current item instead of
    /// moving back.
    pub fn previous(&mut self) -> Result<()> {
        if self.state == TransportState::Idle {
            return Err(PlaybackError::NoCurrentItem);
        }

        if self.state.is_ready() && self.position > self.restart_threshold {
            self.restart_current();
            return Ok(());
        }

        let previous_id = self.current_id();
        let step = self.queue.skip_backward()?;
        self.apply_move(step, previous_id);
        Ok(())
    }

    /// Make queue entry `index` current and load it
    pub fn select(&mut self, index: usize) -> Result<()> {
        let previous_id = self.current_id();
        self.queue.select(index)?;
        self.load_current(previous_id);
        Ok(())
    }

    /// Flip shuffle, returning the new value
    pub fn toggle_shuffle(&mut self) -> bool {
        let enabled = self.queue.toggle_shuffle();
        tracing::debug!("Shuffle {}", if enabled { "on" } else { "off" });
        self.modes_changed();
        enabled
    }

    /// Set repeat mode; takes effect at the next end of item
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        if self.queue.repeat_mode() == mode {
            return;
        }
        self.queue.set_repeat_mode(mode);
        tracing::debug!("Repeat mode {:?}", mode);
        self.modes_changed();
    }

    /// Advance the repeat button: Off → All → One → Off
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        let mode = self.queue.repeat_mode().cycle();
        self.set_repeat_mode(mode);
        mode
    }

    // ===== Transport =====

    /// Start or resume playback
    ///
    /// While loading the request is remembered and issued once metadata
    /// arrives. Returns `NoCurrentItem` (and does nothing) when idle.
    pub fn play(&mut self) -> Result<()> {
        if self.state == TransportState::Idle {
            tracing::debug!("Play requested with no current item");
            return Err(PlaybackError::NoCurrentItem);
        }

        self.intent_playing = true;
        if self.state == TransportState::Paused {
            self.issue_play();
        }
        Ok(())
    }

    /// Pause playback. Idempotent.
    pub fn pause(&mut self) {
        self.intent_playing = false;

        if self.state.is_ready() {
            if let Err(e) = self.adapter.pause() {
                tracing::warn!("Adapter refused pause: {}", e);
            }
            self.set_state(TransportState::Paused);
        }
    }

    /// Single play/pause button
    pub fn toggle_play(&mut self) -> Result<()> {
        if self.intent_playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Seek to `target_seconds`, clamped to the item bounds
    ///
    /// Before metadata is known the target is buffered and applied on load.
    pub fn seek(&mut self, target_seconds: f64) -> Result<()> {
        if self.state == TransportState::Idle {
            return Err(PlaybackError::NoCurrentItem);
        }

        let target = if target_seconds.is_nan() {
            0.0
        } else {
            target_seconds.max(0.0)
        };

        if self.state == TransportState::Loading {
            tracing::debug!("Buffering seek to {:.2}s until metadata loads", target);
            self.pending_seek = Some(target);
            return Ok(());
        }

        let clamped = self.clamp_to_duration(target);
        self.adapter.seek(clamped)?;
        self.position = clamped;
        self.emit_position();
        Ok(())
    }

    /// Seek to a fraction of the duration (progress bar click)
    ///
    /// Ignored while the duration is unknown.
    pub fn seek_fraction(&mut self, fraction: f32) -> Result<()> {
        if self.state == TransportState::Idle {
            return Err(PlaybackError::NoCurrentItem);
        }

        let Some(duration) = self.duration else {
            tracing::debug!("Ignoring fractional seek before duration is known");
            return Ok(());
        };

        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.seek(duration * f64::from(fraction))
    }

    // ===== Volume =====

    /// Set volume in `[0, 1]`; zero mutes and non-zero unmutes
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.volume_changed();
    }

    /// Toggle mute, returning the new value
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.volume.toggle_mute();
        self.volume_changed();
        muted
    }

    // ===== Adapter events =====

    /// Feed one adapter callback into the state machine
    ///
    /// Callbacks from superseded loads are dropped without any state change.
    pub fn handle_event(&mut self, event: AdapterEvent) {
        if event.generation != self.generation || self.state == TransportState::Idle {
            tracing::debug!(
                "Dropping stale adapter event {:?} ({}, current {})",
                event.event,
                event.generation,
                self.generation
            );
            return;
        }

        match event.event {
            MediaEvent::MetadataLoaded { duration_seconds } => {
                self.on_metadata_loaded(duration_seconds);
            }
            MediaEvent::TimeProgressed { position_seconds } => {
                if position_seconds.is_finite() {
                    self.position = position_seconds.max(0.0);
                    self.emit_position();
                }
            }
            MediaEvent::PlaybackStarted => self.on_playback_started(),
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::Error { reason } => self.fail_current(&reason),
        }
    }

    fn on_metadata_loaded(&mut self, duration_seconds: f64) {
        self.duration = (duration_seconds.is_finite() && duration_seconds >= 0.0)
            .then_some(duration_seconds);

        if let Some(duration) = self.duration {
            self.emit(PlaybackEvent::DurationKnown {
                duration_seconds: duration,
            });
        }

        if self.state != TransportState::Loading {
            return;
        }
        self.set_state(TransportState::Paused);

        if let Some(target) = self.pending_seek.take() {
            let clamped = self.clamp_to_duration(target);
            match self.adapter.seek(clamped) {
                Ok(()) => {
                    self.position = clamped;
                    self.emit_position();
                }
                Err(e) => tracing::warn!("Buffered seek failed: {}", e),
            }
        }

        // A refused play still counts against the failure guard
        if self.intent_playing {
            self.issue_play();
        } else {
            self.consecutive_failures = 0;
        }
    }

    fn on_playback_started(&mut self) {
        if !self.intent_playing {
            // Paused while the play request was in flight
            if let Err(e) = self.adapter.pause() {
                tracing::warn!("Adapter refused pause: {}", e);
            }
            return;
        }
        self.consecutive_failures = 0;
        self.set_state(TransportState::Playing);
    }

    fn on_ended(&mut self) {
        if self.queue.repeat_mode() == RepeatMode::One {
            tracing::debug!("Repeating current item");
            self.set_state(TransportState::Paused);
            self.restart_current();
            return;
        }

        let previous_id = self.current_id();
        match self.queue.advance() {
            Ok(step) => self.apply_move(step, previous_id),
            Err(e) => {
                tracing::warn!("Cannot advance after end of item: {}", e);
                self.go_idle();
            }
        }
    }

    /// Treat a media failure as end of item, never retrying the same item
    fn fail_current(&mut self, reason: &str) {
        let Some(failed) = self.queue.current_index() else {
            return;
        };
        let track_id = self.current_id().unwrap_or_default();

        tracing::warn!("Media error on {}: {}", track_id, reason);
        self.emit(PlaybackEvent::MediaError {
            track_id: track_id.clone(),
            reason: reason.to_string(),
        });

        self.consecutive_failures += 1;
        if self.consecutive_failures >= self.queue.len() {
            tracing::warn!("Every queued item failed, stopping playback");
            self.stop_on_current();
            return;
        }

        match self.queue.skip_forward() {
            Ok(QueueMove::Moved(index)) if index != failed => self.load_current(Some(track_id)),
            Ok(_) => self.stop_on_current(),
            Err(e) => {
                tracing::warn!("Cannot skip failed item: {}", e);
                self.go_idle();
            }
        }
    }

    // ===== Internal transitions =====

    fn apply_move(&mut self, step: QueueMove, previous_id: Option<String>) {
        match step {
            QueueMove::Moved(_) => self.load_current(previous_id),
            QueueMove::Unchanged(_) => self.restart_current(),
            QueueMove::Exhausted(_) => self.stop_on_current(),
        }
    }

    /// Hand the current queue item to the adapter under a new generation
    ///
    /// Play intent is left alone, so a switch while playing keeps playing
    /// and a switch while paused only loads.
    fn load_current(&mut self, previous_id: Option<String>) {
        let Some(item) = self.queue.current().cloned() else {
            self.go_idle();
            return;
        };

        self.generation = self.generation.next();
        self.position = 0.0;
        self.duration = None;
        self.pending_seek = None;
        self.set_state(TransportState::Loading);

        tracing::debug!("Loading {} ({}) as {}", item.id, item.media_uri, self.generation);
        self.emit(PlaybackEvent::TrackChanged {
            track_id: item.id.clone(),
            previous_track_id: previous_id,
        });
        self.emit_position();

        if let Err(e) = self.adapter.load(&item.media_uri, self.generation) {
            self.fail_current(&e.to_string());
            return;
        }
        self.apply_volume();
    }

    /// Replay the current item from zero
    fn restart_current(&mut self) {
        self.position = 0.0;

        if self.state.is_ready() {
            if let Err(e) = self.adapter.seek(0.0) {
                tracing::warn!("Restart seek failed: {}", e);
            }
            if self.intent_playing {
                self.issue_play();
            }
        } else if self.state == TransportState::Loading {
            self.pending_seek = Some(0.0);
        }
        self.emit_position();
    }

    /// End of queue: stop on the current item without clearing it
    ///
    /// A load still in flight stays `Loading`; its metadata moves it to
    /// `Paused` without playing.
    fn stop_on_current(&mut self) {
        self.intent_playing = false;
        match self.state {
            TransportState::Playing => {
                if let Err(e) = self.adapter.pause() {
                    tracing::warn!("Adapter refused pause: {}", e);
                }
                self.set_state(TransportState::Paused);
            }
            TransportState::Idle | TransportState::Loading | TransportState::Paused => {}
        }

        let track_id = self.current_id().unwrap_or_default();
        tracing::info!("Queue exhausted on {}", track_id);
        self.emit(PlaybackEvent::QueueExhausted { track_id });
    }

    fn go_idle(&mut self) {
        if self.state.is_ready() {
            if let Err(e) = self.adapter.pause() {
                tracing::warn!("Adapter refused pause: {}", e);
            }
        }

        // Anything still in flight for the released resource is now stale
        self.generation = self.generation.next();
        self.intent_playing = false;
        self.position = 0.0;
        self.duration = None;
        self.pending_seek = None;
        self.consecutive_failures = 0;
        self.set_state(TransportState::Idle);
    }

    fn issue_play(&mut self) {
        if let Err(e) = self.adapter.play() {
            self.fail_current(&e.to_string());
        }
    }

    fn apply_volume(&mut self) {
        if self.state == TransportState::Idle {
            return;
        }
        if let Err(e) = self.adapter.set_volume(self.volume.effective()) {
            tracing::warn!("Adapter refused volume change: {}", e);
        }
    }

    fn volume_changed(&mut self) {
        self.apply_volume();
        self.persist();
        self.emit(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn modes_changed(&mut self) {
        self.persist();
        self.emit(PlaybackEvent::ModesChanged {
            shuffle: self.queue.is_shuffled(),
            repeat: self.queue.repeat_mode(),
        });
    }

    /// Write-through of the persisted preference fields
    fn persist(&mut self) {
        let preferences = Preferences {
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            shuffle: self.queue.is_shuffled(),
            repeat: self.queue.repeat_mode(),
        };
        if let Err(e) = self.preferences.save(&preferences) {
            tracing::warn!("Failed to save player preferences: {}", e);
        }
    }

    fn set_state(&mut self, state: TransportState) {
        if self.state != state {
            self.state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn clamp_to_duration(&self, target: f64) -> f64 {
        match self.duration {
            Some(duration) => target.min(duration),
            None => target,
        }
    }

    fn current_id(&self) -> Option<String> {
        self.queue.current().map(|item| item.id.clone())
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_position(&mut self) {
        self.emit(PlaybackEvent::PositionUpdate {
            position_seconds: self.position,
            duration_seconds: self.duration,
        });
    }

    // ===== State Queries =====

    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Play intent (not whether audio is currently audible)
    pub fn is_playing(&self) -> bool {
        self.intent_playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Duration of the current item; `None` until metadata loads
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn is_shuffled(&self) -> bool {
        self.queue.is_shuffled()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.queue.repeat_mode()
    }

    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.queue.current()
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Generation of the active load
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Snapshot for display
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            current_item: self.queue.current().cloned(),
            state: self.state,
            is_playing: self.intent_playing,
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            position_seconds: self.position,
            duration_seconds: self.duration,
            shuffle: self.queue.is_shuffled(),
            repeat: self.queue.repeat_mode(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}
