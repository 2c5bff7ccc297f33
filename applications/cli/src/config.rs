/// Player configuration
use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swyphex_playback::PlaybackConfig;

/// Config file picked up from the working directory when none is given
const DEFAULT_CONFIG_FILE: &str = "swyphex.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Initial engine settings; stored preferences take precedence
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Where volume/mute/shuffle/repeat are persisted; in-memory when unset
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,

    /// Wall-clock interval between simulated media ticks
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Virtual seconds elapsed per wall-clock second
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Duration reported for items without a duration hint
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: f64,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `swyphex.toml` in the working
    /// directory is used when present. `SWYPHEX_`-prefixed variables override
    /// both, with `__` separating nested keys (`SWYPHEX_PLAYBACK__VOLUME`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(PlayerError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SWYPHEX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| PlayerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 || self.tick_ms > 10_000 {
            return Err(PlayerError::Config(format!(
                "tick_ms must be between 1 and 10000, got {}",
                self.tick_ms
            )));
        }

        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(PlayerError::Config(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }

        if !self.default_duration_secs.is_finite() || self.default_duration_secs <= 0.0 {
            return Err(PlayerError::Config(format!(
                "default_duration_secs must be positive, got {}",
                self.default_duration_secs
            )));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(PlayerError::Config(format!(
                "playback.volume must be within 0..=1, got {}",
                self.playback.volume
            )));
        }

        if self.playback.restart_threshold_secs < 0.0 {
            return Err(PlayerError::Config(
                "playback.restart_threshold_secs cannot be negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Virtual seconds that pass on each tick
    pub fn tick_seconds(&self) -> f64 {
        self.tick_ms as f64 / 1000.0 * self.speed
    }
}

// Default values
fn default_tick_ms() -> u64 {
    250
}

fn default_speed() -> f64 {
    1.0
}

fn default_duration_secs() -> f64 {
    180.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            preferences_path: None,
            tick_ms: default_tick_ms(),
            speed: default_speed(),
            default_duration_secs: default_duration_secs(),
        }
    }
}
