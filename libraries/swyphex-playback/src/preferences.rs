//! Persisted player preferences
//!
//! Only volume, mute, shuffle and repeat survive a restart. They are read
//! once when the controller is built and written on every change.

use crate::error::{PlaybackError, Result};
use crate::types::{PlaybackConfig, RepeatMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Flat preference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub volume: f32,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

impl Preferences {
    /// Preferences implied by a config, used when nothing is stored yet
    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self {
            volume: config.volume,
            muted: config.muted,
            shuffle: config.shuffle,
            repeat: config.repeat,
        }
    }
}

/// Storage for [`Preferences`]
pub trait PreferenceStore {
    /// Read stored preferences; `Ok(None)` when nothing was saved yet
    fn load(&self) -> Result<Option<Preferences>>;

    /// Replace stored preferences
    fn save(&mut self, preferences: &Preferences) -> Result<()>;
}

/// Preferences kept as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn load(&self) -> Result<Option<Preferences>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let preferences = serde_json::from_str(&contents).map_err(|e| {
            PlaybackError::Preferences(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(Some(preferences))
    }

    fn save(&mut self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(preferences)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-process store for tests and sessions without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    stored: Option<Preferences>,
    writes: usize,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `preferences`
    pub fn with(preferences: Preferences) -> Self {
        Self {
            stored: Some(preferences),
            writes: 0,
        }
    }

    pub fn stored(&self) -> Option<&Preferences> {
        self.stored.as_ref()
    }

    /// Number of saves since creation
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<Preferences>> {
        Ok(self.stored.clone())
    }

    fn save(&mut self, preferences: &Preferences) -> Result<()> {
        self.stored = Some(preferences.clone());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Preferences {
        Preferences {
            volume: 0.4,
            muted: true,
            shuffle: true,
            repeat: RepeatMode::One,
        }
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryPreferenceStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn file_store_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferenceStore::new(dir.path().join("prefs.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/player/prefs.json");
        let mut store = JsonFilePreferenceStore::new(&path);

        store.save(&sample()).unwrap();
        assert!(path.exists());
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn file_store_uses_flat_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = JsonFilePreferenceStore::new(&path);
        store.save(&sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["repeat"], "one");
        assert_eq!(raw["muted"], true);
        assert_eq!(raw["shuffle"], true);
    }

    #[test]
    fn file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFilePreferenceStore::new(&path);
        assert!(matches!(store.load(), Err(PlaybackError::Preferences(_))));
    }

    #[test]
    fn from_config_copies_modes() {
        let config = PlaybackConfig {
            volume: 0.3,
            repeat: RepeatMode::All,
            ..Default::default()
        };
        let prefs = Preferences::from_config(&config);
        assert_eq!(prefs.volume, 0.3);
        assert_eq!(prefs.repeat, RepeatMode::All);
        assert!(!prefs.shuffle);
    }
}
