//! Save/load of the player snapshot
//!
//! Features:
//! - One JSON snapshot under a fixed key, written wholesale
//! - Catalog merge on every load (old saves pick up new names/themes)
//! - Per-entry repair: a broken profile never takes the others down
//! - Failures are logged and degrade to defaults, never surfaced

pub mod snapshot;

use std::collections::HashMap;

use crate::consts::STORAGE_KEY;
use crate::profile::{CharacterId, ProfileMap, default_profiles};
use crate::session::Screen;

/// Storage backend failure
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// String-keyed blob storage (LocalStorage, files, memory)
pub trait ProfileStorage {
    /// Read the blob under `key`; `Ok(None)` when nothing was saved yet
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the blob under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: ProfileStorage + ?Sized> ProfileStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// In-memory storage, for tests and hosts without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    /// Simulate a full/blocked store: every write fails
    pub fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with one blob
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl ProfileStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Everything that survives a restart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedState {
    pub characters: ProfileMap,
    pub current_character: Option<CharacterId>,
    pub current_screen: Screen,
}

impl Default for SavedState {
    fn default() -> Self {
        Self {
            characters: default_profiles(),
            current_character: None,
            current_screen: Screen::Intro,
        }
    }
}

/// Loads and saves the snapshot through a storage backend
pub struct ProfileStore {
    storage: Box<dyn ProfileStorage>,
}

impl ProfileStore {
    pub fn new(storage: Box<dyn ProfileStorage>) -> Self {
        Self { storage }
    }

    /// Load the snapshot, merged against the catalog. Missing or unreadable
    /// data yields defaults.
    pub fn load(&self) -> SavedState {
        match self.storage.read(STORAGE_KEY) {
            Ok(Some(json)) => match snapshot::decode(&json) {
                Ok(state) => {
                    log::info!(
                        "Loaded save (screen {:?}, character {:?})",
                        state.current_screen,
                        state.current_character
                    );
                    state
                }
                Err(e) => {
                    log::warn!("Save unreadable, starting fresh: {}", e);
                    SavedState::default()
                }
            },
            Ok(None) => {
                log::info!("No save found, starting fresh");
                SavedState::default()
            }
            Err(e) => {
                log::warn!("Save load failed, starting fresh: {}", e);
                SavedState::default()
            }
        }
    }

    /// Persist the full snapshot. Failures are logged and swallowed.
    pub fn save(&mut self, state: &SavedState) {
        let result = snapshot::encode(state)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.write(STORAGE_KEY, &json));
        if let Err(e) = result {
            log::warn!("Save failed: {}", e);
        }
    }

    /// Backend access (settings live next to the snapshot)
    pub fn storage(&self) -> &dyn ProfileStorage {
        self.storage.as_ref()
    }
}
