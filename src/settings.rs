//! Narration preferences
//!
//! Persisted separately from the player snapshot, in the same storage.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::persistence::ProfileStorage;

/// Narration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Speak prompts and feedback at all
    pub narration: bool,
    /// Speech rate (1.0 = normal; a bit slower suits young listeners)
    pub speech_rate: f32,
    /// Speech pitch (1.0 = normal)
    pub speech_pitch: f32,
    /// BCP 47 language tag for the voice
    pub locale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            narration: true,
            speech_rate: 0.9,
            speech_pitch: 1.1,
            locale: "tr-TR".to_string(),
        }
    }
}

impl Settings {
    /// Rate clamped to what speech engines accept
    pub fn effective_rate(&self) -> f32 {
        self.speech_rate.clamp(0.1, 10.0)
    }

    /// Pitch clamped to what speech engines accept
    pub fn effective_pitch(&self) -> f32 {
        self.speech_pitch.clamp(0.0, 2.0)
    }

    /// Load settings, falling back to defaults
    pub fn load(storage: &dyn ProfileStorage) -> Self {
        match storage.read(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Settings unreadable: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Settings load failed: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings; failures are logged
    pub fn save(&self, storage: &mut dyn ProfileStorage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.write(SETTINGS_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings save failed: {}", e),
            },
            Err(e) => log::warn!("Settings not serializable: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_save_and_reload() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            narration: false,
            speech_rate: 1.2,
            ..Settings::default()
        };
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let storage = MemoryStorage::with_entry(SETTINGS_KEY, r#"{"narration": false}"#);
        let settings = Settings::load(&storage);
        assert!(!settings.narration);
        assert_eq!(settings.locale, "tr-TR");
    }

    #[test]
    fn test_clamps_extreme_values() {
        let settings = Settings {
            speech_rate: 50.0,
            speech_pitch: -1.0,
            ..Settings::default()
        };
        assert_eq!(settings.effective_rate(), 10.0);
        assert_eq!(settings.effective_pitch(), 0.0);
    }
}
