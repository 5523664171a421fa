//! Snapshot wire format
//!
//! `{ characters: {id: profile}, currentCharacterId, currentScreen }` with
//! camelCase keys. Profiles carry their theme descriptor for readers of the
//! raw save; it is ignored on load and re-derived from the catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SavedState;
use crate::catalog::Theme;
use crate::consts::STARTING_LEVEL;
use crate::gallery::Gallery;
use crate::profile::{CharacterId, Profile, default_profiles};
use crate::session::Screen;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotOut<'a> {
    characters: BTreeMap<CharacterId, ProfileRecord<'a>>,
    current_character_id: Option<CharacterId>,
    current_screen: Screen,
}

#[derive(Serialize)]
struct ProfileRecord<'a> {
    #[serde(flatten)]
    profile: &'a Profile,
    theme: &'static Theme,
}

/// Loosely typed top level: each part is validated on its own
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct SnapshotIn {
    characters: Option<Map<String, Value>>,
    current_character_id: Option<Value>,
    current_screen: Option<Value>,
}

/// Progress fields of a stored profile; catalog fields are not read back
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProfile {
    #[serde(default = "starting_level")]
    level: u32,
    #[serde(default)]
    unlocked_stickers: Vec<String>,
    #[serde(default)]
    drawings: Vec<String>,
}

fn starting_level() -> u32 {
    STARTING_LEVEL
}

impl StoredProfile {
    fn into_profile(self, id: CharacterId) -> Profile {
        Profile {
            level: self.level,
            unlocked_rewards: self.unlocked_stickers.into_iter().collect(),
            saved_images: Gallery::from_stored(self.drawings),
            ..Profile::new(id)
        }
    }
}

/// Serialize the full snapshot
pub fn encode(state: &SavedState) -> Result<String, serde_json::Error> {
    let out = SnapshotOut {
        characters: state
            .characters
            .iter()
            .map(|(id, profile)| {
                (
                    *id,
                    ProfileRecord {
                        profile,
                        theme: profile.theme(),
                    },
                )
            })
            .collect(),
        current_character_id: state.current_character,
        current_screen: state.current_screen,
    };
    serde_json::to_string(&out)
}

/// Parse a snapshot and merge it with the catalog.
///
/// Only a blob that is not a JSON object is an error; everything inside is
/// repaired: unknown ids dropped, missing ids defaulted, broken entries reset.
pub fn decode(json: &str) -> Result<SavedState, serde_json::Error> {
    let stored: SnapshotIn = serde_json::from_str(json)?;

    let mut characters = default_profiles();
    for (key, value) in stored.characters.unwrap_or_default() {
        let id = match key.parse::<CharacterId>() {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Dropping saved profile: {}", e);
                continue;
            }
        };
        match serde_json::from_value::<StoredProfile>(value) {
            Ok(profile) => {
                characters.insert(id, profile.into_profile(id));
            }
            Err(e) => log::warn!("Saved profile '{}' unreadable, reset: {}", id, e),
        }
    }

    let current_character = stored
        .current_character_id
        .filter(|v| !v.is_null())
        .and_then(|v| match serde_json::from_value::<CharacterId>(v) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Ignoring saved character: {}", e);
                None
            }
        });

    let mut current_screen = stored
        .current_screen
        .and_then(|v| serde_json::from_value::<Screen>(v).ok())
        .unwrap_or(Screen::Intro);
    if current_screen.needs_character() && current_character.is_none() {
        current_screen = Screen::CharacterSelect;
    }

    Ok(SavedState {
        characters,
        current_character,
        current_screen,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::character;

    #[test]
    fn test_missing_id_gets_default_profile() {
        let json = r#"{
            "characters": {
                "zizi": {"id": "zizi", "name": "Uzay Kaşifi Zizi", "emoji": "🚀",
                         "level": 4, "unlockedStickers": ["⭐"], "drawings": []}
            },
            "currentCharacterId": "zizi",
            "currentScreen": "main-menu"
        }"#;
        let state = decode(json).unwrap();
        assert_eq!(state.characters.len(), CharacterId::ALL.len());
        assert_eq!(state.characters[&CharacterId::Zizi].level, 4);
        let robot = &state.characters[&CharacterId::Robot];
        assert_eq!(robot.level, 1);
        assert!(robot.unlocked_rewards.is_empty());
        assert_eq!(state.current_screen, Screen::MainMenu);
    }

    #[test]
    fn test_stale_catalog_fields_are_replaced() {
        let json = r#"{
            "characters": {
                "kedi": {"id": "kedi", "name": "Kedi", "emoji": "😺", "level": 9,
                         "unlockedStickers": ["🌈", "🍭"], "drawings": ["d1"],
                         "theme": {"id": "kedi-old", "backgroundClass": "bg-red-500"}}
            },
            "currentCharacterId": null,
            "currentScreen": "intro"
        }"#;
        let state = decode(json).unwrap();
        let kedi = &state.characters[&CharacterId::Kedi];
        assert_eq!(kedi.name, character(CharacterId::Kedi).name);
        assert_eq!(kedi.emoji, "🐱");
        assert_eq!(kedi.theme().id, "kedi");
        assert_eq!(kedi.level, 9);
        assert_eq!(kedi.unlocked_rewards.len(), 2);
        assert_eq!(kedi.saved_images.latest(), Some("d1"));
    }

    #[test]
    fn test_unknown_ids_dropped_and_broken_entries_reset() {
        let json = r#"{
            "characters": {
                "ejderha": {"level": 3},
                "baykus": {"level": "lots"},
                "robot": {"level": 5}
            }
        }"#;
        let state = decode(json).unwrap();
        assert_eq!(state.characters.len(), CharacterId::ALL.len());
        assert_eq!(state.characters[&CharacterId::Baykus], Profile::new(CharacterId::Baykus));
        assert_eq!(state.characters[&CharacterId::Robot].level, 5);
        assert_eq!(state.current_screen, Screen::Intro);
    }

    #[test]
    fn test_character_screen_without_character_falls_back() {
        let json = r#"{"currentCharacterId": "nobody", "currentScreen": "puzzle-game"}"#;
        let state = decode(json).unwrap();
        assert_eq!(state.current_character, None);
        assert_eq!(state.current_screen, Screen::CharacterSelect);
    }

    #[test]
    fn test_encoded_snapshot_uses_wire_names() {
        let mut state = SavedState::default();
        state.current_character = Some(CharacterId::Baykus);
        state.current_screen = Screen::TileSwapGame;
        let json: Value = serde_json::from_str(&encode(&state).unwrap()).unwrap();
        assert_eq!(json["currentScreen"], "puzzle-game");
        assert_eq!(json["currentCharacterId"], "baykus");
        assert_eq!(json["characters"]["baykus"]["theme"]["id"], "baykus");
        assert!(json["characters"]["zizi"]["unlockedStickers"].is_array());
        assert_eq!(decode(&encode(&state).unwrap()).unwrap(), state);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(decode("[1, 2, 3]").is_err());
    }
}
