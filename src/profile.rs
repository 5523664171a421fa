//! Per-character progress
//!
//! The character set is fixed by the catalog. A profile owns its progress
//! (level, stickers, drawings); name, emoji and theme always come from the
//! catalog.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, CharacterDef, Theme};
use crate::consts::STARTING_LEVEL;
use crate::gallery::Gallery;

/// Playable character ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterId {
    Zizi,
    Kedi,
    Baykus,
    Robot,
}

impl CharacterId {
    /// All ids, in catalog order
    pub const ALL: [CharacterId; 4] = [
        CharacterId::Zizi,
        CharacterId::Kedi,
        CharacterId::Baykus,
        CharacterId::Robot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterId::Zizi => "zizi",
            CharacterId::Kedi => "kedi",
            CharacterId::Baykus => "baykus",
            CharacterId::Robot => "robot",
        }
    }

    /// Catalog entry for this id
    pub fn def(&self) -> &'static CharacterDef {
        catalog::character(*self)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown character id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown character id: {0}")]
pub struct UnknownCharacter(pub String);

impl FromStr for CharacterId {
    type Err = UnknownCharacter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharacterId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownCharacter(s.to_string()))
    }
}

/// One character's progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: CharacterId,
    pub name: String,
    pub emoji: String,
    /// Starts at 1, +1 per win
    pub level: u32,
    /// Stickers collected so far
    #[serde(rename = "unlockedStickers")]
    pub unlocked_rewards: BTreeSet<String>,
    /// Drawings from the sticker room
    #[serde(rename = "drawings")]
    pub saved_images: Gallery,
}

impl Profile {
    /// Fresh profile from the catalog
    pub fn new(id: CharacterId) -> Self {
        let def = id.def();
        Self {
            id,
            name: def.name.to_string(),
            emoji: def.emoji.to_string(),
            level: STARTING_LEVEL,
            unlocked_rewards: BTreeSet::new(),
            saved_images: Gallery::new(),
        }
    }

    /// Theme, looked up from the catalog on every call
    pub fn theme(&self) -> &'static Theme {
        self.id.def().theme
    }

    /// Record a win: one level up and the sticker added (no-op if owned)
    pub fn record_win(&mut self, sticker: Option<&str>) {
        self.level += 1;
        if let Some(sticker) = sticker {
            self.unlocked_rewards.insert(sticker.to_string());
        }
    }
}

/// Profiles keyed by character id; always holds every catalog id
pub type ProfileMap = BTreeMap<CharacterId, Profile>;

/// Default map: every catalog character at the starting level
pub fn default_profiles() -> ProfileMap {
    CharacterId::ALL
        .into_iter()
        .map(|id| (id, Profile::new(id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_id() {
        for id in CharacterId::ALL {
            assert_eq!(id.as_str().parse::<CharacterId>(), Ok(id));
        }
        assert!("ejderha".parse::<CharacterId>().is_err());
    }

    #[test]
    fn test_default_profiles_cover_catalog() {
        let profiles = default_profiles();
        assert_eq!(profiles.len(), catalog::CHARACTERS.len());
        for def in &catalog::CHARACTERS {
            let profile = &profiles[&def.id];
            assert_eq!(profile.level, STARTING_LEVEL);
            assert!(profile.unlocked_rewards.is_empty());
            assert_eq!(profile.name, def.name);
            assert_eq!(profile.theme(), def.theme);
        }
    }

    #[test]
    fn test_record_win_repeat_sticker_is_set_noop() {
        let mut profile = Profile::new(CharacterId::Kedi);
        profile.record_win(Some("⭐"));
        profile.record_win(Some("⭐"));
        assert_eq!(profile.level, 3);
        assert_eq!(profile.unlocked_rewards.len(), 1);
    }
}
