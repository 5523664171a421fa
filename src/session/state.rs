//! Screen and reward-dialog state
//!
//! Everything here is plain data; transitions live in the orchestrator.

use serde::{Deserialize, Serialize};

use crate::games::GameKind;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    /// Title screen
    Intro,
    /// Hero picker (hover previews the hero's theme)
    CharacterSelect,
    /// Game picker for the current hero
    MainMenu,
    CipherGame,
    MemoryGame,
    #[serde(rename = "puzzle-game")]
    TileSwapGame,
    /// Drawing canvas and sticker collection
    StickerRoom,
}

impl Screen {
    /// Screens that only make sense with a current character
    pub fn needs_character(self) -> bool {
        !matches!(self, Screen::Intro | Screen::CharacterSelect)
    }

    /// Engine behind a game screen
    pub fn game_kind(self) -> Option<GameKind> {
        match self {
            Screen::CipherGame => Some(GameKind::Cipher),
            Screen::MemoryGame => Some(GameKind::Memory),
            Screen::TileSwapGame => Some(GameKind::TileSwap),
            _ => None,
        }
    }

    /// Game screen for an engine kind
    pub fn for_game(kind: GameKind) -> Self {
        match kind {
            GameKind::Cipher => Screen::CipherGame,
            GameKind::Memory => Screen::MemoryGame,
            GameKind::TileSwap => Screen::TileSwapGame,
        }
    }
}

/// Stage of a pending reward dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealStage {
    /// Gift box still closed
    Boxed,
    /// Sticker shown, waiting for the OK button
    Revealed,
}

/// The reward dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum RewardPresentation {
    #[default]
    Idle,
    Pending {
        token: &'static str,
        stage: RevealStage,
    },
}

impl RewardPresentation {
    pub fn is_pending(&self) -> bool {
        matches!(self, RewardPresentation::Pending { .. })
    }

    pub fn token(&self) -> Option<&'static str> {
        match self {
            RewardPresentation::Pending { token, .. } => Some(token),
            RewardPresentation::Idle => None,
        }
    }

    pub fn stage(&self) -> Option<RevealStage> {
        match self {
            RewardPresentation::Pending { stage, .. } => Some(*stage),
            RewardPresentation::Idle => None,
        }
    }
}

/// Where the main menu can lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Destination {
    Game(GameKind),
    StickerRoom,
}

impl Destination {
    pub fn screen(self) -> Screen {
        match self {
            Destination::Game(kind) => Screen::for_game(kind),
            Destination::StickerRoom => Screen::StickerRoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_wire_names() {
        let names: Vec<String> = [
            Screen::Intro,
            Screen::CharacterSelect,
            Screen::MainMenu,
            Screen::CipherGame,
            Screen::MemoryGame,
            Screen::TileSwapGame,
            Screen::StickerRoom,
        ]
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();
        assert_eq!(
            names,
            [
                "\"intro\"",
                "\"character-select\"",
                "\"main-menu\"",
                "\"cipher-game\"",
                "\"memory-game\"",
                "\"puzzle-game\"",
                "\"sticker-room\"",
            ]
        );
    }

    #[test]
    fn test_game_screens_round_trip_kinds() {
        for kind in [GameKind::Cipher, GameKind::Memory, GameKind::TileSwap] {
            let screen = Screen::for_game(kind);
            assert_eq!(screen.game_kind(), Some(kind));
            assert!(screen.needs_character());
        }
        assert_eq!(Screen::StickerRoom.game_kind(), None);
        assert!(!Screen::CharacterSelect.needs_character());
    }

    #[test]
    fn test_presentation_accessors() {
        let pending = RewardPresentation::Pending {
            token: "⭐",
            stage: RevealStage::Boxed,
        };
        assert!(pending.is_pending());
        assert_eq!(pending.token(), Some("⭐"));
        assert_eq!(RewardPresentation::Idle.stage(), None);
    }
}
