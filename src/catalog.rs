//! Static game content
//!
//! Everything here is compiled in. Profiles only reference catalog entries by
//! id, so edits to names, emoji or themes reach old saves on the next load.

use serde::Serialize;

use crate::profile::CharacterId;

/// Visual theme descriptor (renderer hints)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: &'static str,
    /// Background color/gradient class
    pub background_class: &'static str,
    /// Pattern overlay opacity class
    pub pattern_opacity: &'static str,
    /// CSS pattern for the overlay
    pub background_image: &'static str,
    /// Pattern tile size in pixels
    pub pattern_size: u32,
    pub text_color: &'static str,
    pub accent_color: &'static str,
    /// Floating bubble color
    pub bubble_color: &'static str,
}

pub static DEFAULT_THEME: Theme = Theme {
    id: "default",
    background_class: "bg-sky-300",
    pattern_opacity: "opacity-30",
    background_image: "radial-gradient(white 2px, transparent 2px), radial-gradient(white 1px, transparent 1px)",
    pattern_size: 60,
    text_color: "text-white",
    accent_color: "bg-white/20",
    bubble_color: "bg-white/40",
};

const ZIZI_THEME: Theme = Theme {
    id: "zizi",
    background_class: "bg-slate-900",
    pattern_opacity: "opacity-100",
    // Stars
    background_image: "radial-gradient(white 2px, transparent 2px), radial-gradient(rgba(255,255,255,0.5) 1px, transparent 1px)",
    pattern_size: 60,
    text_color: "text-sky-100",
    accent_color: "bg-indigo-500",
    bubble_color: "bg-indigo-400/30",
};

const KEDI_THEME: Theme = Theme {
    id: "kedi",
    background_class: "bg-green-300",
    pattern_opacity: "opacity-40",
    // Grass dots
    background_image: "radial-gradient(#15803d 3px, transparent 3px)",
    pattern_size: 60,
    text_color: "text-green-900",
    accent_color: "bg-green-500",
    bubble_color: "bg-green-100/40",
};

const BAYKUS_THEME: Theme = Theme {
    id: "baykus",
    background_class: "bg-amber-800",
    pattern_opacity: "opacity-20",
    // Wood grain
    background_image: "repeating-linear-gradient(45deg, #78350f 0, #78350f 1px, transparent 0, transparent 50%)",
    pattern_size: 20,
    text_color: "text-amber-100",
    accent_color: "bg-amber-600",
    bubble_color: "bg-amber-200/20",
};

const ROBOT_THEME: Theme = Theme {
    id: "robot",
    background_class: "bg-blue-100",
    pattern_opacity: "opacity-30",
    // Blueprint grid
    background_image: "linear-gradient(#3b82f6 1px, transparent 1px), linear-gradient(90deg, #3b82f6 1px, transparent 1px)",
    pattern_size: 40,
    text_color: "text-slate-800",
    accent_color: "bg-blue-500",
    bubble_color: "bg-blue-400/30",
};

/// Static character definition
#[derive(Debug, Clone, Copy)]
pub struct CharacterDef {
    pub id: CharacterId,
    pub name: &'static str,
    pub emoji: &'static str,
    pub theme: &'static Theme,
}

pub static CHARACTERS: [CharacterDef; 4] = [
    CharacterDef {
        id: CharacterId::Zizi,
        name: "Uzay Kaşifi Zizi",
        emoji: "🚀",
        theme: &ZIZI_THEME,
    },
    CharacterDef {
        id: CharacterId::Kedi,
        name: "Dedektif Kedi",
        emoji: "🐱",
        theme: &KEDI_THEME,
    },
    CharacterDef {
        id: CharacterId::Baykus,
        name: "Bilge Baykuş",
        emoji: "🦉",
        theme: &BAYKUS_THEME,
    },
    CharacterDef {
        id: CharacterId::Robot,
        name: "Boyacı Robot",
        emoji: "🤖",
        theme: &ROBOT_THEME,
    },
];

/// Look up a character definition
pub fn character(id: CharacterId) -> &'static CharacterDef {
    match id {
        CharacterId::Zizi => &CHARACTERS[0],
        CharacterId::Kedi => &CHARACTERS[1],
        CharacterId::Baykus => &CHARACTERS[2],
        CharacterId::Robot => &CHARACTERS[3],
    }
}

/// Stickers handed out as rewards
pub const REWARD_STICKERS: [&str; 12] = [
    "⭐", "🌈", "🍭", "💎", "🐾", "🎈", "🎵", "🌸", "🦄", "🍦", "🦋", "🌞",
];

/// Symbols the memory board draws its pairs from
pub const MEMORY_CARD_POOL: [&str; 10] = ["🐶", "🐱", "🐻", "🐰", "🌞", "⭐", "🍎", "🌸", "🎈", "🐾"];

/// Picture split across the tile-swap grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PuzzleImage {
    pub id: &'static str,
    pub emoji: &'static str,
    /// Tile background color class
    pub color: &'static str,
}

pub static PUZZLE_IMAGES: [PuzzleImage; 8] = [
    PuzzleImage { id: "cat", emoji: "🐱", color: "bg-orange-200" },
    PuzzleImage { id: "bear", emoji: "🐻", color: "bg-amber-200" },
    PuzzleImage { id: "tiger", emoji: "🐯", color: "bg-orange-300" },
    PuzzleImage { id: "panda", emoji: "🐼", color: "bg-emerald-200" },
    PuzzleImage { id: "lion", emoji: "🦁", color: "bg-yellow-200" },
    PuzzleImage { id: "pig", emoji: "🐷", color: "bg-pink-200" },
    PuzzleImage { id: "koala", emoji: "🐨", color: "bg-slate-300" },
    PuzzleImage { id: "sun", emoji: "🌞", color: "bg-sky-200" },
];

/// One legend entry: the symbol shown for a button value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Glyph {
    pub symbol: &'static str,
    pub value: u8,
}

/// A cipher level: story, answer and legend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CipherLevel {
    pub story: &'static str,
    pub sequence: [u8; 3],
    pub legend: [Glyph; 3],
}

impl CipherLevel {
    /// Symbol for a value, matched by value rather than legend position
    pub fn symbol_for(&self, value: u8) -> Option<&'static str> {
        self.legend
            .iter()
            .find(|g| g.value == value)
            .map(|g| g.symbol)
    }
}

const fn glyph(symbol: &'static str, value: u8) -> Glyph {
    Glyph { symbol, value }
}

pub static CIPHER_LEVELS: [CipherLevel; 5] = [
    CipherLevel {
        story: "Çiçekler açtı, arılar geldi!",
        sequence: [1, 2, 1],
        legend: [glyph("🌸", 1), glyph("🐝", 2), glyph("☀️", 3)],
    },
    CipherLevel {
        story: "Gece oldu, yıldızlar parladı.",
        sequence: [3, 2, 3],
        legend: [glyph("🌙", 1), glyph("☁️", 2), glyph("⭐", 3)],
    },
    CipherLevel {
        story: "Balıklar suda yüzüyor.",
        sequence: [1, 1, 2],
        legend: [glyph("🐟", 1), glyph("🦀", 2), glyph("🌊", 3)],
    },
    CipherLevel {
        story: "Kuşlar ağaca kondu.",
        sequence: [2, 1, 3],
        legend: [glyph("🌳", 1), glyph("🐦", 2), glyph("🍏", 3)],
    },
    CipherLevel {
        story: "Arabalar yolda gidiyor.",
        sequence: [3, 1, 2],
        legend: [glyph("🚗", 1), glyph("🚦", 2), glyph("⛽", 3)],
    },
];

/// Named color for the drawing canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteColor {
    pub name: &'static str,
    pub value: &'static str,
}

/// Drawing palette offered in the sticker room (white doubles as eraser)
pub static DRAWING_COLORS: [PaletteColor; 7] = [
    PaletteColor { name: "Siyah", value: "#000000" },
    PaletteColor { name: "Kırmızı", value: "#EF4444" },
    PaletteColor { name: "Mavi", value: "#3B82F6" },
    PaletteColor { name: "Yeşil", value: "#22C55E" },
    PaletteColor { name: "Sarı", value: "#EAB308" },
    PaletteColor { name: "Mor", value: "#A855F7" },
    PaletteColor { name: "Beyaz", value: "#FFFFFF" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_lookup_matches_table() {
        for def in &CHARACTERS {
            assert_eq!(character(def.id).id, def.id);
            assert_eq!(character(def.id).theme.id, def.id.as_str());
        }
    }

    #[test]
    fn test_cipher_levels_are_well_formed() {
        for level in &CIPHER_LEVELS {
            assert!(level.sequence.iter().all(|v| (1..=3).contains(v)));
            for value in 1..=3 {
                assert!(level.symbol_for(value).is_some(), "{} has no {}", level.story, value);
            }
        }
    }

    #[test]
    fn test_symbol_lookup_is_by_value() {
        let level = CipherLevel {
            story: "",
            sequence: [1, 2, 3],
            legend: [glyph("c", 3), glyph("a", 1), glyph("b", 2)],
        };
        assert_eq!(level.symbol_for(1), Some("a"));
        assert_eq!(level.symbol_for(3), Some("c"));
        assert_eq!(level.symbol_for(4), None);
    }

    #[test]
    fn test_memory_pool_has_enough_distinct_symbols() {
        let mut pool = MEMORY_CARD_POOL.to_vec();
        pool.sort_unstable();
        pool.dedup();
        assert_eq!(pool.len(), MEMORY_CARD_POOL.len());
        assert!(pool.len() >= 4);
    }
}
