//! Theme resolution
//!
//! Derived on every call from the screen and the two character slots;
//! nothing is cached.

use super::state::Screen;
use crate::catalog::{DEFAULT_THEME, Theme};
use crate::profile::CharacterId;

/// Theme for the given screen and character slots
pub fn resolve_theme(
    screen: Screen,
    current: Option<CharacterId>,
    preview: Option<CharacterId>,
) -> &'static Theme {
    match (screen, preview, current) {
        (Screen::CharacterSelect, Some(id), _) => id.def().theme,
        (s, _, Some(id)) if s.needs_character() => id.def().theme,
        _ => &DEFAULT_THEME,
    }
}
