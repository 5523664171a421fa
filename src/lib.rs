//! Cipher Heroes - a children's puzzle game shell
//!
//! Core modules:
//! - `catalog`: Static characters, themes, rewards and puzzle content
//! - `profile`: Per-character progress and the catalog merge
//! - `persistence`: Snapshot load/save over a key/value storage boundary
//! - `reward`: Sticker allocation
//! - `games`: Cipher, memory and tile-swap engines
//! - `session`: Screen flow, win handling and the reward dialog
//! - `timer`: Deterministic delayed events
//! - `narration`: Spoken feedback port
//! - `settings`: Narration preferences
//! - `autoplay`: Demo player
//! - `platform`: Native/browser storage backends

pub mod autoplay;
pub mod catalog;
pub mod gallery;
pub mod games;
pub mod narration;
pub mod persistence;
pub mod platform;
pub mod profile;
pub mod reward;
pub mod session;
pub mod settings;
pub mod timer;

pub use narration::{LogNarrator, NarrationLog, NarrationPort};
pub use persistence::{MemoryStorage, ProfileStorage, ProfileStore, SavedState, StorageError};
pub use profile::{CharacterId, Profile, ProfileMap};
pub use session::{Destination, DrawingSink, Input, RewardPresentation, RevealStage, Screen, Session, SessionView};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Snapshot key in the profile storage
    pub const STORAGE_KEY: &str = "sesli_sifre_v1";
    /// Settings key, stored next to the snapshot
    pub const SETTINGS_KEY: &str = "sesli_sifre_settings";

    /// Level every character starts at
    pub const STARTING_LEVEL: u32 = 1;
    /// Saved drawings kept per character
    pub const MAX_SAVED_IMAGES: usize = 10;

    /// Gift box stays closed this long before the sticker is shown
    pub const REWARD_REVEAL_MS: u64 = 2000;

    /// Solved cipher stays on screen this long before a new level
    pub const CIPHER_RESET_MS: u64 = 3000;

    /// Mismatched memory cards stay face up this long
    pub const MEMORY_MISMATCH_MS: u64 = 900;
    /// Delay between the last match and the win
    pub const MEMORY_WIN_MS: u64 = 1000;
    /// Delay between the win and a fresh board
    pub const MEMORY_RESET_MS: u64 = 1000;

    /// Confetti time between a solved puzzle and the win
    pub const TILE_WIN_MS: u64 = 3000;
    /// Delay between the win and a fresh shuffle
    pub const TILE_RESET_MS: u64 = 1000;

    /// Upper bound for retry-until-different sampling loops
    pub const MAX_REDRAWS: u32 = 64;
}
