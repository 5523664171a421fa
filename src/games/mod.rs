//! Mini-game engines
//!
//! Each engine owns its puzzle, a seeded RNG and its own timers. It reports
//! `Outcome::Won` exactly once per solved puzzle and then resets itself on a
//! timer, whether or not anyone is still looking at the reward dialog.
//! Dropping an engine drops its timers.

pub mod cipher;
pub mod memory;
pub mod tile_swap;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::narration::NarrationPort;

pub use cipher::CipherEngine;
pub use memory::MemoryEngine;
pub use tile_swap::TileSwapEngine;

/// The three mini-games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    Cipher,
    Memory,
    TileSwap,
}

/// Result of feeding an engine input or time
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input not accepted; nothing changed
    Ignored,
    Continue,
    /// `late_ms` is how long before the end of the frame the win fired
    Won { late_ms: u64 },
}

impl Outcome {
    pub fn is_won(self) -> bool {
        matches!(self, Outcome::Won { .. })
    }
}

/// Behaviour shared by every engine
pub trait MiniGame {
    fn kind(&self) -> GameKind;

    /// Let `dt_ms` of time pass, firing due timers
    fn advance(&mut self, dt_ms: u64, narrator: &mut dyn NarrationPort) -> Outcome;

    /// Timers still pending (celebrations, flips, resets)
    fn pending_timers(&self) -> usize;
}

/// The engine behind the current game screen
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ActiveGame {
    Cipher(CipherEngine),
    Memory(MemoryEngine),
    TileSwap(TileSwapEngine),
}

impl ActiveGame {
    /// Start a fresh puzzle of `kind`
    pub fn start(kind: GameKind, rng: Pcg32, narrator: &mut dyn NarrationPort) -> Self {
        match kind {
            GameKind::Cipher => ActiveGame::Cipher(CipherEngine::new(rng, narrator)),
            GameKind::Memory => ActiveGame::Memory(MemoryEngine::new(rng, narrator)),
            GameKind::TileSwap => ActiveGame::TileSwap(TileSwapEngine::new(rng, narrator)),
        }
    }

    fn engine_mut(&mut self) -> &mut dyn MiniGame {
        match self {
            ActiveGame::Cipher(g) => g,
            ActiveGame::Memory(g) => g,
            ActiveGame::TileSwap(g) => g,
        }
    }

    fn engine(&self) -> &dyn MiniGame {
        match self {
            ActiveGame::Cipher(g) => g,
            ActiveGame::Memory(g) => g,
            ActiveGame::TileSwap(g) => g,
        }
    }
}

impl MiniGame for ActiveGame {
    fn kind(&self) -> GameKind {
        self.engine().kind()
    }

    fn advance(&mut self, dt_ms: u64, narrator: &mut dyn NarrationPort) -> Outcome {
        self.engine_mut().advance(dt_ms, narrator)
    }

    fn pending_timers(&self) -> usize {
        self.engine().pending_timers()
    }
}
