//! Memory match
//!
//! Eight face-down cards, four symbol pairs. Two cards are turned at a time;
//! pairs stay open, mismatches close again after a short look.

use rand::seq::{IndexedRandom, SliceRandom};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::{GameKind, MiniGame, Outcome};
use crate::catalog::MEMORY_CARD_POOL;
use crate::consts::{MEMORY_MISMATCH_MS, MEMORY_RESET_MS, MEMORY_WIN_MS};
use crate::narration::NarrationPort;
use crate::timer::Timers;

/// Distinct symbols per board
pub const PAIRS: usize = 4;
/// Cards per board
pub const CARD_COUNT: usize = PAIRS * 2;

#[derive(Debug, Clone, Copy)]
enum MemoryTimer {
    /// Turn a mismatched pair face down again
    Hide(usize, usize),
    Win,
    NewBoard,
}

/// Memory board state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEngine {
    cards: Vec<&'static str>,
    flipped: Vec<bool>,
    matched: Vec<bool>,
    /// Indices turned in the current attempt (at most two)
    choices: Vec<usize>,
    #[serde(skip)]
    pool: &'static [&'static str],
    #[serde(skip)]
    rng: Pcg32,
    #[serde(skip)]
    timers: Timers<MemoryTimer>,
}

impl MemoryEngine {
    /// Deal a board from the built-in symbol pool
    pub fn new(rng: Pcg32, narrator: &mut dyn NarrationPort) -> Self {
        Self::with_pool(&MEMORY_CARD_POOL, rng, narrator)
    }

    /// Deal from `pool` (the built-in pool if it has fewer than four symbols)
    pub fn with_pool(
        pool: &'static [&'static str],
        rng: Pcg32,
        narrator: &mut dyn NarrationPort,
    ) -> Self {
        let pool: &'static [&'static str] = if pool.len() < PAIRS {
            log::warn!("Memory pool too small ({}), using built-in pool", pool.len());
            &MEMORY_CARD_POOL
        } else {
            pool
        };
        let mut engine = Self {
            cards: Vec::with_capacity(CARD_COUNT),
            flipped: vec![false; CARD_COUNT],
            matched: vec![false; CARD_COUNT],
            choices: Vec::with_capacity(2),
            pool,
            rng,
            timers: Timers::new(),
        };
        engine.deal(narrator);
        engine
    }

    pub fn cards(&self) -> &[&'static str] {
        &self.cards
    }

    pub fn is_flipped(&self, index: usize) -> bool {
        self.flipped.get(index).copied().unwrap_or(false)
    }

    pub fn is_matched(&self, index: usize) -> bool {
        self.matched.get(index).copied().unwrap_or(false)
    }

    pub fn choices(&self) -> &[usize] {
        &self.choices
    }

    pub fn all_matched(&self) -> bool {
        self.matched.iter().all(|m| *m)
    }

    /// Four distinct symbols, each twice, in random order
    fn deal(&mut self, narrator: &mut dyn NarrationPort) {
        let symbols: Vec<&'static str> = self
            .pool
            .choose_multiple(&mut self.rng, PAIRS)
            .copied()
            .collect();
        self.cards.clear();
        self.cards.extend_from_slice(&symbols);
        self.cards.extend_from_slice(&symbols);
        self.cards.shuffle(&mut self.rng);

        self.flipped.fill(false);
        self.matched.fill(false);
        self.choices.clear();
        narrator.speak("Kartları eşleştir!", false);
    }

    /// Turn card `index`. Returns whether the click was taken.
    pub fn flip(&mut self, index: usize, narrator: &mut dyn NarrationPort) -> bool {
        if index >= self.cards.len()
            || self.matched[index]
            || self.flipped[index]
            || self.choices.len() >= 2
        {
            return false;
        }

        self.flipped[index] = true;
        self.choices.push(index);

        if let [first, second] = self.choices[..] {
            if self.cards[first] == self.cards[second] {
                narrator.speak("Aferin!", false);
                self.matched[first] = true;
                self.matched[second] = true;
                self.choices.clear();

                if self.all_matched() {
                    self.timers.schedule(MEMORY_WIN_MS, MemoryTimer::Win);
                }
            } else {
                narrator.speak("Hımm, değil.", false);
                self.timers
                    .schedule(MEMORY_MISMATCH_MS, MemoryTimer::Hide(first, second));
            }
        }
        true
    }
}

impl MiniGame for MemoryEngine {
    fn kind(&self) -> GameKind {
        GameKind::Memory
    }

    fn advance(&mut self, dt_ms: u64, narrator: &mut dyn NarrationPort) -> Outcome {
        let mut outcome = Outcome::Continue;
        let until = self.timers.horizon(dt_ms);
        while let Some(timer) = self.timers.pop_due(until) {
            match timer {
                MemoryTimer::Hide(first, second) => {
                    self.flipped[first] = false;
                    self.flipped[second] = false;
                    self.choices.clear();
                }
                MemoryTimer::Win => {
                    narrator.speak("Tebrikler! Hepsini buldun!", false);
                    self.timers.schedule(MEMORY_RESET_MS, MemoryTimer::NewBoard);
                    outcome = Outcome::Won {
                        late_ms: until - self.timers.now(),
                    };
                }
                MemoryTimer::NewBoard => self.deal(narrator),
            }
        }
        self.timers.settle(until);
        outcome
    }

    fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
