//! Sequence cipher
//!
//! A short story shows three symbols; the legend maps each symbol to a button
//! value 1-3 and the player types the values in order. One wrong value wipes
//! the attempt.

use rand::Rng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::{GameKind, MiniGame, Outcome};
use crate::catalog::{CIPHER_LEVELS, CipherLevel};
use crate::consts::{CIPHER_RESET_MS, MAX_REDRAWS};
use crate::narration::NarrationPort;
use crate::timer::Timers;

const RETRY: &str = "Hayır, bu değil. Tekrar dene.";
const SOLVED: &str = "Harika! Şifre çözüldü!";
const ENCOURAGEMENTS: [&str; 3] = ["Süper", "Devam et", "Aferin"];

#[derive(Debug, Clone, Copy)]
enum CipherTimer {
    NextLevel,
}

/// Sequence-cipher puzzle state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CipherEngine {
    level_index: usize,
    level: &'static CipherLevel,
    user_sequence: Vec<u8>,
    /// Solved and waiting for the next level; input is ignored meanwhile
    solved: bool,
    #[serde(skip)]
    levels: &'static [CipherLevel],
    #[serde(skip)]
    rng: Pcg32,
    #[serde(skip)]
    timers: Timers<CipherTimer>,
}

impl CipherEngine {
    /// Start on a random level from the built-in catalog
    pub fn new(rng: Pcg32, narrator: &mut dyn NarrationPort) -> Self {
        Self::with_levels(&CIPHER_LEVELS, rng, narrator)
    }

    /// Start on a random level from `levels` (the built-in catalog if empty)
    pub fn with_levels(
        levels: &'static [CipherLevel],
        mut rng: Pcg32,
        narrator: &mut dyn NarrationPort,
    ) -> Self {
        let levels: &'static [CipherLevel] = if levels.is_empty() {
            log::warn!("Empty cipher level list, using built-in levels");
            &CIPHER_LEVELS
        } else {
            levels
        };
        let level_index = rng.random_range(0..levels.len());
        let engine = Self {
            level_index,
            level: &levels[level_index],
            user_sequence: Vec::with_capacity(3),
            solved: false,
            levels,
            rng,
            timers: Timers::new(),
        };
        engine.announce(narrator);
        engine
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level(&self) -> &'static CipherLevel {
        self.level
    }

    /// Values entered so far
    pub fn user_sequence(&self) -> &[u8] {
        &self.user_sequence
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// The target rendered through the legend
    pub fn target_symbols(&self) -> Vec<&'static str> {
        self.level
            .sequence
            .iter()
            .filter_map(|v| self.level.symbol_for(*v))
            .collect()
    }

    /// Press button `value` (1-3)
    pub fn input(&mut self, value: u8, narrator: &mut dyn NarrationPort) -> Outcome {
        if self.solved {
            log::debug!("Cipher solved, ignoring input {}", value);
            return Outcome::Ignored;
        }
        if !(1..=3).contains(&value) {
            log::debug!("Cipher input {} out of range", value);
            return Outcome::Ignored;
        }

        self.user_sequence.push(value);
        let pos = self.user_sequence.len() - 1;
        let target = &self.level.sequence;

        if target.get(pos) != Some(&value) {
            narrator.speak(RETRY, false);
            self.user_sequence.clear();
            return Outcome::Continue;
        }

        if self.user_sequence.len() == target.len() {
            self.solved = true;
            narrator.speak(SOLVED, false);
            self.timers.schedule(CIPHER_RESET_MS, CipherTimer::NextLevel);
            return Outcome::Won { late_ms: 0 };
        }

        let cheer = ENCOURAGEMENTS.choose(&mut self.rng).copied().unwrap_or("Aferin");
        narrator.speak(cheer, false);
        Outcome::Continue
    }

    fn announce(&self, narrator: &mut dyn NarrationPort) {
        narrator.speak(&format!("{} Şifreyi çöz!", self.level.story), false);
    }

    /// Random level, redrawn while it repeats the current one
    fn draw_next_level(&mut self) -> usize {
        let count = self.levels.len();
        let mut next = self.rng.random_range(0..count);
        let mut redraws = 0;
        while count > 1 && next == self.level_index && redraws < MAX_REDRAWS {
            next = self.rng.random_range(0..count);
            redraws += 1;
        }
        next
    }

    fn next_level(&mut self, narrator: &mut dyn NarrationPort) {
        self.level_index = self.draw_next_level();
        self.level = &self.levels[self.level_index];
        self.user_sequence.clear();
        self.solved = false;
        self.announce(narrator);
    }
}

impl MiniGame for CipherEngine {
    fn kind(&self) -> GameKind {
        GameKind::Cipher
    }

    fn advance(&mut self, dt_ms: u64, narrator: &mut dyn NarrationPort) -> Outcome {
        let until = self.timers.horizon(dt_ms);
        while let Some(timer) = self.timers.pop_due(until) {
            match timer {
                CipherTimer::NextLevel => self.next_level(narrator),
            }
        }
        self.timers.settle(until);
        Outcome::Continue
    }

    fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Glyph;
    use crate::narration::NarrationLog;
    use proptest::prelude::*;
    use rand::SeedableRng;

    static SINGLE_LEVEL: [CipherLevel; 1] = [CipherLevel {
        story: "Tek bölüm.",
        sequence: [2, 2, 1],
        legend: [
            Glyph { symbol: "🍎", value: 1 },
            Glyph { symbol: "🍐", value: 2 },
            Glyph { symbol: "🍇", value: 3 },
        ],
    }];

    fn engine(seed: u64) -> (CipherEngine, NarrationLog) {
        let mut log = NarrationLog::new();
        let engine = CipherEngine::new(Pcg32::seed_from_u64(seed), &mut log);
        (engine, log)
    }

    fn solve(engine: &mut CipherEngine, log: &mut NarrationLog) -> Vec<Outcome> {
        let target = engine.level().sequence;
        target.iter().map(|v| engine.input(*v, log)).collect()
    }

    #[test]
    fn test_announces_story_on_start() {
        let (engine, log) = engine(3);
        assert!(log.heard(engine.level().story));
        assert!(log.heard("Şifreyi çöz!"));
    }

    #[test]
    fn test_correct_sequence_wins_once() {
        let (mut engine, mut log) = engine(11);
        let outcomes = solve(&mut engine, &mut log);
        assert_eq!(
            outcomes,
            [Outcome::Continue, Outcome::Continue, Outcome::Won { late_ms: 0 }]
        );
        assert!(engine.is_solved());
        assert_eq!(log.last().as_deref(), Some(SOLVED));

        // Further presses before the reset never win again
        let first = engine.level().sequence[0];
        assert_eq!(engine.input(first, &mut log), Outcome::Ignored);
        assert_eq!(engine.user_sequence().len(), 3);
    }

    #[test]
    fn test_reset_after_delay_picks_another_level() {
        let (mut engine, mut log) = engine(5);
        let before = engine.level_index();
        let _ = solve(&mut engine, &mut log);

        assert_eq!(engine.advance(CIPHER_RESET_MS - 1, &mut log), Outcome::Continue);
        assert!(engine.is_solved());

        assert_eq!(engine.advance(1, &mut log), Outcome::Continue);
        assert!(!engine.is_solved());
        assert!(engine.user_sequence().is_empty());
        assert_ne!(engine.level_index(), before);
        assert_eq!(engine.pending_timers(), 0);
    }

    #[test]
    fn test_single_level_catalog_repeats_itself() {
        let mut log = NarrationLog::new();
        let mut engine = CipherEngine::with_levels(&SINGLE_LEVEL, Pcg32::seed_from_u64(1), &mut log);
        let _ = solve(&mut engine, &mut log);
        let _ = engine.advance(CIPHER_RESET_MS, &mut log);
        assert_eq!(engine.level_index(), 0);
        assert!(!engine.is_solved());
    }

    #[test]
    fn test_out_of_range_input_is_ignored() {
        let (mut engine, mut log) = engine(2);
        assert_eq!(engine.input(0, &mut log), Outcome::Ignored);
        assert_eq!(engine.input(4, &mut log), Outcome::Ignored);
        assert!(engine.user_sequence().is_empty());
    }

    #[test]
    fn test_target_symbols_follow_legend() {
        let (engine, _) = engine(9);
        let symbols = engine.target_symbols();
        assert_eq!(symbols.len(), 3);
        for (symbol, value) in symbols.iter().zip(engine.level().sequence) {
            assert_eq!(engine.level().symbol_for(value), Some(*symbol));
        }
    }

    proptest! {
        #[test]
        fn prop_any_wrong_digit_clears_progress(seed: u64, pos in 0usize..3, offset in 1u8..3) {
            let (mut engine, mut log) = engine(seed);
            let target = engine.level().sequence;
            for v in &target[..pos] {
                prop_assert_eq!(engine.input(*v, &mut log), Outcome::Continue);
            }
            let wrong = (target[pos] - 1 + offset) % 3 + 1;
            prop_assert_eq!(engine.input(wrong, &mut log), Outcome::Continue);
            prop_assert!(engine.user_sequence().is_empty());
            let last = log.last();
            prop_assert_eq!(last.as_deref(), Some(RETRY));
        }

        #[test]
        fn prop_every_level_is_solvable_exactly_once(seed: u64) {
            let (mut engine, mut log) = engine(seed);
            let wins = solve(&mut engine, &mut log).into_iter().filter(|o| o.is_won()).count();
            prop_assert_eq!(wins, 1);
        }
    }
}
