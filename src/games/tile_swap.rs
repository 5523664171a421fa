//! Tile-swap picture puzzle
//!
//! A 3x3 picture cut into nine numbered pieces and shuffled. Tap one piece,
//! then another, and the two trade places.

use glam::UVec2;
use rand::seq::{IndexedRandom, SliceRandom};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::{GameKind, MiniGame, Outcome};
use crate::catalog::{PUZZLE_IMAGES, PuzzleImage};
use crate::consts::{MAX_REDRAWS, TILE_RESET_MS, TILE_WIN_MS};
use crate::narration::NarrationPort;
use crate::timer::Timers;

/// Grid side length
pub const GRID: usize = 3;
/// Pieces on the board
pub const PIECES: usize = GRID * GRID;

const SOLVED: [u8; PIECES] = [0, 1, 2, 3, 4, 5, 6, 7, 8];

#[derive(Debug, Clone, Copy)]
enum TileTimer {
    Win,
    Reshuffle,
}

/// Where one piece sits and which slice of the picture it shows, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceLayout {
    pub piece: u8,
    /// Grid cell the piece currently occupies
    pub cell: UVec2,
    /// Picture cell drawn on the piece
    pub content_offset: UVec2,
    pub selected: bool,
}

fn cell_of(index: usize) -> UVec2 {
    UVec2::new((index % GRID) as u32, (index / GRID) as u32)
}

/// Tile-swap puzzle state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSwapEngine {
    /// `tiles[position] = piece`
    tiles: [u8; PIECES],
    selected: Option<usize>,
    image: &'static PuzzleImage,
    celebrating: bool,
    #[serde(skip)]
    rng: Pcg32,
    #[serde(skip)]
    timers: Timers<TileTimer>,
}

impl TileSwapEngine {
    pub fn new(rng: Pcg32, narrator: &mut dyn NarrationPort) -> Self {
        let mut engine = Self {
            tiles: SOLVED,
            selected: None,
            image: &PUZZLE_IMAGES[0],
            celebrating: false,
            rng,
            timers: Timers::new(),
        };
        engine.reshuffle(narrator);
        engine
    }

    pub fn tiles(&self) -> &[u8; PIECES] {
        &self.tiles
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn image(&self) -> &'static PuzzleImage {
        self.image
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn is_solved(&self) -> bool {
        self.tiles == SOLVED
    }

    /// Board position currently holding `piece`
    pub fn position_of(&self, piece: u8) -> Option<usize> {
        self.tiles.iter().position(|t| *t == piece)
    }

    /// Layout of `piece`, or `None` for a piece not on the board
    pub fn piece_layout(&self, piece: u8) -> Option<PieceLayout> {
        let position = self.position_of(piece)?;
        Some(PieceLayout {
            piece,
            cell: cell_of(position),
            content_offset: cell_of(piece as usize),
            selected: self.selected == Some(position),
        })
    }

    /// Layout of every piece, in piece order
    pub fn layout(&self) -> Vec<PieceLayout> {
        (0..PIECES as u8)
            .filter_map(|piece| self.piece_layout(piece))
            .collect()
    }

    fn reshuffle(&mut self, narrator: &mut dyn NarrationPort) {
        self.tiles = SOLVED;
        let mut attempts = 0;
        while self.tiles == SOLVED && attempts < MAX_REDRAWS {
            self.tiles.shuffle(&mut self.rng);
            attempts += 1;
        }
        if self.tiles == SOLVED {
            self.tiles.swap(0, 1);
        }
        self.image = PUZZLE_IMAGES.choose(&mut self.rng).unwrap_or(&PUZZLE_IMAGES[0]);
        self.selected = None;
        self.celebrating = false;
        narrator.speak(
            "Parçaları karıştırıyorum. Numaralara bakarak düzeltebilir misin?",
            false,
        );
    }

    /// Tap board position `index`. Returns whether the tap was taken.
    pub fn tap(&mut self, index: usize, narrator: &mut dyn NarrationPort) -> bool {
        if self.celebrating || index >= PIECES {
            return false;
        }

        let Some(first) = self.selected else {
            self.selected = Some(index);
            narrator.speak("Şimdi değiştireceğin parçaya bas.", false);
            return true;
        };

        self.tiles.swap(first, index);
        self.selected = None;

        if self.is_solved() {
            self.celebrating = true;
            narrator.speak("Harika! Yapbozu tamamladın!", false);
            self.timers.schedule(TILE_WIN_MS, TileTimer::Win);
        }
        true
    }
}

impl MiniGame for TileSwapEngine {
    fn kind(&self) -> GameKind {
        GameKind::TileSwap
    }

    fn advance(&mut self, dt_ms: u64, narrator: &mut dyn NarrationPort) -> Outcome {
        let mut outcome = Outcome::Continue;
        let until = self.timers.horizon(dt_ms);
        while let Some(timer) = self.timers.pop_due(until) {
            match timer {
                TileTimer::Win => {
                    outcome = Outcome::Won {
                        late_ms: until - self.timers.now(),
                    };
                    self.timers.schedule(TILE_RESET_MS, TileTimer::Reshuffle);
                }
                TileTimer::Reshuffle => self.reshuffle(narrator),
            }
        }
        self.timers.settle(until);
        outcome
    }

    fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::NarrationLog;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn engine(seed: u64) -> (TileSwapEngine, NarrationLog) {
        let mut log = NarrationLog::new();
        let engine = TileSwapEngine::new(Pcg32::seed_from_u64(seed), &mut log);
        (engine, log)
    }

    /// Selection sort by swaps; returns the number of swaps made
    fn solve(engine: &mut TileSwapEngine, log: &mut NarrationLog) -> usize {
        let mut swaps = 0;
        for target in 0..PIECES {
            let Some(at) = engine.position_of(target as u8) else {
                continue;
            };
            if at != target {
                assert!(engine.tap(target, log));
                assert!(engine.tap(at, log));
                swaps += 1;
            }
        }
        swaps
    }

    #[test]
    fn test_select_then_swap() {
        let (mut engine, mut log) = engine(1);
        let before = *engine.tiles();
        assert!(engine.tap(2, &mut log));
        assert_eq!(engine.selected(), Some(2));
        assert_eq!(log.last().as_deref(), Some("Şimdi değiştireceğin parçaya bas."));

        assert!(engine.tap(5, &mut log));
        assert_eq!(engine.selected(), None);
        assert_eq!(engine.tiles()[2], before[5]);
        assert_eq!(engine.tiles()[5], before[2]);
    }

    #[test]
    fn test_tapping_same_piece_twice_deselects() {
        let (mut engine, mut log) = engine(2);
        let before = *engine.tiles();
        assert!(engine.tap(4, &mut log));
        assert!(engine.tap(4, &mut log));
        assert_eq!(engine.selected(), None);
        assert_eq!(*engine.tiles(), before);
    }

    #[test]
    fn test_out_of_range_tap_is_ignored() {
        let (mut engine, mut log) = engine(3);
        assert!(!engine.tap(PIECES, &mut log));
        assert_eq!(engine.selected(), None);
    }

    #[test]
    fn test_win_after_celebration_then_reshuffle() {
        let (mut engine, mut log) = engine(4);
        solve(&mut engine, &mut log);
        assert!(engine.is_solved());
        assert!(engine.is_celebrating());
        assert!(log.heard("Yapbozu tamamladın"));
        assert!(!engine.tap(0, &mut log));

        assert_eq!(engine.advance(TILE_WIN_MS - 1, &mut log), Outcome::Continue);
        assert_eq!(engine.advance(1, &mut log), Outcome::Won { late_ms: 0 });
        assert!(engine.is_celebrating());

        assert_eq!(engine.advance(TILE_RESET_MS, &mut log), Outcome::Continue);
        assert!(!engine.is_celebrating());
        assert!(!engine.is_solved());
        assert_eq!(engine.advance(60_000, &mut log), Outcome::Continue);
    }

    #[test]
    fn test_layout_separates_position_and_content() {
        let (engine, _) = engine(6);
        let piece = engine.tiles()[0];
        let layout = engine.piece_layout(piece).unwrap();
        assert_eq!(layout.cell, UVec2::ZERO);
        assert_eq!(
            layout.content_offset,
            UVec2::new(piece as u32 % 3, piece as u32 / 3)
        );
        assert_eq!(engine.layout().len(), PIECES);
        assert!(engine.piece_layout(9).is_none());
    }

    proptest! {
        #[test]
        fn prop_fresh_board_is_never_solved(seed: u64) {
            let (engine, log) = engine(seed);
            prop_assert!(!engine.is_solved());
            let mut sorted = *engine.tiles();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, SOLVED);
            prop_assert!(log.heard("Parçaları karıştırıyorum"));
        }

        #[test]
        fn prop_solving_wins_exactly_once(seed: u64) {
            let (mut engine, mut log) = engine(seed);
            prop_assert!(solve(&mut engine, &mut log) > 0);
            let wins = (0..10)
                .map(|_| engine.advance(1000, &mut log))
                .filter(|o| o.is_won())
                .count();
            prop_assert_eq!(wins, 1);
        }
    }
}
