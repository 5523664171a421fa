//! Demo player
//!
//! Reads the session view and picks the next input, the way a patient child
//! would: pick a hero, visit every game in turn, solve it, collect the
//! sticker, doodle once in the sticker room, repeat.

use crate::games::{ActiveGame, CipherEngine, GameKind, MemoryEngine, TileSwapEngine};
use crate::profile::CharacterId;
use crate::session::{Destination, Input, RevealStage, Screen, Session};

/// Main-menu stops, visited in order
const ROUTE: [Destination; 4] = [
    Destination::Game(GameKind::Cipher),
    Destination::Game(GameKind::Memory),
    Destination::Game(GameKind::TileSwap),
    Destination::StickerRoom,
];

/// Scripted player state
#[derive(Debug, Clone)]
pub struct Autoplay {
    hero: CharacterId,
    next_stop: usize,
    /// Hero level when the current game was entered
    entry_level: Option<u32>,
    drew: bool,
}

impl Autoplay {
    pub fn new(hero: CharacterId) -> Self {
        Self {
            hero,
            next_stop: 0,
            entry_level: None,
            drew: false,
        }
    }

    /// Next input for `session`, or `None` to wait for timers
    pub fn next_input(&mut self, session: &Session) -> Option<Input> {
        match session.reward().stage() {
            Some(RevealStage::Boxed) => return Some(Input::RevealReward),
            Some(RevealStage::Revealed) => return Some(Input::DismissReward),
            None => {}
        }

        let level = session.current_profile().map(|p| p.level);
        match session.screen() {
            Screen::Intro => Some(Input::Start),
            Screen::CharacterSelect => match session.preview() {
                Some(id) if id == self.hero => Some(Input::Select(self.hero)),
                _ => Some(Input::Preview(Some(self.hero))),
            },
            Screen::MainMenu => {
                let stop = ROUTE[self.next_stop % ROUTE.len()];
                self.next_stop += 1;
                self.entry_level = level;
                self.drew = false;
                Some(Input::Choose(stop))
            }
            Screen::StickerRoom if !self.drew => {
                self.drew = true;
                Some(Input::SaveDrawing(format!(
                    "data:image/png;base64,{}",
                    level.unwrap_or_default()
                )))
            }
            Screen::StickerRoom => Some(Input::Back),
            Screen::CipherGame | Screen::MemoryGame | Screen::TileSwapGame => {
                if level > self.entry_level {
                    return Some(Input::Back);
                }
                match session.game()? {
                    ActiveGame::Cipher(engine) => solve_cipher(engine),
                    ActiveGame::Memory(engine) => solve_memory(engine),
                    ActiveGame::TileSwap(engine) => solve_tiles(engine),
                }
            }
        }
    }
}

fn solve_cipher(engine: &CipherEngine) -> Option<Input> {
    if engine.is_solved() {
        return None;
    }
    let pos = engine.user_sequence().len();
    engine.level().sequence.get(pos).map(|v| Input::CipherPress(*v))
}

/// Peeks at the faces, so it never misses
fn solve_memory(engine: &MemoryEngine) -> Option<Input> {
    let cards = engine.cards();
    match engine.choices() {
        [] => (0..cards.len())
            .find(|i| !engine.is_matched(*i))
            .map(Input::MemoryFlip),
        [open] => (0..cards.len())
            .find(|i| i != open && !engine.is_matched(*i) && cards[*i] == cards[*open])
            .map(Input::MemoryFlip),
        _ => None,
    }
}

/// Selection sort: bring the lowest misplaced piece home
fn solve_tiles(engine: &TileSwapEngine) -> Option<Input> {
    if engine.is_celebrating() {
        return None;
    }
    let tiles = engine.tiles();
    let home = (0..tiles.len()).find(|p| tiles[*p] as usize != *p)?;
    match engine.selected() {
        None => Some(Input::TileTap(home)),
        Some(selected) if selected == home => engine
            .position_of(home as u8)
            .map(Input::TileTap),
        // Something else is picked up; tapping it again puts it down
        Some(selected) => Some(Input::TileTap(selected)),
    }
}
