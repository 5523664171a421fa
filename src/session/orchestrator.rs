//! Session orchestrator
//!
//! Owns the persisted snapshot, the active engine and the reward dialog.
//! Hosts feed it discrete [`Input`]s plus elapsed time and read back a
//! [`SessionView`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Destination, RevealStage, RewardPresentation, Screen};
use super::theme::resolve_theme;
use super::DrawingSink;
use crate::catalog::{DRAWING_COLORS, PaletteColor, REWARD_STICKERS, Theme};
use crate::consts::REWARD_REVEAL_MS;
use crate::games::{ActiveGame, MiniGame, Outcome};
use crate::narration::NarrationPort;
use crate::persistence::{ProfileStore, SavedState};
use crate::profile::{CharacterId, Profile, ProfileMap};
use crate::reward;
use crate::timer::Timers;

const WIN_LINE: &str = "Harika! Bir hediye kazandın!";

/// A discrete player action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Input {
    /// Intro start button
    Start,
    /// Pick a hero on the character screen
    Select(CharacterId),
    /// Hover/touch preview on the character screen (`None` clears it)
    Preview(Option<CharacterId>),
    /// Main-menu choice
    Choose(Destination),
    Back,
    /// Cipher button (1-3)
    CipherPress(u8),
    /// Memory card index
    MemoryFlip(usize),
    /// Tile-swap board position
    TileTap(usize),
    /// Open the gift box before the timer does
    RevealReward,
    /// Close a revealed reward
    DismissReward,
    /// Encoded canvas image from the sticker room
    SaveDrawing(String),
}

#[derive(Debug, Clone, Copy)]
enum SessionTimer {
    /// Open the gift box of presentation `generation`
    Reveal { generation: u64 },
}

/// Read-only snapshot for renderers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView<'a> {
    pub screen: Screen,
    pub theme: &'static Theme,
    pub character: Option<&'a Profile>,
    pub preview: Option<CharacterId>,
    pub reward: RewardPresentation,
    pub game: Option<&'a ActiveGame>,
    /// Canvas colors, on the sticker room only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<&'static [PaletteColor]>,
}

/// The running game shell
pub struct Session {
    state: SavedState,
    preview: Option<CharacterId>,
    reward: RewardPresentation,
    /// Bumped per presentation; reveal timers of older ones are stale
    reward_generation: u64,
    game: Option<ActiveGame>,
    timers: Timers<SessionTimer>,
    rng: Pcg32,
    store: ProfileStore,
    narrator: Box<dyn NarrationPort>,
}

impl Session {
    /// Restore from `store` and enter the saved screen
    pub fn new(store: ProfileStore, narrator: Box<dyn NarrationPort>, seed: u64) -> Self {
        let state = store.load();
        let screen = state.current_screen;
        let mut session = Self {
            state,
            preview: None,
            reward: RewardPresentation::Idle,
            reward_generation: 0,
            game: None,
            timers: Timers::new(),
            rng: Pcg32::seed_from_u64(seed),
            store,
            narrator,
        };
        log::info!("Session starting on {:?}", screen);
        session.enter(screen);
        session
    }

    pub fn screen(&self) -> Screen {
        self.state.current_screen
    }

    pub fn current_character(&self) -> Option<CharacterId> {
        self.state.current_character
    }

    pub fn preview(&self) -> Option<CharacterId> {
        self.preview
    }

    pub fn profiles(&self) -> &ProfileMap {
        &self.state.characters
    }

    pub fn profile(&self, id: CharacterId) -> Option<&Profile> {
        self.state.characters.get(&id)
    }

    /// Profile of the current character
    pub fn current_profile(&self) -> Option<&Profile> {
        self.state
            .current_character
            .and_then(|id| self.state.characters.get(&id))
    }

    pub fn reward(&self) -> RewardPresentation {
        self.reward
    }

    pub fn game(&self) -> Option<&ActiveGame> {
        self.game.as_ref()
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Theme for what is on screen right now
    pub fn theme(&self) -> &'static Theme {
        resolve_theme(
            self.state.current_screen,
            self.state.current_character,
            self.preview,
        )
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            screen: self.state.current_screen,
            theme: self.theme(),
            character: self.current_profile(),
            preview: self.preview,
            reward: self.reward,
            game: self.game.as_ref(),
            palette: (self.state.current_screen == Screen::StickerRoom).then_some(&DRAWING_COLORS[..]),
        }
    }

    /// Session and engine timers still pending
    pub fn pending_timers(&self) -> usize {
        self.timers.len() + self.game.as_ref().map_or(0, |g| g.pending_timers())
    }

    /// Apply one player action. Returns whether it had any effect.
    pub fn handle(&mut self, input: Input) -> bool {
        let screen = self.state.current_screen;

        match input {
            Input::RevealReward => return self.reveal(),
            Input::DismissReward => return self.dismiss(),
            _ if self.reward.is_pending() => {
                log::debug!("Reward dialog open, ignoring {:?}", input);
                return false;
            }
            _ => {}
        }

        match (screen, input) {
            (Screen::Intro, Input::Start) => {
                self.enter(Screen::CharacterSelect);
                true
            }
            (Screen::CharacterSelect, Input::Preview(id)) => {
                self.preview = id;
                true
            }
            (Screen::CharacterSelect, Input::Select(id)) => {
                self.select(id);
                true
            }
            (Screen::MainMenu, Input::Choose(dest)) if self.state.current_character.is_some() => {
                self.enter(dest.screen());
                true
            }
            (Screen::MainMenu, Input::Back) => {
                self.enter(Screen::CharacterSelect);
                true
            }
            (
                Screen::CipherGame | Screen::MemoryGame | Screen::TileSwapGame | Screen::StickerRoom,
                Input::Back,
            ) => {
                self.enter(Screen::MainMenu);
                true
            }
            (Screen::CipherGame, Input::CipherPress(value)) => self.press_cipher(value),
            (Screen::MemoryGame, Input::MemoryFlip(index)) => self.flip_card(index),
            (Screen::TileSwapGame, Input::TileTap(index)) => self.tap_tile(index),
            (_, Input::SaveDrawing(blob)) => self.save_drawing(blob),
            (screen, input) => {
                log::debug!("Ignoring {:?} on {:?}", input, screen);
                false
            }
        }
    }

    /// Let `dt_ms` of time pass: session timers first, then the engine
    pub fn advance(&mut self, dt_ms: u64) {
        let until = self.timers.horizon(dt_ms);
        while let Some(timer) = self.timers.pop_due(until) {
            match timer {
                SessionTimer::Reveal { generation } if generation == self.reward_generation => {
                    self.reveal();
                }
                SessionTimer::Reveal { generation } => {
                    log::debug!("Stale reveal timer {} ignored", generation);
                }
            }
        }
        self.timers.settle(until);

        let outcome = match self.game.as_mut() {
            Some(game) => game.advance(dt_ms, self.narrator.as_mut()),
            None => Outcome::Continue,
        };
        if let Outcome::Won { late_ms } = outcome {
            self.on_win(late_ms);
        }
    }

    /// Switch screens: drop the old engine, start the new one, narrate, persist
    fn enter(&mut self, screen: Screen) {
        log::info!("Screen {:?} -> {:?}", self.state.current_screen, screen);
        self.state.current_screen = screen;
        self.game = None;
        if screen != Screen::CharacterSelect {
            self.preview = None;
        }

        match screen {
            Screen::Intro => self.narrator.speak(
                "Şifre Kahramanları oyununa hoş geldin! Hadi başla düğmesine bas!",
                true,
            ),
            Screen::CharacterSelect => self.narrator.speak("Lütfen bir kahraman seç!", true),
            Screen::MainMenu => self.narrator.speak("Bir oyun seç bakalım!", true),
            Screen::StickerRoom => self
                .narrator
                .speak("Burası senin odan. Resim yap ve çıkartma yapıştır!", false),
            Screen::CipherGame | Screen::MemoryGame | Screen::TileSwapGame => {}
        }

        if let Some(kind) = screen.game_kind() {
            let rng = Pcg32::seed_from_u64(self.rng.random::<u64>());
            self.game = Some(ActiveGame::start(kind, rng, self.narrator.as_mut()));
        }

        self.persist();
    }

    fn select(&mut self, id: CharacterId) {
        let name = id.def().name;
        log::info!("Selected {}", id);
        self.state.current_character = Some(id);
        self.narrator.speak(&format!("{} seçildi. Hadi oynayalım!", name), false);
        self.enter(Screen::MainMenu);
    }

    fn press_cipher(&mut self, value: u8) -> bool {
        let Some(ActiveGame::Cipher(engine)) = self.game.as_mut() else {
            return false;
        };
        match engine.input(value, self.narrator.as_mut()) {
            Outcome::Ignored => false,
            Outcome::Continue => true,
            Outcome::Won { late_ms } => {
                self.on_win(late_ms);
                true
            }
        }
    }

    fn flip_card(&mut self, index: usize) -> bool {
        match self.game.as_mut() {
            Some(ActiveGame::Memory(engine)) => engine.flip(index, self.narrator.as_mut()),
            _ => false,
        }
    }

    fn tap_tile(&mut self, index: usize) -> bool {
        match self.game.as_mut() {
            Some(ActiveGame::TileSwap(engine)) => engine.tap(index, self.narrator.as_mut()),
            _ => false,
        }
    }

    fn save_drawing(&mut self, blob: String) -> bool {
        let Some(id) = self.state.current_character else {
            log::debug!("No character, drawing dropped");
            return false;
        };
        let Some(profile) = self.state.characters.get_mut(&id) else {
            return false;
        };
        profile.saved_images.push(blob);
        log::info!("{} now has {} drawings", id, profile.saved_images.len());
        self.narrator.speak("Resim kaydedildi!", false);
        self.persist();
        true
    }

    /// Count a win for the current character and open the gift box.
    /// `late_ms` is how far into the past the win happened.
    fn on_win(&mut self, late_ms: u64) {
        let Some(id) = self.state.current_character else {
            log::debug!("Win without a character ignored");
            return;
        };
        let Some(profile) = self.state.characters.get_mut(&id) else {
            log::debug!("Win for missing profile {} ignored", id);
            return;
        };

        let token = reward::allocate(&profile.unlocked_rewards, &REWARD_STICKERS, &mut self.rng);
        profile.record_win(token);
        log::info!("{} reached level {} (reward {:?})", id, profile.level, token);
        self.persist();

        let Some(token) = token else {
            log::warn!("Reward catalog empty, no sticker to show");
            return;
        };
        if self.reward.is_pending() {
            log::debug!("Replacing open reward dialog");
        }
        self.reward_generation += 1;
        self.reward = RewardPresentation::Pending {
            token,
            stage: RevealStage::Boxed,
        };
        self.narrator.speak(WIN_LINE, false);

        // The reveal is due REWARD_REVEAL_MS after the win itself, not after the frame
        match REWARD_REVEAL_MS.saturating_sub(late_ms) {
            0 => {
                self.reveal();
            }
            delay => self.timers.schedule(
                delay,
                SessionTimer::Reveal {
                    generation: self.reward_generation,
                },
            ),
        }
    }

    /// Boxed -> Revealed; anything else is a no-op
    fn reveal(&mut self) -> bool {
        let RewardPresentation::Pending {
            token,
            stage: RevealStage::Boxed,
        } = self.reward
        else {
            return false;
        };
        self.reward = RewardPresentation::Pending {
            token,
            stage: RevealStage::Revealed,
        };
        self.narrator.speak(
            &format!(
                "Yaşasın! {} çıkartması senin oldu. Devam etmek için tamam düğmesine bas.",
                token
            ),
            false,
        );
        true
    }

    /// Revealed -> Idle; the screen stays where it is
    fn dismiss(&mut self) -> bool {
        match self.reward.stage() {
            Some(RevealStage::Revealed) => {
                self.reward = RewardPresentation::Idle;
                true
            }
            _ => false,
        }
    }

    fn persist(&mut self) {
        self.store.save(&self.state);
    }
}

impl DrawingSink for Session {
    fn on_save(&mut self, blob: String) {
        if !self.save_drawing(blob) {
            log::debug!("Drawing not saved");
        }
    }
}
