//! Cipher Heroes entry point
//!
//! Native builds run a headless demo: the autoplayer picks a hero and plays
//! through the games, saving to the data directory and narrating to the log.
//! The browser build starts from `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use cipher_heroes::autoplay::Autoplay;
    use cipher_heroes::platform::{FileStorage, data_dir};
    use cipher_heroes::{CharacterId, LogNarrator, ProfileStore, Session, Settings};

    /// Simulated frame length
    const STEP_MS: u64 = 100;
    /// Give up after this many frames (about ten minutes of play)
    const MAX_STEPS: u32 = 6000;
    const DEFAULT_WINS: u32 = 6;

    struct Args {
        wins: u32,
        hero: CharacterId,
    }

    /// `cipher-heroes [wins] [hero]`
    fn parse_args() -> Args {
        let mut args = std::env::args().skip(1);
        let wins = match args.next().map(|w| w.parse::<u32>()) {
            Some(Ok(wins)) => wins,
            Some(Err(e)) => {
                log::warn!("Bad win count ({}), using {}", e, DEFAULT_WINS);
                DEFAULT_WINS
            }
            None => DEFAULT_WINS,
        };
        let hero = match args.next().map(|h| h.parse::<CharacterId>()) {
            Some(Ok(hero)) => hero,
            Some(Err(e)) => {
                log::warn!("{}, playing as robot", e);
                CharacterId::Robot
            }
            None => CharacterId::Robot,
        };
        Args { wins, hero }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Cipher Heroes (native demo) starting...");

        let args = parse_args();
        let dir = data_dir();
        log::info!("Data directory: {}", dir.display());

        let storage = FileStorage::new(dir);
        let settings = Settings::load(&storage);
        let narrator = Box::new(LogNarrator::new(&settings));
        let store = ProfileStore::new(Box::new(storage));
        let mut session = Session::new(store, narrator, rand::random());
        let mut player = Autoplay::new(args.hero);

        let start_level = session.profile(args.hero).map_or(1, |p| p.level);
        let target = start_level.saturating_add(args.wins);

        for _ in 0..MAX_STEPS {
            let level = session.profile(args.hero).map_or(1, |p| p.level);
            if level >= target && !session.reward().is_pending() {
                break;
            }
            if let Some(input) = player.next_input(&session) {
                let _ = session.handle(input);
            }
            session.advance(STEP_MS);
        }

        match session.profile(args.hero) {
            Some(profile) => {
                let stickers: Vec<&str> = profile.unlocked_rewards.iter().map(String::as_str).collect();
                log::info!(
                    "{} {} is level {} with stickers [{}] and {} drawings",
                    profile.emoji,
                    profile.name,
                    profile.level,
                    stickers.join(" "),
                    profile.saved_images.len()
                );
            }
            None => log::warn!("No profile for {}", args.hero),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is platform::web::start
}
