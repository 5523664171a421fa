//! Session flow
//!
//! Screens, the current hero, the reward dialog and the engine behind the
//! current game screen.

mod orchestrator;
mod state;
mod theme;

pub use orchestrator::{Input, Session, SessionView};
pub use state::{Destination, RevealStage, RewardPresentation, Screen};
pub use theme::resolve_theme;

/// Receives finished drawings from a canvas
pub trait DrawingSink {
    /// Store an encoded image for the current hero
    fn on_save(&mut self, blob: String);
}
