//! Spoken feedback
//!
//! Narration is fire-and-forget: the game never waits on speech and a
//! missing voice only costs the audio.

use std::cell::RefCell;
use std::rc::Rc;

use crate::settings::Settings;

/// Where the game sends its spoken lines
pub trait NarrationPort {
    /// Speak `text`; `interrupt` cancels whatever is still being spoken
    fn speak(&mut self, text: &str, interrupt: bool);
}

/// Narrates through the `log` facade (native builds)
#[derive(Debug, Clone)]
pub struct LogNarrator {
    enabled: bool,
}

impl LogNarrator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            enabled: settings.narration,
        }
    }
}

impl NarrationPort for LogNarrator {
    fn speak(&mut self, text: &str, interrupt: bool) {
        if !self.enabled {
            return;
        }
        if interrupt {
            log::info!(target: "narration", "(interrupt) {}", text);
        } else {
            log::info!(target: "narration", "{}", text);
        }
    }
}

/// One recorded line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spoken {
    pub text: String,
    pub interrupt: bool,
}

/// Records every line; clones share the same log so a host can keep a
/// handle after giving the narrator away
#[derive(Debug, Clone, Default)]
pub struct NarrationLog {
    lines: Rc<RefCell<Vec<Spoken>>>,
}

impl NarrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<Spoken> {
        self.lines.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.lines.borrow().last().map(|s| s.text.clone())
    }

    /// Whether any line contains `needle`
    pub fn heard(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|s| s.text.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl NarrationPort for NarrationLog {
    fn speak(&mut self, text: &str, interrupt: bool) {
        self.lines.borrow_mut().push(Spoken {
            text: text.to_string(),
            interrupt,
        });
    }
}

/// Web Speech API narrator
#[cfg(target_arch = "wasm32")]
pub struct SpeechNarrator {
    synth: Option<web_sys::SpeechSynthesis>,
    settings: Settings,
}

#[cfg(target_arch = "wasm32")]
impl SpeechNarrator {
    pub fn new(settings: Settings) -> Self {
        let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        match &synth {
            // Chrome fills the voice list lazily; asking early warms it up
            Some(synth) => {
                let _ = synth.get_voices();
            }
            None => log::warn!("Speech synthesis unavailable - narration disabled"),
        }
        Self { synth, settings }
    }

    /// First installed voice matching the locale's language
    fn preferred_voice(&self, synth: &web_sys::SpeechSynthesis) -> Option<web_sys::SpeechSynthesisVoice> {
        use wasm_bindgen::JsCast;

        let lang = self.settings.locale.split('-').next().unwrap_or_default().to_string();
        synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<web_sys::SpeechSynthesisVoice>().ok())
            .find(|v| v.lang().contains(&lang))
    }
}

#[cfg(target_arch = "wasm32")]
impl NarrationPort for SpeechNarrator {
    fn speak(&mut self, text: &str, interrupt: bool) {
        if !self.settings.narration {
            return;
        }
        let Some(synth) = &self.synth else {
            return;
        };
        if interrupt {
            synth.cancel();
        }
        let utterance = match web_sys::SpeechSynthesisUtterance::new_with_text(text) {
            Ok(u) => u,
            Err(e) => {
                log::warn!("Could not create utterance: {:?}", e);
                return;
            }
        };
        utterance.set_lang(&self.settings.locale);
        utterance.set_rate(self.settings.effective_rate());
        utterance.set_pitch(self.settings.effective_pitch());
        if let Some(voice) = self.preferred_voice(synth) {
            utterance.set_voice(Some(&voice));
        }
        synth.speak(&utterance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_clones_share_lines() {
        let log = NarrationLog::new();
        let mut port = log.clone();
        port.speak("Aferin!", false);
        port.speak("Bir oyun seç bakalım!", true);
        assert_eq!(log.lines().len(), 2);
        assert!(log.lines()[1].interrupt);
        assert_eq!(log.last().as_deref(), Some("Bir oyun seç bakalım!"));
        assert!(log.heard("Aferin"));
    }

    #[test]
    fn test_disabled_log_narrator_is_silent() {
        let settings = Settings {
            narration: false,
            ..Settings::default()
        };
        let mut narrator = LogNarrator::new(&settings);
        assert!(!narrator.enabled);
        narrator.speak("sessiz", true);
    }
}
