//! Browser host: LocalStorage, speech and the JavaScript facade

use wasm_bindgen::prelude::*;

use crate::narration::SpeechNarrator;
use crate::persistence::{ProfileStorage, ProfileStore, StorageError};
use crate::session::{DrawingSink, Input, Session};
use crate::settings::Settings;

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn handle() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("localStorage".to_string()))
    }
}

impl ProfileStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::handle()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors land here
        Self::handle()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
    }
    log::info!("Cipher Heroes (web) starting...");
}

/// Game shell handle for a JavaScript renderer
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        let settings = Settings::load(&LocalStorage);
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let store = ProfileStore::new(Box::new(LocalStorage));
        let narrator = Box::new(SpeechNarrator::new(settings));
        WebSession {
            session: Session::new(store, narrator, seed),
        }
    }

    /// Apply a JSON-encoded input, e.g. `{"type":"select","value":"kedi"}`
    pub fn handle(&mut self, input: &str) -> Result<bool, JsValue> {
        let input: Input =
            serde_json::from_str(input).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.session.handle(input))
    }

    /// Feed elapsed milliseconds (from `requestAnimationFrame`)
    pub fn advance(&mut self, dt_ms: f64) {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.session.advance(dt_ms.round() as u64);
        }
    }

    /// Current view as JSON
    pub fn view(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.view()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = saveDrawing)]
    pub fn save_drawing(&mut self, data_url: String) {
        self.session.on_save(data_url);
    }

    /// Replace narration settings; takes effect on the next reload
    #[wasm_bindgen(js_name = saveSettings)]
    pub fn save_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings.save(&mut LocalStorage);
        Ok(())
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
