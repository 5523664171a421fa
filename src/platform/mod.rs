//! Platform abstraction layer
//!
//! Storage backends and host glue:
//! - native: JSON files in the user data directory
//! - web: LocalStorage, Web Speech narration and a `wasm-bindgen` facade

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::{FileStorage, data_dir};
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;
