//! Saved drawings per character
//!
//! Persisted inside the profile, newest first, capped at 10.

use serde::Serialize;

use crate::consts::MAX_SAVED_IMAGES;

/// Drawings saved from the sticker room (opaque image blobs, newest first)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(transparent)]
pub struct Gallery {
    images: Vec<String>,
}

impl Gallery {
    /// Create an empty gallery
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    /// Build from stored blobs, keeping the first `MAX_SAVED_IMAGES`
    pub fn from_stored(mut images: Vec<String>) -> Self {
        images.truncate(MAX_SAVED_IMAGES);
        Self { images }
    }

    /// Add a drawing in front; the oldest one falls off past the cap
    pub fn push(&mut self, blob: String) {
        self.images.insert(0, blob);
        self.images.truncate(MAX_SAVED_IMAGES);
    }

    /// Number of saved drawings
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Most recent drawing (if any)
    pub fn latest(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(String::as_str)
    }
}
