//! Sound resource references and sub-clips.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a sound resource, plus the optional sub-clip to play.
///
/// Immutable for the life of a play session: a controller bound to one
/// `ResourceRef` tears its session down and creates a fresh one when the
/// reference changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    /// Source path or URL of the audio resource.
    pub src: String,
    /// Named sub-clip within the resource, if any.
    pub sprite: Option<String>,
}

impl ResourceRef {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            sprite: None,
        }
    }

    /// Scope the reference to a named sub-clip.
    #[must_use]
    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    pub fn sprite(&self) -> Option<&str> {
        self.sprite.as_deref()
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sprite {
            Some(sprite) => write!(f, "{}[{sprite}]", self.src),
            None => write!(f, "{}", self.src),
        }
    }
}

/// A named time-range within a shared audio resource, playable
/// independently of the rest of the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprite {
    pub name: String,
    /// Start offset into the resource, in milliseconds.
    pub offset_ms: u64,
    /// Clip length, in milliseconds.
    pub duration_ms: u64,
}

impl Sprite {
    pub fn new(name: impl Into<String>, offset_ms: u64, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            offset_ms,
            duration_ms,
        }
    }

    /// End offset into the resource, in milliseconds.
    pub const fn end_ms(&self) -> u64 {
        self.offset_ms + self.duration_ms
    }
}
