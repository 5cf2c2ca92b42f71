//! Resource loading contract.
//!
//! Loading is an external collaborator: something else fetches and decodes
//! the resource and reports its progress through [`LoadState`]. The playback
//! layer never drives loading; it only starts reconciling once a live engine
//! handle exists.

use serde::{Deserialize, Serialize};

/// Load state of a sound resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Not yet requested.
    #[default]
    Idle,
    /// Fetch/decode in progress.
    Loading,
    /// Ready for playback.
    Loaded,
    /// Load failed with an engine-supplied message.
    Error(String),
}

impl LoadState {
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Contract for the external resource-loading collaborator.
pub trait ResourceLoader {
    /// Current load state of the resource.
    fn state(&self) -> LoadState;

    /// Trigger a load, for loaders that defer fetching until asked.
    /// No-op once loading has started.
    fn load(&self);
}
