//! Declarative playback directives.

use serde::{Deserialize, Serialize};

/// Volume ramp between two levels over a duration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Fade {
    /// Starting volume (0.0 to 1.0).
    pub from: f64,
    /// Target volume (0.0 to 1.0).
    pub to: f64,
    /// Ramp length in milliseconds.
    pub duration_ms: u64,
}

impl Fade {
    pub const fn new(from: f64, to: f64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            duration_ms,
        }
    }

    /// Fade from silence up to a level.
    pub const fn fade_in(to: f64, duration_ms: u64) -> Self {
        Self::new(0.0, to, duration_ms)
    }

    /// Fade from a level down to silence.
    pub const fn fade_out(from: f64, duration_ms: u64) -> Self {
        Self::new(from, 0.0, duration_ms)
    }
}

/// Desired state of a playing sound, declared as a value.
///
/// A controller converges the engine towards whatever this says: set a field,
/// hand the whole value to [`apply`](crate::PlaybackController::apply), and
/// the controller works out which engine calls that requires. Unset (`None`)
/// dimensions are left alone entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Directives {
    /// Hold playback paused. `false` means the sound should be playing.
    pub pause: bool,
    /// Stop playback and rewind. Terminal while it stays `true`.
    pub stop: bool,
    pub mute: Option<bool>,
    /// Volume, 0.0 to 1.0.
    pub volume: Option<f64>,
    /// Position to seek to, in seconds.
    pub seek: Option<f64>,
    /// Playback rate, 0.5 to 4.0. Zero is treated as 1.0.
    pub rate: Option<f64>,
    pub looping: Option<bool>,
    pub fade: Option<Fade>,
}

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out paused.
    pub fn paused() -> Self {
        Self {
            pause: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_pause(mut self, pause: bool) -> Self {
        self.pause = pause;
        self
    }

    #[must_use]
    pub const fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }

    #[must_use]
    pub const fn with_mute(mut self, mute: bool) -> Self {
        self.mute = Some(mute);
        self
    }

    #[must_use]
    pub const fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    #[must_use]
    pub const fn with_seek(mut self, position: f64) -> Self {
        self.seek = Some(position);
        self
    }

    #[must_use]
    pub const fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    #[must_use]
    pub const fn with_looping(mut self, looping: bool) -> Self {
        self.looping = Some(looping);
        self
    }

    #[must_use]
    pub const fn with_fade(mut self, fade: Fade) -> Self {
        self.fade = Some(fade);
        self
    }

    /// Whether a fresh instance should start audible. Engine creation always
    /// starts a play attempt, so "no" means pausing right after create.
    pub const fn start_playing(&self) -> bool {
        !self.pause && !self.stop
    }
}
