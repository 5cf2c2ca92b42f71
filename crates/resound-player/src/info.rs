//! On-demand playback queries.
//!
//! Pull, not push: engine numeric state moves without the controller's own
//! mutation (autoplay policy, the engine's internal timers), so these
//! getters consult the engine at call time instead of mirroring events.
//! All of them are cheap and side-effect-free.

use crate::directives::Directives;
use crate::engine::SoundEngine;
use crate::session::PlaySession;

/// Lazy queries over one play session. Borrowed from the controller via
/// [`info`](crate::PlaybackController::info); nothing here mutates.
pub struct SoundInfo<'a, E: SoundEngine> {
    engine: &'a E,
    session: &'a PlaySession,
    intended: &'a Directives,
}

impl<'a, E: SoundEngine> SoundInfo<'a, E> {
    pub(crate) const fn new(
        engine: &'a E,
        session: &'a PlaySession,
        intended: &'a Directives,
    ) -> Self {
        Self {
            engine,
            session,
            intended,
        }
    }

    /// Clip duration in seconds; 0.0 while there is no live instance or the
    /// engine has no value yet.
    pub fn duration(&self) -> f64 {
        self.session
            .instance()
            .and_then(|id| self.engine.duration(id))
            .unwrap_or(0.0)
    }

    /// Whether the sound is playing. With a live instance this is engine
    /// truth, which may diverge from what was last requested; without one
    /// it falls back to the controller's last-known state.
    pub fn playing(&self) -> bool {
        match self.session.instance() {
            Some(id) => self
                .engine
                .playing(id)
                .unwrap_or(self.session.confirmed_playing()),
            None => self.session.confirmed_playing() || self.intended.start_playing(),
        }
    }

    /// Current position in seconds. While a seek is in flight this is the
    /// requested target, not the engine's not-yet-updated value.
    pub fn seek(&self) -> f64 {
        if self.session.seeking() {
            return self.session.seek_target.unwrap_or(0.0);
        }
        self.session
            .instance()
            .and_then(|id| self.engine.seek(id))
            .unwrap_or(0.0)
    }

    /// Current volume; 0.0 when the engine has no numeric value yet.
    pub fn volume(&self) -> f64 {
        self.session
            .instance()
            .and_then(|id| self.engine.volume(id))
            .unwrap_or(0.0)
    }
}
