//! Lifecycle callback slots.
//!
//! The owning UI may hand over fresh closures on every render, but the event
//! bridge must always invoke the latest one without resubscribing to the
//! engine. So callbacks live in replaceable single-value slots that are read,
//! not captured, at dispatch time: swap the whole [`Callbacks`] value and the
//! next event sees the new closures.

use crate::engine::EventKind;

type Slot = Option<Box<dyn FnMut() + Send>>;
type ErrorSlot = Option<Box<dyn FnMut(&str) + Send>>;

/// The ten user callback slots, one per engine event kind.
///
/// All slots default to empty; events with an empty slot are still processed
/// by the controller, just not surfaced.
#[derive(Default)]
pub struct Callbacks {
    on_play: Slot,
    on_play_error: ErrorSlot,
    on_end: Slot,
    on_pause: Slot,
    on_stop: Slot,
    on_mute: Slot,
    on_volume: Slot,
    on_seek: Slot,
    on_fade: Slot,
    on_rate: Slot,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_play(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_play = Some(Box::new(f));
        self
    }

    /// Receives the engine-supplied failure message verbatim.
    #[must_use]
    pub fn on_play_error(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_play_error = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_end(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_pause(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_pause = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_stop(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_stop = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_mute(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_mute = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_volume(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_volume = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_seek(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_seek = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_fade(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_fade = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_rate(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_rate = Some(Box::new(f));
        self
    }

    /// Invoke the slot matching an event kind, if one is set.
    pub(crate) fn dispatch(&mut self, kind: &EventKind) {
        let slot = match kind {
            EventKind::PlayError { message } => {
                if let Some(f) = &mut self.on_play_error {
                    f(message);
                }
                return;
            }
            EventKind::Play => &mut self.on_play,
            EventKind::End => &mut self.on_end,
            EventKind::Pause => &mut self.on_pause,
            EventKind::Stop => &mut self.on_stop,
            EventKind::Mute => &mut self.on_mute,
            EventKind::Volume => &mut self.on_volume,
            EventKind::Seek => &mut self.on_seek,
            EventKind::Fade => &mut self.on_fade,
            EventKind::Rate => &mut self.on_rate,
        };
        if let Some(f) = slot {
            f();
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_play", &self.on_play.is_some())
            .field("on_play_error", &self.on_play_error.is_some())
            .field("on_end", &self.on_end.is_some())
            .field("on_pause", &self.on_pause.is_some())
            .field("on_stop", &self.on_stop.is_some())
            .field("on_mute", &self.on_mute.is_some())
            .field("on_volume", &self.on_volume.is_some())
            .field("on_seek", &self.on_seek.is_some())
            .field("on_fade", &self.on_fade.is_some())
            .field("on_rate", &self.on_rate.is_some())
            .finish()
    }
}
