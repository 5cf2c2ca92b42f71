//! Play-session state.
//!
//! A [`PlaySession`] tracks one instance from creation to teardown: the
//! one-way unlock gate, what the controller believes it has applied so far,
//! and the optimistic seek bookkeeping. It holds no engine handle; the
//! controller owns the calls, the session owns the flags.

use crate::directives::Fade;
use resound_core::InstanceId;

/// One-way unlock gate.
///
/// The engine's backend cannot actually play, pause, or seek an instance
/// until it has been unlocked (user gesture, or the resource finishing its
/// asynchronous load). The gate opens exactly once, on the first confirmed
/// play event for the instance, and never closes again for the session.
/// While it is closed, no mutating call other than the creation-time
/// volume/pause may be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gate {
    #[default]
    Locked,
    Unlocked,
}

impl Gate {
    pub const fn is_unlocked(self) -> bool {
        matches!(self, Self::Unlocked)
    }
}

/// Last value actually handed to the engine per dimension, so unrelated
/// directive churn never re-issues a call for an unchanged value.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Applied {
    pub mute: Option<bool>,
    pub volume: Option<f64>,
    pub seek: Option<f64>,
    pub rate: Option<f64>,
    pub looping: Option<bool>,
    pub fade: Option<Fade>,
}

/// State of one play instance, from creation to teardown.
#[derive(Debug, Default)]
pub struct PlaySession {
    /// Live instance id; `None` before creation and after teardown. At most
    /// one is live per session.
    pub(crate) instance: Option<InstanceId>,
    pub(crate) gate: Gate,
    /// Last play/pause state the controller knows it asked for.
    pub(crate) confirmed_playing: bool,
    /// Guards the stop call: one per intended-stop episode, reset when the
    /// stop intent is withdrawn.
    pub(crate) stopped_once: bool,
    /// A seek is in flight; queries report the target until confirmed.
    pub(crate) seeking: bool,
    pub(crate) seek_target: Option<f64>,
    pub(crate) applied: Applied,
}

impl PlaySession {
    /// Fresh session around a just-created instance. `playing` is whether
    /// creation itself left the instance in a playing attempt.
    pub(crate) fn new(instance: InstanceId, playing: bool) -> Self {
        Self {
            instance: Some(instance),
            confirmed_playing: playing,
            ..Self::default()
        }
    }

    pub const fn instance(&self) -> Option<InstanceId> {
        self.instance
    }

    pub const fn is_live(&self) -> bool {
        self.instance.is_some()
    }

    pub const fn gate(&self) -> Gate {
        self.gate
    }

    pub const fn confirmed_playing(&self) -> bool {
        self.confirmed_playing
    }

    pub const fn seeking(&self) -> bool {
        self.seeking
    }

    /// Whether an event tagged with `id` belongs to this session.
    pub(crate) fn owns(&self, id: InstanceId) -> bool {
        self.instance == Some(id)
    }

    /// Open the gate. Returns `true` only on the locked→unlocked flip, so
    /// the caller can run the deferred reconciliation exactly once.
    pub(crate) fn unlock(&mut self) -> bool {
        match self.gate {
            Gate::Locked => {
                self.gate = Gate::Unlocked;
                true
            }
            Gate::Unlocked => false,
        }
    }

    /// A seek event for this instance confirmed completion; engine values
    /// are authoritative again.
    pub(crate) fn seek_confirmed(&mut self) {
        self.seeking = false;
        self.seek_target = None;
    }
}
