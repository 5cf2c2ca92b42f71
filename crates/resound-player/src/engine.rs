//! Sound-engine contract.
//!
//! The engine itself (decoding, mixing, output, timers) is an external
//! collaborator; this module only fixes the surface the playback layer
//! consumes. One detail drives most of the controller's design: unlock is
//! implicit and asynchronous. A freshly created instance may not be able to
//! produce sound until the backend is unlocked by a user gesture or finishes
//! loading, and calls issued before that point are queued by the engine and
//! only resolve into real events later.

use crate::directives::Fade;
use crossbeam_channel::Receiver;
use resound_core::{InstanceId, ResourceRef, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one event-feed subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// The ten lifecycle event kinds an engine emits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EventKind {
    /// The instance actually started producing sound. The first one for an
    /// instance doubles as the unlock confirmation.
    Play,
    /// Playback could not start (decode or unlock failure), with whatever
    /// message the engine supplied.
    PlayError { message: String },
    Pause,
    Stop,
    /// The instance reached the end of its clip.
    End,
    Mute,
    Volume,
    Seek,
    Fade,
    Rate,
}

impl EventKind {
    /// Short name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::PlayError { .. } => "playerror",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::End => "end",
            Self::Mute => "mute",
            Self::Volume => "volume",
            Self::Seek => "seek",
            Self::Fade => "fade",
            Self::Rate => "rate",
        }
    }
}

/// One lifecycle event, tagged with the instance it concerns.
///
/// The feed is global: every subscriber sees events for every instance, and
/// filtering down to one instance is the subscriber's job.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent {
    pub instance: InstanceId,
    pub kind: EventKind,
}

impl EngineEvent {
    pub const fn new(instance: InstanceId, kind: EventKind) -> Self {
        Self { instance, kind }
    }
}

/// Handle to an engine event feed: the id used to unsubscribe plus the
/// receiving end of the feed.
#[derive(Debug)]
pub struct EventSubscription {
    pub id: SubscriptionId,
    pub receiver: Receiver<EngineEvent>,
}

/// Contract for the imperative audio backend.
///
/// Transport and setter calls are fire-and-forget; confirmation arrives later
/// on the event feed. Getters return `None` while the engine has no usable
/// value yet (instance still locked, metadata not decoded), which callers
/// coerce rather than treat as an error.
pub trait SoundEngine {
    /// Instantiate the resource (scoped to its sub-clip, if any) and start a
    /// play attempt. There is no create-paused primitive: callers wanting a
    /// paused instance issue `pause` right after creation.
    fn create(&self, resource: &ResourceRef) -> Result<InstanceId>;

    fn play(&self, id: InstanceId);
    fn pause(&self, id: InstanceId);
    fn stop(&self, id: InstanceId);

    fn set_mute(&self, muted: bool, id: InstanceId);

    fn set_volume(&self, volume: f64, id: InstanceId);
    fn volume(&self, id: InstanceId) -> Option<f64>;

    /// Seek to a position in seconds.
    fn seek_to(&self, position: f64, id: InstanceId);
    /// Current position in seconds.
    fn seek(&self, id: InstanceId) -> Option<f64>;

    /// Set the playback rate (0.5 to 4.0).
    fn set_rate(&self, rate: f64, id: InstanceId);
    fn rate(&self, id: InstanceId) -> Option<f64>;

    fn set_loop(&self, looping: bool, id: InstanceId);
    fn looping(&self, id: InstanceId) -> Option<bool>;

    /// Ramp volume between two levels over a duration.
    fn fade(&self, fade: Fade, id: InstanceId);

    /// Clip duration in seconds, scoped to the sub-clip the instance was
    /// created with.
    fn duration(&self, id: InstanceId) -> Option<f64>;

    /// Whether the instance is audibly playing right now. Engine truth, which
    /// can diverge from what a controller last requested (autoplay policy,
    /// external timers).
    fn playing(&self, id: InstanceId) -> Option<bool>;

    /// Open a subscription to the global event feed.
    fn subscribe(&self) -> EventSubscription;
    /// Close a subscription; no events are delivered to it afterwards.
    fn unsubscribe(&self, id: SubscriptionId);
}
