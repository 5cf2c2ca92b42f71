//! The playback-state reconciler.
//!
//! A [`PlaybackController`] owns exactly one play instance of one resource.
//! It diffs declared [`Directives`] against what it last applied, turns the
//! difference into the minimal ordered set of engine calls, and bridges the
//! engine's event feed back into session flags and user callbacks. Events
//! for other instances, including a just-torn-down predecessor of this very
//! controller, are dropped at the door.

// Change detection compares against the exact value previously applied.
#![allow(clippy::float_cmp)]

use crate::callbacks::Callbacks;
use crate::directives::Directives;
use crate::engine::{EngineEvent, EventKind, EventSubscription, SoundEngine};
use crate::info::SoundInfo;
use crate::session::PlaySession;
use resound_core::{InstanceId, ResourceRef, Result};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Options for binding a controller to a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub resource: ResourceRef,
    /// Create the instance paused instead of playing.
    pub paused: bool,
    /// Initial volume. Safe to set even while the instance is still locked;
    /// the engine caches it.
    pub volume: Option<f64>,
}

impl SessionOptions {
    pub const fn new(resource: ResourceRef) -> Self {
        Self {
            resource,
            paused: false,
            volume: None,
        }
    }

    #[must_use]
    pub const fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    #[must_use]
    pub const fn volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Declarative controller for one play instance.
pub struct PlaybackController<E: SoundEngine> {
    engine: Arc<E>,
    resource: ResourceRef,
    session: PlaySession,
    subscription: Option<EventSubscription>,
    intended: Directives,
    callbacks: Callbacks,
}

impl<E: SoundEngine> PlaybackController<E> {
    /// Bind to a resource: subscribe to the event feed, create the instance,
    /// and apply the creation-time directives.
    ///
    /// Subscription happens before creation so the instance's starting play
    /// event cannot slip past the bridge. Creation always starts a play
    /// attempt; "create paused" is represented by pausing right after, the
    /// only mutation besides the initial volume that is legal pre-unlock.
    pub fn new(engine: Arc<E>, options: SessionOptions) -> Result<Self> {
        let subscription = engine.subscribe();
        let instance = match engine.create(&options.resource) {
            Ok(instance) => instance,
            Err(e) => {
                // Nothing to listen for; close the feed before bailing.
                engine.unsubscribe(subscription.id);
                return Err(e);
            }
        };
        debug!(%instance, resource = %options.resource, "created play instance");

        let intended = Directives {
            pause: options.paused,
            volume: options.volume,
            ..Directives::default()
        };

        let mut session = PlaySession::new(instance, intended.start_playing());
        if let Some(volume) = options.volume {
            engine.set_volume(volume, instance);
            session.applied.volume = Some(volume);
        }
        if !intended.start_playing() {
            debug!(%instance, "pausing right after create");
            engine.pause(instance);
        }

        Ok(Self {
            engine,
            resource: options.resource,
            session,
            subscription: Some(subscription),
            intended,
            callbacks: Callbacks::default(),
        })
    }

    /// The resource this controller is bound to.
    pub const fn resource(&self) -> &ResourceRef {
        &self.resource
    }

    pub const fn session(&self) -> &PlaySession {
        &self.session
    }

    /// The directives last handed to [`apply`](Self::apply).
    pub const fn intended(&self) -> &Directives {
        &self.intended
    }

    /// Replace the callback slots. No engine resubscription happens; the
    /// next dispatched event simply reads the new closures.
    pub fn set_callbacks(&mut self, callbacks: Callbacks) {
        self.callbacks = callbacks;
    }

    /// On-demand queries over the live session.
    pub fn info(&self) -> SoundInfo<'_, E> {
        SoundInfo::new(&self.engine, &self.session, &self.intended)
    }

    /// Declare the desired state and converge the engine towards it.
    ///
    /// While the session is still locked nothing is issued; the directives
    /// are kept and applied, at their latest values, the moment the first
    /// play confirmation opens the gate.
    pub fn apply(&mut self, directives: Directives) {
        if self.intended.stop && !directives.stop {
            // Stop intent withdrawn; the next stop=true may issue again.
            self.session.stopped_once = false;
        }
        self.intended = directives;
        self.reconcile();
    }

    /// Drain and dispatch pending engine events.
    ///
    /// Single-threaded by design: the bridge runs when the owner pumps it,
    /// never behind its back.
    pub fn pump_events(&mut self) {
        let Some(subscription) = &self.subscription else {
            return;
        };
        let events: Vec<EngineEvent> = subscription.receiver.try_iter().collect();
        for event in events {
            self.handle_event(event);
        }
    }

    /// Rebind to a different resource. Tears the current session down
    /// completely (stop, unsubscribe, id cleared) before anything touches
    /// the replacement instance.
    pub fn set_resource(&mut self, resource: ResourceRef) -> Result<()> {
        self.teardown();
        debug!(old = %self.resource, new = %resource, "rebinding to new resource");

        let subscription = self.engine.subscribe();
        let instance = match self.engine.create(&resource) {
            Ok(instance) => instance,
            Err(e) => {
                self.engine.unsubscribe(subscription.id);
                return Err(e);
            }
        };
        debug!(%instance, resource = %resource, "created play instance");

        self.resource = resource;
        self.subscription = Some(subscription);
        self.session = PlaySession::new(instance, self.intended.start_playing());
        if let Some(volume) = self.intended.volume {
            self.engine.set_volume(volume, instance);
            self.session.applied.volume = Some(volume);
        }
        if !self.intended.start_playing() {
            self.engine.pause(instance);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: EngineEvent) {
        // The engine may still deliver events for a replaced instance during
        // the window around teardown/recreation. Not ours, not surfaced.
        if !self.session.owns(event.instance) {
            trace!(
                instance = %event.instance,
                kind = event.kind.name(),
                "discarding event for stale instance"
            );
            return;
        }

        trace!(instance = %event.instance, kind = event.kind.name(), "engine event");
        let unlocked_now = match &event.kind {
            EventKind::Play => self.session.unlock(),
            EventKind::Seek => {
                self.session.seek_confirmed();
                false
            }
            EventKind::PlayError { message } => {
                // Forwarded verbatim, never retried; the gate stays shut.
                warn!(instance = %event.instance, error = %message, "play error");
                false
            }
            _ => false,
        };

        self.callbacks.dispatch(&event.kind);

        if unlocked_now {
            debug!(instance = %event.instance, "unlocked; applying deferred directives");
            self.reconcile();
        }
    }

    /// One reconciliation pass: transport first, then the independent
    /// dimensions, each gated on a real change.
    fn reconcile(&mut self) {
        let Some(instance) = self.session.instance else {
            return;
        };
        if !self.session.gate.is_unlocked() {
            trace!(%instance, "still locked; deferring reconciliation");
            return;
        }
        self.reconcile_transport(instance);
        self.reconcile_dimensions(instance);
    }

    fn reconcile_transport(&mut self, instance: InstanceId) {
        if self.intended.stop {
            // Terminal while the intent holds: one stop per episode, and no
            // play/pause reconciliation underneath it.
            if !self.session.stopped_once {
                debug!(%instance, "stop");
                self.engine.stop(instance);
                self.session.confirmed_playing = false;
                self.session.stopped_once = true;
            }
            return;
        }
        if self.session.confirmed_playing && self.intended.pause {
            debug!(%instance, "pause");
            self.engine.pause(instance);
            self.session.confirmed_playing = false;
        } else if !self.session.confirmed_playing && !self.intended.pause {
            debug!(%instance, "play");
            self.engine.play(instance);
            self.session.confirmed_playing = true;
        }
    }

    fn reconcile_dimensions(&mut self, instance: InstanceId) {
        if let Some(mute) = self.intended.mute {
            if self.session.applied.mute != Some(mute) {
                debug!(%instance, mute, "mute");
                self.engine.set_mute(mute, instance);
                self.session.applied.mute = Some(mute);
            }
        }
        if let Some(volume) = self.intended.volume {
            if self.session.applied.volume != Some(volume) {
                debug!(%instance, volume, "volume");
                self.engine.set_volume(volume, instance);
                self.session.applied.volume = Some(volume);
            }
        }
        if let Some(position) = self.intended.seek {
            if self.session.applied.seek != Some(position) {
                debug!(%instance, position, "seek");
                // Optimistic: queries report the target until the engine
                // confirms, so a poll right after never sees a stale value.
                self.session.seeking = true;
                self.session.seek_target = Some(position);
                self.engine.seek_to(position, instance);
                self.session.applied.seek = Some(position);
            }
        }
        if let Some(fade) = self.intended.fade {
            if self.session.applied.fade != Some(fade) {
                debug!(%instance, from = fade.from, to = fade.to, ms = fade.duration_ms, "fade");
                self.engine.fade(fade, instance);
                self.session.applied.fade = Some(fade);
            }
        }
        if let Some(rate) = self.intended.rate {
            let rate = if rate == 0.0 { 1.0 } else { rate };
            if self.session.applied.rate != Some(rate) {
                debug!(%instance, rate, "rate");
                self.engine.set_rate(rate, instance);
                self.session.applied.rate = Some(rate);
            }
        }
        if let Some(looping) = self.intended.looping {
            if self.session.applied.looping != Some(looping) {
                debug!(%instance, looping, "loop");
                self.engine.set_loop(looping, instance);
                self.session.applied.looping = Some(looping);
            }
        }
    }

    /// Stop the instance (idempotent at the engine boundary), drop the event
    /// subscription, clear the id. After this, no engine call can address
    /// the old instance through this controller.
    fn teardown(&mut self) {
        if let Some(instance) = self.session.instance.take() {
            debug!(%instance, "tearing down session");
            self.engine.stop(instance);
        }
        if let Some(subscription) = self.subscription.take() {
            self.engine.unsubscribe(subscription.id);
        }
    }
}

impl<E: SoundEngine> Drop for PlaybackController<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<E: SoundEngine> std::fmt::Debug for PlaybackController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("resource", &self.resource)
            .field("session", &self.session)
            .field("intended", &self.intended)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod proptests {
    use super::*;
    use crate::testutil::{Call, FakeEngine};
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn directives() -> impl Strategy<Value = Directives> {
        (
            any::<bool>(),
            any::<bool>(),
            proptest::option::of(any::<bool>()),
            proptest::option::of(0.0f64..=1.0),
            proptest::option::of(0.0f64..600.0),
            proptest::option::of(0.5f64..=4.0),
            proptest::option::of(any::<bool>()),
        )
            .prop_map(|(pause, stop, mute, volume, seek, rate, looping)| Directives {
                pause,
                stop,
                mute,
                volume,
                seek,
                rate,
                looping,
                fade: None,
            })
    }

    proptest! {
        /// No directive sequence can reach the engine before unlock.
        #[test]
        fn prop_pre_unlock_silence(sequence in vec(directives(), 0..12)) {
            let engine = Arc::new(FakeEngine::new());
            let mut controller = PlaybackController::new(
                engine.clone(),
                SessionOptions::new(ResourceRef::new("clip.webm")),
            )
            .unwrap();
            engine.take_calls();

            for directives in sequence {
                controller.apply(directives);
            }
            prop_assert!(engine.mutating_calls().is_empty());
        }

        /// One stop call per intended-stop episode, regardless of how many
        /// reconciliation passes run while the intent holds.
        #[test]
        fn prop_stop_once_per_episode(sequence in vec(directives(), 1..16)) {
            let engine = Arc::new(FakeEngine::new());
            let mut controller = PlaybackController::new(
                engine.clone(),
                SessionOptions::new(ResourceRef::new("clip.webm")),
            )
            .unwrap();
            let id = controller.session().instance().unwrap();
            engine.emit(id, EventKind::Play);
            controller.pump_events();
            engine.take_calls();

            let mut episodes = 0;
            let mut previous_stop = false;
            for directives in sequence {
                if directives.stop && !previous_stop {
                    episodes += 1;
                }
                previous_stop = directives.stop;
                controller.apply(directives);
            }

            let stops = engine
                .calls()
                .iter()
                .filter(|c| matches!(c, Call::Stop(_)))
                .count();
            prop_assert_eq!(stops, episodes);
        }
    }
}
