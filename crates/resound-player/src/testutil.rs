//! Recording fake engine for tests.
//!
//! Stands in for the external backend: records every call in order, hands
//! out sequential instance ids, and lets tests emit lifecycle events at
//! chosen moments. Unlock is therefore fully test-controlled, which is how
//! the pre-unlock deferral paths get exercised.

use crate::directives::Fade;
use crate::engine::{
    EngineEvent, EventKind, EventSubscription, SoundEngine, SubscriptionId,
};
use crossbeam_channel::{unbounded, Sender};
use parking_lot::Mutex;
use resound_core::{Error, InstanceId, ResourceRef, Result};
use std::collections::HashMap;

/// Every engine call the fake has seen, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Create(ResourceRef),
    Play(InstanceId),
    Pause(InstanceId),
    Stop(InstanceId),
    Mute(bool, InstanceId),
    SetVolume(f64, InstanceId),
    SeekTo(f64, InstanceId),
    SetRate(f64, InstanceId),
    SetLoop(bool, InstanceId),
    Fade(Fade, InstanceId),
    Subscribe(SubscriptionId),
    Unsubscribe(SubscriptionId),
}

impl Call {
    /// Calls that mutate playback state, as opposed to bookkeeping
    /// (create/subscribe/unsubscribe).
    pub(crate) const fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Self::Create(_) | Self::Subscribe(_) | Self::Unsubscribe(_)
        )
    }
}

#[derive(Default)]
struct Inner {
    next_instance: u64,
    next_subscription: u64,
    calls: Vec<Call>,
    feeds: HashMap<SubscriptionId, Sender<EngineEvent>>,
    fail_create: Option<String>,
    volumes: HashMap<InstanceId, f64>,
    positions: HashMap<InstanceId, f64>,
    rates: HashMap<InstanceId, f64>,
    loops: HashMap<InstanceId, bool>,
    durations: HashMap<InstanceId, f64>,
    playing: HashMap<InstanceId, bool>,
}

#[derive(Default)]
pub(crate) struct FakeEngine {
    inner: Mutex<Inner>,
}

impl FakeEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make the next `create` fail with this message.
    pub(crate) fn fail_next_create(&self, message: &str) {
        self.inner.lock().fail_create = Some(message.to_owned());
    }

    /// Deliver an event to every open subscription, as the real feed does.
    pub(crate) fn emit(&self, instance: InstanceId, kind: EventKind) {
        let inner = self.inner.lock();
        for sender in inner.feeds.values() {
            let _ = sender.send(EngineEvent::new(instance, kind.clone()));
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.inner.lock().calls.clone()
    }

    pub(crate) fn mutating_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_mutating)
            .collect()
    }

    /// Drain the recorded calls so the next assertion starts clean.
    pub(crate) fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut self.inner.lock().calls)
    }

    pub(crate) fn set_duration(&self, id: InstanceId, seconds: f64) {
        self.inner.lock().durations.insert(id, seconds);
    }

    pub(crate) fn set_position(&self, id: InstanceId, seconds: f64) {
        self.inner.lock().positions.insert(id, seconds);
    }

    pub(crate) fn set_playing(&self, id: InstanceId, playing: bool) {
        self.inner.lock().playing.insert(id, playing);
    }

    pub(crate) fn open_feeds(&self) -> usize {
        self.inner.lock().feeds.len()
    }
}

impl SoundEngine for FakeEngine {
    fn create(&self, resource: &ResourceRef) -> Result<InstanceId> {
        let mut inner = self.inner.lock();
        if let Some(message) = inner.fail_create.take() {
            return Err(Error::Create(message));
        }
        inner.next_instance += 1;
        let id = InstanceId::new(inner.next_instance);
        inner.calls.push(Call::Create(resource.clone()));
        Ok(id)
    }

    fn play(&self, id: InstanceId) {
        self.inner.lock().calls.push(Call::Play(id));
    }

    fn pause(&self, id: InstanceId) {
        self.inner.lock().calls.push(Call::Pause(id));
    }

    fn stop(&self, id: InstanceId) {
        let mut inner = self.inner.lock();
        inner.playing.insert(id, false);
        inner.calls.push(Call::Stop(id));
    }

    fn set_mute(&self, muted: bool, id: InstanceId) {
        self.inner.lock().calls.push(Call::Mute(muted, id));
    }

    fn set_volume(&self, volume: f64, id: InstanceId) {
        let mut inner = self.inner.lock();
        inner.volumes.insert(id, volume);
        inner.calls.push(Call::SetVolume(volume, id));
    }

    fn volume(&self, id: InstanceId) -> Option<f64> {
        self.inner.lock().volumes.get(&id).copied()
    }

    fn seek_to(&self, position: f64, id: InstanceId) {
        self.inner.lock().calls.push(Call::SeekTo(position, id));
    }

    fn seek(&self, id: InstanceId) -> Option<f64> {
        self.inner.lock().positions.get(&id).copied()
    }

    fn set_rate(&self, rate: f64, id: InstanceId) {
        let mut inner = self.inner.lock();
        inner.rates.insert(id, rate);
        inner.calls.push(Call::SetRate(rate, id));
    }

    fn rate(&self, id: InstanceId) -> Option<f64> {
        self.inner.lock().rates.get(&id).copied()
    }

    fn set_loop(&self, looping: bool, id: InstanceId) {
        let mut inner = self.inner.lock();
        inner.loops.insert(id, looping);
        inner.calls.push(Call::SetLoop(looping, id));
    }

    fn looping(&self, id: InstanceId) -> Option<bool> {
        self.inner.lock().loops.get(&id).copied()
    }

    fn fade(&self, fade: Fade, id: InstanceId) {
        self.inner.lock().calls.push(Call::Fade(fade, id));
    }

    fn duration(&self, id: InstanceId) -> Option<f64> {
        self.inner.lock().durations.get(&id).copied()
    }

    fn playing(&self, id: InstanceId) -> Option<bool> {
        self.inner.lock().playing.get(&id).copied()
    }

    fn subscribe(&self) -> EventSubscription {
        let mut inner = self.inner.lock();
        inner.next_subscription += 1;
        let id = SubscriptionId::new(inner.next_subscription);
        let (sender, receiver) = unbounded();
        inner.feeds.insert(id, sender);
        inner.calls.push(Call::Subscribe(id));
        EventSubscription { id, receiver }
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.lock();
        inner.feeds.remove(&id);
        inner.calls.push(Call::Unsubscribe(id));
    }
}
