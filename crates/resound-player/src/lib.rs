//! # resound-player
//!
//! Declarative playback control for Resound.
//!
//! A [`PlaybackController`] owns one play instance of a sound resource and
//! keeps an imperative [`SoundEngine`] converged with a declared
//! [`Directives`] value: prop diffs become a minimal, correctly ordered
//! sequence of engine calls, engine events are filtered back to the one
//! owned instance, and nothing mutating is issued before the engine's
//! asynchronous unlock confirms the instance is real.

pub mod callbacks;
pub mod controller;
pub mod directives;
pub mod engine;
pub mod info;
pub mod session;

#[cfg(test)]
pub(crate) mod testutil;

pub use callbacks::Callbacks;
pub use controller::{PlaybackController, SessionOptions};
pub use directives::{Directives, Fade};
pub use engine::{EngineEvent, EventKind, EventSubscription, SoundEngine, SubscriptionId};
pub use info::SoundInfo;
pub use session::{Gate, PlaySession};
