//! Play-instance identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque id for one play instance, assigned by the engine when the
/// instance is created. One addressable occurrence of a resource being
/// rendered; the same resource can have many live instances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
