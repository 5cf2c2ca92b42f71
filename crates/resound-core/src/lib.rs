//! # resound-core
//!
//! Core types, traits, and error handling for the Resound declarative
//! playback layer.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
