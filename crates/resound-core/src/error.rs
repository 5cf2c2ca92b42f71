//! Error types for Resound.

use thiserror::Error;

/// Result type alias using Resound's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Resound.
#[derive(Error, Debug)]
pub enum Error {
    /// The engine could not instantiate the resource, with whatever message
    /// the engine supplied.
    #[error("Engine failed to create instance: {0}")]
    Create(String),
}
