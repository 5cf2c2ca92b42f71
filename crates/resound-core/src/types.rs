//! Core domain types for Resound.

pub mod instance;
pub mod load;
pub mod resource;

pub use instance::InstanceId;
pub use load::{LoadState, ResourceLoader};
pub use resource::{ResourceRef, Sprite};
