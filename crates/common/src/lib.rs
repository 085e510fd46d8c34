//! Shared value types used across the cubehunt crates.
//!
//! # Invariants
//! - Types here carry no behavior that depends on session state.
//! - Every ray produced for the core has a normalized direction.

pub mod geometry;
pub mod types;

pub use geometry::{Aabb, Ray};
pub use types::{Aim, ControllerId, InputSource, SessionId, TargetId, Transform};
