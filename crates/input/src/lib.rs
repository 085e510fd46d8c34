//! Input boundary: raw host events in, world-space aims out.
//!
//! # Invariants
//! - Pointer, touch and controller events share one `Aim` type; the game core
//!   never sees raw coordinates or controller handles.
//! - One aim per click, per touch start, per controller select start.

pub mod camera;
pub mod event;
pub mod mapper;

pub use camera::{AimCamera, Viewport};
pub use event::InputEvent;
pub use mapper::InputMapper;
