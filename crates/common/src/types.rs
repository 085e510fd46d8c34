use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Ray;

/// Identity of a target within a session's registry.
///
/// Ids are handed out in spawn order and never reused within a session, so
/// ordering by id is ordering by spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of one game session. A new id is minted on every reset, which
/// lets delayed work scheduled by an older session recognise itself as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Rigid pose: position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Local -Z rotated into world space (the pointing direction of a tracked controller).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Ray from the pose's origin along its forward axis.
    pub fn ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }
}

/// Which of the two tracked controllers produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControllerId(pub u8);

/// Where an aim came from. Pointer and touch are flat-screen sources, the
/// controller is only live during an immersive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    Pointer,
    Touch,
    Controller(ControllerId),
}

impl InputSource {
    /// Whether this source is tracked by the immersive runtime rather than the flat screen.
    pub fn is_immersive(&self) -> bool {
        matches!(self, Self::Controller(_))
    }
}

/// A normalized world-space shot: one per input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    pub source: InputSource,
    pub ray: Ray,
}
