use std::collections::BTreeMap;

use cubehunt_common::TargetId;
use glam::Vec3;

use crate::backdrop::Background;

/// The scene graph as the game needs it: one cube per target plus a backdrop.
///
/// Calls for unknown ids are ignored by implementations.
pub trait Scene {
    fn add_target(&mut self, id: TargetId, position: Vec3, size: f32, color: u32);
    fn remove_target(&mut self, id: TargetId);
    fn set_position(&mut self, id: TargetId, position: Vec3);
    fn set_color(&mut self, id: TargetId, color: u32);
    fn set_opacity(&mut self, id: TargetId, opacity: f32);
    fn set_background(&mut self, background: Background);
    /// Static environment model by asset path; `None` shows the backdrop alone.
    fn set_environment(&mut self, model: Option<String>);
}

/// What a [`RecordingScene`] knows about one cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub position: Vec3,
    pub size: f32,
    pub color: u32,
    pub opacity: f32,
}

/// In-memory scene for headless runs.
#[derive(Debug, Default)]
pub struct RecordingScene {
    objects: BTreeMap<TargetId, SceneObject>,
    background: Option<Background>,
    environment: Option<String>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: TargetId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (&TargetId, &SceneObject)> {
        self.objects.iter()
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }
}

impl Scene for RecordingScene {
    fn add_target(&mut self, id: TargetId, position: Vec3, size: f32, color: u32) {
        self.objects.insert(
            id,
            SceneObject {
                position,
                size,
                color,
                opacity: 1.0,
            },
        );
    }

    fn remove_target(&mut self, id: TargetId) {
        self.objects.remove(&id);
    }

    fn set_position(&mut self, id: TargetId, position: Vec3) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.position = position;
        }
    }

    fn set_color(&mut self, id: TargetId, color: u32) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.color = color;
        }
    }

    fn set_opacity(&mut self, id: TargetId, opacity: f32) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn set_background(&mut self, background: Background) {
        self.background = Some(background);
    }

    fn set_environment(&mut self, model: Option<String>) {
        self.environment = model;
    }
}
