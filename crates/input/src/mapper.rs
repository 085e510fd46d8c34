use std::collections::HashSet;

use cubehunt_common::{Aim, ControllerId, InputSource};

use crate::camera::{AimCamera, Viewport};
use crate::event::InputEvent;

/// Tracked controllers supported at once (left and right hand).
pub const MAX_CONTROLLERS: u8 = 2;

/// Turns raw [`InputEvent`]s into [`Aim`]s.
///
/// Pointer and touch positions are unprojected through the flat camera.
/// Controller aims come from the pose carried on the select-start event, so
/// nothing is polled per frame. A controller that is still held does not fire
/// again until it reports select-end.
pub struct InputMapper {
    camera: AimCamera,
    viewport: Viewport,
    held: HashSet<ControllerId>,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(AimCamera::default(), Viewport::default())
    }
}

impl InputMapper {
    pub fn new(mut camera: AimCamera, viewport: Viewport) -> Self {
        camera.set_viewport(viewport);
        Self {
            camera,
            viewport,
            held: HashSet::new(),
        }
    }

    pub fn camera(&self) -> &AimCamera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_held(&self, controller: ControllerId) -> bool {
        self.held.contains(&controller)
    }

    /// Map one event. Returns `None` for events that do not shoot
    /// (resize, select-end, session start/end, repeated select-start,
    /// unknown controllers).
    pub fn map(&mut self, event: InputEvent) -> Option<Aim> {
        match event {
            InputEvent::Pointer { x, y } => Some(self.screen_aim(InputSource::Pointer, x, y)),
            InputEvent::Touch { x, y } => Some(self.screen_aim(InputSource::Touch, x, y)),
            InputEvent::ControllerSelectStart {
                controller,
                transform,
            } => {
                if controller.0 >= MAX_CONTROLLERS {
                    tracing::debug!(controller = controller.0, "ignoring unknown controller");
                    return None;
                }
                if !self.held.insert(controller) {
                    tracing::debug!(controller = controller.0, "select start while held");
                    return None;
                }
                Some(Aim {
                    source: InputSource::Controller(controller),
                    ray: transform.ray(),
                })
            }
            InputEvent::ControllerSelectEnd { controller } => {
                self.held.remove(&controller);
                None
            }
            InputEvent::Resize { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.camera.set_viewport(self.viewport);
                tracing::debug!(width, height, "viewport resized");
                None
            }
            InputEvent::SessionStart | InputEvent::SessionEnd => {
                self.release_all();
                None
            }
        }
    }

    /// Release every held controller, e.g. when an immersive session ends.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            tracing::debug!(held = self.held.len(), "releasing held controllers");
        }
        self.held.clear();
    }

    fn screen_aim(&self, source: InputSource, x: f32, y: f32) -> Aim {
        let ndc = self.viewport.to_ndc(x, y);
        Aim {
            source,
            ray: self.camera.ray_through(ndc),
        }
    }
}
