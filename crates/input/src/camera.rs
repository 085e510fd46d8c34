use cubehunt_common::Ray;
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Size of the drawable area in CSS/physical pixels, whichever the host reports events in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Pixel coordinates (origin top-left, y down) to normalized device
    /// coordinates (origin centre, y up, both axes in `[-1, 1]`).
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Vec2::new(x / w * 2.0 - 1.0, -(y / h * 2.0 - 1.0))
    }

    /// Inverse of [`Viewport::to_ndc`].
    pub fn to_pixels(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

/// Flat-mode perspective camera used to turn screen positions into rays.
pub struct AimCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for AimCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 3.0),
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            fov: 60.0_f32.to_radians(),
            aspect: Viewport::default().aspect(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl AimCamera {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Keep the projection in step with a resized viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Where a world point lands on screen, in normalized device coordinates.
    pub fn project(&self, point: Vec3) -> Vec2 {
        let clip = self.view_projection().project_point3(point);
        Vec2::new(clip.x, clip.y)
    }

    /// Ray from the camera through a point given in normalized device coordinates.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        // perspective_rh maps depth to [0, 1]; 1 is the far plane.
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far - self.position)
    }
}
