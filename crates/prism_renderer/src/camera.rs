//! Image plane construction from the eye.

use prism_core::Eye;
use prism_math::{Ray, Vec3};

/// Pixel grid in world space, one unit in front of the eye.
///
/// Pixel `(x, y)` with `y = 0` at the bottom lies at
/// `lower_left + x * right + y * up`.
#[derive(Clone, Copy, Debug)]
pub struct ImagePlane {
    pub origin: Vec3,
    pub lower_left: Vec3,
    /// Step between adjacent columns
    pub right: Vec3,
    /// Step between adjacent rows
    pub up: Vec3,
    pub width: u32,
    pub height: u32,
}

impl ImagePlane {
    pub fn new(eye: &Eye, width: u32, height: u32) -> Self {
        let scale = 2.0 * (eye.fovy / 2.0).tan();
        let aspect = width as f32 / height.max(1) as f32;
        let forward = eye.look_at - eye.position;

        let up = scale * eye.up.normalize_or_zero();
        let right = scale * aspect * forward.cross(eye.up).normalize_or_zero();
        let lower_left = forward.normalize_or_zero() - 0.5 * up - 0.5 * right;

        Self {
            origin: eye.position,
            lower_left,
            right: right / width.saturating_sub(1).max(1) as f32,
            up: up / height.saturating_sub(1).max(1) as f32,
            width,
            height,
        }
    }

    /// Unit direction through the image-plane point `(x, y)` in pixel units.
    pub fn direction(&self, x: f32, y: f32) -> Vec3 {
        (self.lower_left + x * self.right + y * self.up).normalize()
    }

    pub fn ray(&self, x: f32, y: f32) -> Ray {
        Ray::new(self.origin, self.direction(x, y))
    }
}
