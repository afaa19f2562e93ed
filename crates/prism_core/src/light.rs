//! Point lights and the viewing eye.

use prism_math::Vec3;

/// An explicit point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub colour: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3, colour: Vec3) -> Self {
        Self { position, colour }
    }
}

/// The viewer: position, look-at point, up direction and vertical field of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eye {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fovy: f32,
}

impl Eye {
    pub fn new(position: Vec3, look_at: Vec3, up: Vec3, fovy: f32) -> Self {
        Self {
            position,
            look_at,
            up,
            fovy,
        }
    }

    /// Unit vector from the eye toward the look-at point.
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize()
    }
}

impl Default for Eye {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 45.0_f32.to_radians(),
        }
    }
}
