//! Debug ray recording.
//!
//! While armed, the resolver appends every ray it answers together with a
//! colour class, so a viewer can draw the ray tree of one pixel.

use prism_math::{Ray, Vec3};

/// What a recorded ray was for and whether it hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RayClass {
    /// Shadow ray toward a light, blocked or not
    Shadow,
    /// Primary, reflected or refracted ray that hit something
    Hit,
    /// Primary, reflected or refracted ray that escaped
    Miss,
}

impl RayClass {
    pub fn colour(self) -> Vec3 {
        match self {
            RayClass::Shadow => Vec3::new(0.843, 0.710, 0.278),
            RayClass::Hit => Vec3::new(0.1, 0.7, 0.7),
            RayClass::Miss => Vec3::new(0.3, 0.3, 0.3),
        }
    }
}

/// Why the resolver was asked about a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RayPurpose {
    /// Primary, reflection, glossy or refraction ray
    Shading,
    /// Occlusion test toward a point on a light
    Shadow { target: Vec3 },
}

/// One recorded segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedRay {
    pub start: Vec3,
    pub end: Vec3,
    pub class: RayClass,
}

impl RecordedRay {
    pub fn colour(&self) -> Vec3 {
        self.class.colour()
    }
}

/// Owned log of recorded rays.
#[derive(Clone, Debug, Default)]
pub struct RayRecorder {
    armed: bool,
    rays: Vec<RecordedRay>,
}

impl RayRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start recording and drop anything recorded before.
    pub fn arm(&mut self) {
        self.armed = true;
        self.rays.clear();
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Record `ray` if armed.
    ///
    /// A hit ends at the hit point. A missed shadow ray ends at its target,
    /// any other miss at `scene_scale * 2` along the direction.
    pub fn record(&mut self, ray: &Ray, purpose: RayPurpose, hit_point: Option<Vec3>, scene_scale: f32) {
        if !self.armed {
            return;
        }

        let start = ray.origin();
        let (end, class) = match (purpose, hit_point) {
            (RayPurpose::Shadow { .. }, Some(point)) => (point, RayClass::Shadow),
            (RayPurpose::Shadow { target }, None) => (target, RayClass::Shadow),
            (RayPurpose::Shading, Some(point)) => (point, RayClass::Hit),
            (RayPurpose::Shading, None) => (start + scene_scale * 2.0 * ray.direction(), RayClass::Miss),
        };

        self.rays.push(RecordedRay { start, end, class });
    }

    pub fn rays(&self) -> &[RecordedRay] {
        &self.rays
    }

    pub fn take(&mut self) -> Vec<RecordedRay> {
        std::mem::take(&mut self.rays)
    }
}
