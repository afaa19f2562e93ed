use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box, stored as one interval per axis.
///
/// Meshes keep one of these to reject rays before testing their faces.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// An empty box that contains nothing; growing it by a point yields that point.
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// Smallest box enclosing every point, or `EMPTY` for no points.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        points
            .into_iter()
            .fold(Self::EMPTY, |bounds, p| bounds.grown_to(*p))
    }

    /// This box grown to include `p`.
    pub fn grown_to(&self, p: Vec3) -> Self {
        Self {
            x: Interval::new(self.x.min.min(p.x), self.x.max.max(p.x)),
            y: Interval::new(self.y.min.min(p.y), self.y.max.max(p.y)),
            z: Interval::new(self.z.min.min(p.z), self.z.max.max(p.z)),
        }
    }

    /// Returns true if the box contains no points.
    pub fn is_empty(&self) -> bool {
        self.x.min > self.x.max || self.y.min > self.y.max || self.z.min > self.z.max
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Half the length of the box diagonal.
    pub fn radius(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        0.5 * Vec3::new(self.x.size(), self.y.size(), self.z.size()).length()
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Uses the slab method. Flat boxes are handled by padding each slab
    /// by a small margin so axis-aligned triangles still register.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        const PAD: f32 = 1e-4;

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis];
            let mut t0 = (slab.min - PAD - r.origin[axis]) * adinv;
            let mut t1 = (slab.max + PAD - r.origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }
}
