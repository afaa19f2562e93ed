//! Vector helpers used by the shading code.

use crate::Vec3;

/// Extra operations on `Vec3` that glam does not provide directly.
pub trait VectorExt {
    /// Mirror `self` about the unit normal `n`: `2(v·n)n - v`.
    ///
    /// Both vectors point away from the surface.
    fn reflect_about(self, n: Vec3) -> Vec3;

    /// A unit vector perpendicular to `self`.
    fn perp1(self) -> Vec3;

    /// A unit vector perpendicular to both `self` and `self.perp1()`.
    fn perp2(self) -> Vec3;
}

impl VectorExt for Vec3 {
    #[inline]
    fn reflect_about(self, n: Vec3) -> Vec3 {
        2.0 * self.dot(n) * n - self
    }

    fn perp1(self) -> Vec3 {
        // Cross with the axis least aligned with self for a stable result
        let abs = self.abs();
        let axis = if abs.x <= abs.y && abs.x <= abs.z {
            Vec3::X
        } else if abs.y <= abs.z {
            Vec3::Y
        } else {
            Vec3::Z
        };
        self.cross(axis).normalize_or_zero()
    }

    fn perp2(self) -> Vec3 {
        self.cross(self.perp1()).normalize_or_zero()
    }
}
