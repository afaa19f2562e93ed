//! Sphere primitive.

use std::f32::consts::PI;
use std::sync::Arc;

use prism_core::Material;
use prism_math::{Interval, Ray, Vec2, Vec3};

use crate::object::{Hit, Intersect};
use crate::preview::PreviewMesh;

/// Latitude bands used for the preview tessellation.
const PREVIEW_BANDS: u32 = 16;

pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Spherical texture coordinates for a unit vector from the centre.
    fn sphere_uv(p: Vec3) -> Vec2 {
        // theta: angle down from +Y, phi: angle around Y from +X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;
        Vec2::new(phi / (2.0 * PI), theta / PI)
    }
}

impl Intersect for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray, _exclude_part: Option<usize>, ray_t: Interval) -> Option<Hit<'a>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        let normal = (point - self.center) / self.radius;

        Some(Hit {
            point,
            normal,
            texcoords: Self::sphere_uv(normal),
            t: root,
            object: 0,
            part: 0,
            material: &self.material,
        })
    }

    fn preview(&self) -> PreviewMesh {
        let bands = PREVIEW_BANDS;
        let segments = 2 * PREVIEW_BANDS;
        let mut mesh = PreviewMesh::with_colour(self.material.diffuse);

        for lat in 0..=bands {
            let theta = PI * lat as f32 / bands as f32;
            for lon in 0..=segments {
                let phi = 2.0 * PI * lon as f32 / segments as f32;
                let normal = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
                mesh.positions.push(self.center + self.radius * normal);
                mesh.normals.push(normal);
            }
        }

        let stride = segments + 1;
        for lat in 0..bands {
            for lon in 0..segments {
                let i0 = lat * stride + lon;
                let i1 = i0 + stride;
                mesh.indices.extend_from_slice(&[i0, i0 + 1, i1, i0 + 1, i1 + 1, i1]);
            }
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, Arc::new(Material::fallback()))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere
            .intersect(&ray, None, Interval::new(1e-4, f32::INFINITY))
            .expect("ray points at the sphere");

        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert_eq!(hit.material.name, "default");
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(sphere.intersect(&ray, None, Interval::new(1e-4, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_inside_hit_reports_outward_normal() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::X);

        let hit = sphere
            .intersect(&ray, None, Interval::new(1e-4, f32::INFINITY))
            .expect("ray starts inside");
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!(hit.normal.dot(ray.direction()) > 0.0);
    }

    #[test]
    fn test_interval_limits_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect(&ray, None, Interval::new(1e-4, 0.5)).is_none());
    }

    #[test]
    fn test_preview_tessellation() {
        let preview = unit_sphere().preview();
        assert_eq!(preview.positions.len(), preview.normals.len());
        assert_eq!(preview.triangle_count() as u32, 2 * PREVIEW_BANDS * 2 * PREVIEW_BANDS);
        for p in &preview.positions {
            assert!(((*p - Vec3::new(0.0, 0.0, -2.0)).length() - 1.0).abs() < 1e-4);
        }
    }
}
