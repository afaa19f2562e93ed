//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use std::sync::Arc;

use prism_core::Material;
use prism_math::{Interval, Ray, Vec2, Vec3};

use crate::object::{Hit, Intersect};
use crate::preview::PreviewMesh;

/// Möller-Trumbore test against the triangle `v`.
///
/// Returns `(t, u, v)` where `u` and `v` weight the second and third vertex.
pub(crate) fn moller_trumbore(ray: &Ray, v: [Vec3; 3], ray_t: Interval) -> Option<(f32, f32, f32)> {
    let edge1 = v[1] - v[0];
    let edge2 = v[2] - v[0];

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v[0];
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let w = f * ray.direction().dot(q);
    if w < 0.0 || u + w > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    ray_t.surrounds(t).then_some((t, u, w))
}

/// A single triangle with optional per-vertex texture coordinates.
pub struct Triangle {
    vertices: [Vec3; 3],
    texcoords: Option<[Vec2; 3]>,
    /// Face normal from the counter-clockwise winding
    normal: Vec3,
    material: Arc<Material>,
}

impl Triangle {
    pub fn new(vertices: [Vec3; 3], texcoords: Option<[Vec2; 3]>, material: Arc<Material>) -> Self {
        let normal = (vertices[1] - vertices[0])
            .cross(vertices[2] - vertices[0])
            .normalize_or_zero();

        Self {
            vertices,
            texcoords,
            normal,
            material,
        }
    }

    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.vertices
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Emitted radiance of the triangle's material.
    pub fn emission(&self) -> Vec3 {
        self.material.emission
    }

    /// Point `a·v0 + b·v1 + c·v2`.
    pub fn point_from_barycentric(&self, a: f32, b: f32, c: f32) -> Vec3 {
        a * self.vertices[0] + b * self.vertices[1] + c * self.vertices[2]
    }

    fn texcoords_at(&self, u: f32, v: f32) -> Vec2 {
        match &self.texcoords {
            Some(t) => (1.0 - u - v) * t[0] + u * t[1] + v * t[2],
            None => Vec2::new(u, v),
        }
    }
}

impl Intersect for Triangle {
    fn intersect<'a>(&'a self, ray: &Ray, _exclude_part: Option<usize>, ray_t: Interval) -> Option<Hit<'a>> {
        let (t, u, v) = moller_trumbore(ray, self.vertices, ray_t)?;

        Some(Hit {
            point: ray.at(t),
            normal: self.normal,
            texcoords: self.texcoords_at(u, v),
            t,
            object: 0,
            part: 0,
            material: &self.material,
        })
    }

    fn preview(&self) -> PreviewMesh {
        let mut mesh = PreviewMesh::with_colour(self.material.diffuse);
        mesh.positions.extend_from_slice(&self.vertices);
        mesh.normals.extend_from_slice(&[self.normal; 3]);
        mesh.indices.extend_from_slice(&[0, 1, 2]);
        mesh
    }
}
