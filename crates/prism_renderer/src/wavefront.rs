//! Triangle mesh objects loaded from wavefront files.

use std::sync::Arc;

use prism_core::{Material, Mesh, Wavefront};
use prism_math::{Aabb, Interval, Ray, Vec2, Vec3};

use crate::object::{Hit, Intersect};
use crate::preview::PreviewMesh;
use crate::triangle::moller_trumbore;

/// A wavefront mesh. Its triangles share one bounding box and are tested
/// one after another.
pub struct WavefrontObject {
    mesh: Arc<Mesh>,
    materials: Vec<Arc<Material>>,
}

impl WavefrontObject {
    /// Create a mesh object. An empty material list gets the fallback material.
    pub fn new(mesh: Arc<Mesh>, mut materials: Vec<Arc<Material>>) -> Self {
        if materials.is_empty() {
            materials.push(Arc::new(Material::fallback()));
        }
        Self { mesh, materials }
    }

    pub fn from_wavefront(wavefront: &Wavefront) -> Self {
        Self::new(wavefront.mesh.clone(), wavefront.materials.clone())
    }

    pub fn bounds(&self) -> &Aabb {
        &self.mesh.bounds
    }

    pub fn materials(&self) -> &[Arc<Material>] {
        &self.materials
    }

    fn face_material(&self, face: usize) -> &Material {
        let slot = self.mesh.face_materials.get(face).copied().unwrap_or(0);
        // Slot 0 always exists
        self.materials.get(slot).unwrap_or(&self.materials[0])
    }

    /// Corner positions, or `None` when an index is out of range.
    fn face_positions(&self, [i0, i1, i2]: [usize; 3]) -> Option<[Vec3; 3]> {
        let p = &self.mesh.positions;
        Some([*p.get(i0)?, *p.get(i1)?, *p.get(i2)?])
    }

    /// Smooth normal at `(w, u, v)`, falling back to the face normal when
    /// the mesh carries no normal for a corner.
    fn shading_normal(&self, [i0, i1, i2]: [usize; 3], positions: [Vec3; 3], (w, u, v): (f32, f32, f32)) -> Vec3 {
        let n = &self.mesh.normals;
        match (n.get(i0), n.get(i1), n.get(i2)) {
            (Some(n0), Some(n1), Some(n2)) => (w * *n0 + u * *n1 + v * *n2).normalize_or_zero(),
            _ => {
                let [p0, p1, p2] = positions;
                (p1 - p0).cross(p2 - p0).normalize_or_zero()
            }
        }
    }

    fn texcoords(&self, [i0, i1, i2]: [usize; 3], (w, u, v): (f32, f32, f32)) -> Vec2 {
        let Some(uvs) = &self.mesh.uvs else {
            return Vec2::ZERO;
        };
        match (uvs.get(i0), uvs.get(i1), uvs.get(i2)) {
            (Some(t0), Some(t1), Some(t2)) => w * *t0 + u * *t1 + v * *t2,
            _ => Vec2::ZERO,
        }
    }
}

impl Intersect for WavefrontObject {
    fn intersect<'a>(&'a self, ray: &Ray, exclude_part: Option<usize>, ray_t: Interval) -> Option<Hit<'a>> {
        if !self.mesh.bounds.hit(ray, ray_t) {
            return None;
        }

        let mut closest: Option<(usize, [Vec3; 3], f32, f32, f32)> = None;
        let mut bound = ray_t;

        for face in 0..self.mesh.triangle_count() {
            if exclude_part == Some(face) {
                continue;
            }
            // Faces with out-of-range indices are never hit
            let Some(positions) = self.face_positions(self.mesh.face(face)) else {
                continue;
            };
            if let Some((t, u, v)) = moller_trumbore(ray, positions, bound) {
                closest = Some((face, positions, t, u, v));
                bound = bound.with_max(t);
            }
        }

        let (face, positions, t, u, v) = closest?;
        let corners = self.mesh.face(face);
        let weights = (1.0 - u - v, u, v);

        Some(Hit {
            point: ray.at(t),
            normal: self.shading_normal(corners, positions, weights),
            texcoords: self.texcoords(corners, weights),
            t,
            object: 0,
            part: face,
            material: self.face_material(face),
        })
    }

    fn preview(&self) -> PreviewMesh {
        let mut mesh = PreviewMesh::with_colour(self.materials[0].diffuse);
        mesh.positions = self.mesh.positions.clone();
        mesh.normals = self.mesh.normals.clone();
        mesh.indices = self.mesh.indices.clone();
        mesh
    }
}
