//! Triangle mesh geometry for wavefront objects.
//!
//! This is the renderer-agnostic form of a loaded OBJ: merged vertex
//! arrays plus a material slot per triangle.

use prism_math::{Aabb, Vec2, Vec3};

/// A mesh consisting of vertex positions, normals, optional UVs and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals, one per vertex
    pub normals: Vec<Vec3>,

    /// UV coordinates, one per vertex if present
    pub uvs: Option<Vec<Vec2>>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Material slot of each triangle
    pub face_materials: Vec<usize>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a new mesh. Smooth normals are computed when `normals` is
    /// missing or does not have one entry per vertex.
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        normals: Option<Vec<Vec3>>,
        uvs: Option<Vec<Vec2>>,
        face_materials: Vec<usize>,
    ) -> Self {
        let bounds = Aabb::enclosing(positions.iter());
        let mut mesh = Self {
            positions,
            normals: Vec::new(),
            uvs,
            indices,
            face_materials,
            bounds,
        };

        match normals {
            Some(normals) if normals.len() == mesh.positions.len() => mesh.normals = normals,
            Some(normals) => {
                log::debug!(
                    "Normals array length ({}) doesn't match vertex count ({}), computing smooth normals",
                    normals.len(),
                    mesh.positions.len()
                );
                mesh.compute_normals();
            }
            None => mesh.compute_normals(),
        }

        mesh
    }

    /// Compute smooth vertex normals by averaging counter-clockwise face normals.
    pub fn compute_normals(&mut self) {
        let vertex_count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; vertex_count];

        for face in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];
            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                continue;
            }

            let p0 = self.positions[i0];
            let face_normal = (self.positions[i1] - p0).cross(self.positions[i2] - p0);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            // Default up normal for degenerate cases
            *normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }

        self.normals = normals;
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Vertex indices of triangle `face`.
    #[inline]
    pub fn face(&self, face: usize) -> [usize; 3] {
        let i = 3 * face;
        [
            self.indices[i] as usize,
            self.indices[i + 1] as usize,
            self.indices[i + 2] as usize,
        ]
    }

    /// Half the diagonal of the bounding box.
    pub fn radius(&self) -> f32 {
        self.bounds.radius()
    }
}
