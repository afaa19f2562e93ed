//! Preview geometry for an external rasterising viewport.

use prism_math::Vec3;

/// Indexed triangles with per-vertex normals and one flat colour.
#[derive(Clone, Debug, Default)]
pub struct PreviewMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    /// Diffuse coefficient of the object's material
    pub colour: Vec3,
}

impl PreviewMesh {
    pub fn with_colour(colour: Vec3) -> Self {
        Self {
            colour,
            ..Default::default()
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
