//! Scene description types.
//!
//! A `SceneDescription` is what the scene file reader produces: the eye,
//! the point lights, the declared materials and the shapes in file order.
//! The renderer builds its intersectable objects from it.

use std::sync::Arc;

use prism_math::{Vec2, Vec3};

use crate::light::{Eye, PointLight};
use crate::material::Material;
use crate::mesh::Mesh;

/// A wavefront object loaded from an OBJ file.
#[derive(Clone, Debug)]
pub struct Wavefront {
    /// Path as written in the scene file
    pub path: String,

    /// Merged geometry of every model in the file
    pub mesh: Arc<Mesh>,

    /// Material slots referenced by `mesh.face_materials`
    pub materials: Vec<Arc<Material>>,

    /// Scene material that replaced the OBJ's own materials, if any
    pub material_override: Option<String>,
}

/// One geometric object of the scene, in file order.
#[derive(Clone, Debug)]
pub enum Shape {
    Sphere {
        center: Vec3,
        radius: f32,
        material: Arc<Material>,
    },
    Triangle {
        vertices: [Vec3; 3],
        texcoords: Option<[Vec2; 3]>,
        material: Arc<Material>,
    },
    Wavefront(Wavefront),
}

impl Shape {
    /// Number of triangles or spheres this shape contributes.
    pub fn primitive_count(&self) -> usize {
        match self {
            Shape::Sphere { .. } | Shape::Triangle { .. } => 1,
            Shape::Wavefront(wavefront) => wavefront.mesh.triangle_count(),
        }
    }
}

/// A complete scene as described by a scene file.
#[derive(Clone, Debug)]
pub struct SceneDescription {
    /// Scene name (usually from filename)
    pub name: String,

    pub eye: Eye,

    pub lights: Vec<PointLight>,

    /// Materials declared in the scene file, in declaration order
    pub materials: Vec<Arc<Material>>,

    pub shapes: Vec<Shape>,

    /// Rough size of the scene, used to draw recorded rays that miss
    pub scene_scale: f32,
}

impl SceneDescription {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>, eye: Eye) -> Self {
        Self {
            name: name.into(),
            eye,
            lights: Vec::new(),
            materials: Vec::new(),
            shapes: Vec::new(),
            scene_scale: 1.0,
        }
    }

    /// Add a material to the scene and return the shared handle.
    pub fn add_material(&mut self, material: Material) -> Arc<Material> {
        let material = Arc::new(material);
        self.materials.push(material.clone());
        material
    }

    /// Look up a declared material by name. Later declarations shadow earlier ones.
    pub fn material(&self, name: &str) -> Option<&Arc<Material>> {
        self.materials.iter().rev().find(|m| m.name == name)
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Add a shape. Wavefront objects grow the scene scale to half their radius.
    pub fn add_shape(&mut self, shape: Shape) {
        if let Shape::Wavefront(wavefront) = &shape {
            self.scene_scale = self.scene_scale.max(wavefront.mesh.radius() / 2.0);
        }
        self.shapes.push(shape);
    }

    /// Get total primitive count across all shapes.
    pub fn primitive_count(&self) -> usize {
        self.shapes.iter().map(Shape::primitive_count).sum()
    }
}
