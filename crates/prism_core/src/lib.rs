//! Prism Core - Scene description and file loading for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `SceneDescription`, `Shape`, `Material`, `PointLight`, `Eye`
//! - **Geometry**: `Mesh` for triangulated wavefront objects
//! - **Textures**: `Texture` and a path-keyed `TextureCache`
//! - **Scene files**: reading and writing the line-oriented scene format
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let scene = load_scene("scenes/spheres.txt")?;
//! println!("Loaded {} shapes, {} lights", scene.shapes.len(), scene.lights.len());
//! ```

pub mod light;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod scene_file;
pub mod texture;

// Re-export commonly used types
pub use light::{Eye, PointLight};
pub use material::Material;
pub use mesh::Mesh;
pub use scene::{SceneDescription, Shape, Wavefront};
pub use scene_file::{load_scene, parse_scene, SceneError, SceneResult};
pub use texture::{Texture, TextureCache, TextureError};
