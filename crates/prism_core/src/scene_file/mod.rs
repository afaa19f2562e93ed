//! Scene file reading and writing.
//!
//! The format is line oriented. `#` starts a comment. A line that begins in
//! column 0 is a command; the indented lines below it are its attributes:
//!
//! ```text
//! material
//!   name       glass
//!   diffuse    0.1 0.1 0.1
//!   specular   0.9 0.9 0.9
//!   shininess  400
//!   glossiness 1
//!   alpha      0.2
//! sphere
//!   centre   0 0 0
//!   radius   1
//!   material glass
//! wavefront models/teapot.obj
//! light
//!   position 10 10 10
//!   colour   1 1 1
//! eye
//!   position 0 0 8
//!   lookat   0 0 0
//!   up       0 1 0
//!   fovy     45
//! ```
//!
//! Commands are `material`, `sphere`, `triangle`, `wavefront`, `light` and
//! `eye`. Anything else is an error naming the offending token.

mod reader;
mod wavefront;
mod writer;

use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;
use crate::texture::TextureError;

pub use reader::parse_scene;
pub use wavefront::{load_wavefront, parse_wavefront};

/// Errors that can occur while reading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: command '{command}' not recognized")]
    UnknownCommand { line: usize, command: String },

    #[error("Line {line}: '{attribute}' is not an attribute of {record}")]
    UnknownAttribute {
        line: usize,
        record: &'static str,
        attribute: String,
    },

    #[error("Line {line}: attribute line outside of any command")]
    AttributeOutsideRecord { line: usize },

    #[error("Line {line}: {record} is missing '{field}'")]
    MissingField {
        line: usize,
        record: &'static str,
        field: &'static str,
    },

    #[error("Line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("Line {line}: '{attribute}' expects {expected} values, found {found}")]
    WrongArity {
        line: usize,
        attribute: String,
        expected: &'static str,
        found: usize,
    },

    #[error("Line {line}: material '{name}' has not been declared")]
    UnknownMaterial { line: usize, name: String },

    #[error("No lights were provided in {0} so the scene would be black")]
    NoLights(String),

    #[error("No eye was provided in {0}")]
    NoEye(String),

    #[error("Failed to load wavefront object {path}: {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("Wavefront object {0} contains no triangles")]
    EmptyObj(String),

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Load a scene file. Relative paths inside it resolve against its directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let scene = parse_scene(&content, name, base_dir)?;

    log::info!(
        "Loaded scene '{}': {} shapes ({} primitives), {} lights, {} materials",
        scene.name,
        scene.shapes.len(),
        scene.primitive_count(),
        scene.lights.len(),
        scene.materials.len()
    );

    Ok(scene)
}
