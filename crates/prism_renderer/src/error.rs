//! Renderer error types.

use thiserror::Error;

/// Errors raised while setting up a render or writing its output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Material '{material}' has glossiness {value}, outside the range [0, 1]")]
    Glossiness { material: String, value: f32 },

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to write image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
