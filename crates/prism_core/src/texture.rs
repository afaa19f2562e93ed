//! Texture loading and caching for materials.
//!
//! Textures are decoded once through the `image` crate into RGBA floats in
//! [0, 1] and shared between every material that names the same file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use prism_math::{Vec2, Vec4};
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data as [R, G, B, A] per pixel, row-major, top row first
    pub pixels: Vec<[f32; 4]>,

    /// Original file path, also used when writing the scene back out
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Build a texture from 8-bit RGBA data.
    pub fn from_rgba8(image: &image::RgbaImage, path: impl Into<String>) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image
            .pixels()
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                ]
            })
            .collect();
        Self::new(width, height, pixels, path)
    }

    /// Sample the texture at UV coordinates with bilinear filtering.
    ///
    /// UVs wrap, with (0, 0) at the bottom-left. Returns RGBA.
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let u = uv.x.rem_euclid(1.0);
        let v = uv.y.rem_euclid(1.0);

        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0); // Flip V for image rows

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let top = self.get_pixel(x0, y0).lerp(self.get_pixel(x1, y0), fx);
        let bottom = self.get_pixel(x0, y1).lerp(self.get_pixel(x1, y1), fx);

        top.lerp(bottom, fy)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Vec4 {
        let idx = (y * self.width + x) as usize;
        self.pixels
            .get(idx)
            .copied()
            .map(Vec4::from)
            .unwrap_or(Vec4::new(0.0, 0.0, 0.0, 1.0))
    }
}

/// Cache for loaded textures, keyed by the path as written in the scene.
pub struct TextureCache {
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(load_texture_file(&full_path, path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!("Loaded texture: {} ({}x{})", path, texture.width, texture.height);

        Ok(texture)
    }

    /// Insert an already-decoded texture under `path`.
    pub fn insert(&mut self, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures.insert(texture.path.clone(), texture.clone());
        texture
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        match &self.base_dir {
            Some(base) if !path.is_absolute() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

fn load_texture_file(full_path: &Path, name: &str) -> TextureResult<Texture> {
    let img = image::open(full_path).map_err(|source| TextureError::Load {
        path: full_path.display().to_string(),
        source,
    })?;

    let texture = Texture::from_rgba8(&img.to_rgba8(), name);
    if texture.pixels.is_empty() {
        return Err(TextureError::Empty(name.to_string()));
    }
    Ok(texture)
}
