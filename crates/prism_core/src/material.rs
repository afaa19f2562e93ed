//! Phong material description.

use std::sync::Arc;

use prism_math::{Vec2, Vec3, Vec4};

use crate::texture::Texture;

/// Surface material shared by every object or face that names it.
///
/// Coefficients are RGB triples. A material is never changed while a render
/// is in progress; holders keep it behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Material {
    /// Material name, used by scene files to refer to it
    pub name: String,

    /// Ambient coefficient (ka)
    pub ambient: Vec3,

    /// Diffuse coefficient (kd), multiplied by the texture colour
    pub diffuse: Vec3,

    /// Specular coefficient (ks)
    pub specular: Vec3,

    /// Specular exponent (n)
    pub shininess: f32,

    /// Emitted radiance (Ie); non-zero makes a triangle an area light
    pub emission: Vec3,

    /// Glossiness in [0, 1]: 1 is a perfect mirror, 0 disables reflection rays
    pub glossiness: f32,

    /// Opacity in [0, 1]: below 1 the surface blends in a refracted ray
    pub alpha: f32,

    /// Optional diffuse texture
    pub texture: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::ZERO,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            shininess: 1.0,
            emission: Vec3::ZERO,
            glossiness: 0.0,
            alpha: 1.0,
            texture: None,
        }
    }
}

impl Material {
    /// Create a new material with just a name and diffuse coefficient.
    pub fn new(name: impl Into<String>, diffuse: Vec3) -> Self {
        Self {
            name: name.into(),
            diffuse,
            ..Default::default()
        }
    }

    /// The grey material given to mesh faces that do not name one.
    pub fn fallback() -> Self {
        Self {
            name: "default".to_string(),
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::splat(0.6),
            specular: Vec3::splat(0.2),
            shininess: 20.0,
            ..Default::default()
        }
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.length_squared() > 0.0
    }

    /// Colour and alpha of the texture at `uv`, or opaque white.
    pub fn texture_colour(&self, uv: Vec2) -> (Vec3, f32) {
        match &self.texture {
            Some(texture) => {
                let rgba: Vec4 = texture.sample(uv);
                (rgba.truncate(), rgba.w)
            }
            None => (Vec3::ONE, 1.0),
        }
    }
}
