//! Render image buffer.

use std::path::Path;

use image::{Rgba, RgbaImage};
use prism_math::{Interval, Vec3, Vec4};

use crate::error::{RenderError, RenderResult};

/// RGBA float pixels, row 0 at the bottom.
///
/// Alpha 0 marks a pixel that has not been rendered yet; rendered pixels
/// are opaque.
#[derive(Clone, Debug)]
pub struct RenderImage {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl RenderImage {
    /// Create a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }

    /// Store a rendered colour, making the pixel opaque.
    pub fn set(&mut self, x: u32, y: u32, colour: Vec3) {
        let i = self.index(x, y);
        self.pixels[i] = colour.extend(1.0);
    }

    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    pub fn is_rendered(&self, x: u32, y: u32) -> bool {
        self.get(x, y).w > 0.0
    }

    pub fn rendered_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.w > 0.0).count()
    }

    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Mutable pixels, bottom row first.
    pub(crate) fn pixels_mut(&mut self) -> &mut [Vec4] {
        &mut self.pixels
    }

    /// Convert to 8-bit RGBA with the top row first.
    ///
    /// Channels are clamped to [0, 1]; pending pixels stay transparent.
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, row| {
            let p = self.get(x, self.height - 1 - row);
            Rgba(p.to_array().map(|c| (Interval::UNIT.clamp(c) * 255.0).round() as u8))
        })
    }

    /// Save as PNG.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_rgba8().save(path).map_err(|source| RenderError::Image {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_is_transparent() {
        let image = RenderImage::new(4, 3);
        assert_eq!(image.pixels().len(), 12);
        assert_eq!(image.rendered_count(), 0);
        assert!(!image.is_rendered(3, 2));
    }

    #[test]
    fn test_set_makes_pixel_opaque() {
        let mut image = RenderImage::new(4, 3);
        image.set(1, 2, Vec3::new(0.2, 0.4, 0.6));

        assert!(image.is_rendered(1, 2));
        assert_eq!(image.get(1, 2), Vec4::new(0.2, 0.4, 0.6, 1.0));
        // Buffer index is x + y * width
        assert_eq!(image.pixels()[1 + 2 * 4].w, 1.0);
        assert_eq!(image.rendered_count(), 1);
    }

    #[test]
    fn test_to_rgba8_flips_and_clamps() {
        let mut image = RenderImage::new(2, 2);
        image.set(0, 0, Vec3::new(2.0, -1.0, 0.5));

        let rgba = image.to_rgba8();
        // Buffer row 0 is the bottom of the picture
        assert_eq!(rgba.get_pixel(0, 1).0, [255, 0, 128, 255]);
        assert_eq!(rgba.get_pixel(0, 0).0[3], 0);
        assert_eq!(rgba.get_pixel(1, 1).0[3], 0);
    }
}
