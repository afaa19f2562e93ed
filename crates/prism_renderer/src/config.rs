//! Render configuration.

use std::fmt;

use prism_math::{UVec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Settings shared by every pixel of a render.
///
/// Missing fields take their defaults when read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Deepest ray allowed; primary rays are depth 1
    pub max_depth: u32,
    /// Rays cast inside the glossy cone (1 means a single mirror ray)
    pub glossy_samples: u32,
    /// Samples per pixel axis; each pixel averages the square of this
    pub pixel_samples: u32,
    /// Stratify pixel samples into sub-cells
    pub jitter: bool,
    /// Points sampled on each emissive triangle
    pub area_light_samples: u32,
    /// Ambient light (Ia)
    pub ambient: Vec3,
    /// Colour seen by primary rays that miss everything
    pub background: Vec3,
    /// Fraction of image columns between progress refreshes
    pub update_interval: f32,
    /// Pixel traced with verbose logging
    pub debug_pixel: Option<UVec2>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            glossy_samples: 1,
            pixel_samples: 1,
            jitter: false,
            area_light_samples: 50,
            ambient: Vec3::ONE,
            background: Vec3::ONE,
            update_interval: 0.05,
            debug_pixel: None,
        }
    }
}

impl RenderConfig {
    /// Reject settings that would divide by zero or never refresh.
    pub fn validate(&self) -> RenderResult<()> {
        let counts = [
            ("glossy_samples", self.glossy_samples),
            ("pixel_samples", self.pixel_samples),
            ("area_light_samples", self.area_light_samples),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(RenderError::InvalidConfig(format!("{name} must be at least 1")));
            }
        }

        if !(self.update_interval > 0.0 && self.update_interval <= 1.0) {
            return Err(RenderError::InvalidConfig(format!(
                "update_interval {} must be in (0, 1]",
                self.update_interval
            )));
        }

        Ok(())
    }

    /// Number of primary rays per pixel.
    pub fn rays_per_pixel(&self) -> u32 {
        self.pixel_samples * self.pixel_samples
    }
}

impl fmt::Display for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth {}, glossy {}", self.max_depth, self.glossy_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.to_string(), "depth 5, glossy 1");
        assert_eq!(config.rays_per_pixel(), 1);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let config = RenderConfig {
            pixel_samples: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        let config = RenderConfig {
            update_interval: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "max_depth": 2, "background": [0.0, 0.0, 0.5] }"#).unwrap();

        assert_eq!(config.max_depth, 2);
        assert_eq!(config.background, Vec3::new(0.0, 0.0, 0.5));
        assert_eq!(config.area_light_samples, 50);
        assert!(config.debug_pixel.is_none());
    }

    #[test]
    fn test_json_round_trip_keeps_debug_pixel() {
        let config = RenderConfig {
            debug_pixel: Some(UVec2::new(3, 4)),
            jitter: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: RenderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
