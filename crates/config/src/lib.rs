//! Shared configuration for Applique
//!
//! This crate provides the single source of truth for the clothing-template
//! resolution, brush defaults, and export tunables shared by the decal and
//! bake crates and the CLI.

use serde::{Deserialize, Serialize};

/// Template canvas width in pixels (classic clothing sheet)
pub const TEMPLATE_WIDTH: u32 = 585;

/// Template canvas height in pixels (classic clothing sheet)
pub const TEMPLATE_HEIGHT: u32 = 559;

/// Default brush size in world units (tangent-plane edge of the decal box)
pub const DEFAULT_BRUSH_SIZE: f32 = 1.0;

/// Default depth factor: the decal box extent along the snapped normal, as a
/// fraction of the brush size. Kept below 1 so the box stays thin along the
/// normal and cannot balloon through to the opposite side of a part.
pub const DEFAULT_DEPTH_FACTOR: f32 = 0.5;

/// Default brush edge hardness (1.0 = hard-edged disc)
pub const DEFAULT_BRUSH_HARDNESS: f32 = 1.0;

/// Default paint color as a hex string
pub const DEFAULT_BRUSH_COLOR: &str = "#faa";

/// Alpha threshold below which brush-mask fragments are discarded
pub const DEFAULT_ALPHA_TEST: f32 = 0.993;

/// Default saturation boost applied after the linear→sRGB transform
pub const DEFAULT_SATURATION_BOOST: f32 = 1.15;

/// Forward view-space depth bias applied to decals during the bake so they
/// pass the depth test against the coincident part surface
pub const DEFAULT_DEPTH_BIAS: f32 = 0.05;

/// Default editor camera vertical field of view in degrees
pub const DEFAULT_CAMERA_FOV_DEG: f32 = 75.0;

/// Default editor camera distance from the rig origin
pub const DEFAULT_CAMERA_DISTANCE: f32 = 5.0;

/// Atlas template dimensions for the bake pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Atlas canvas width in pixels
    pub width: u32,
    /// Atlas canvas height in pixels
    pub height: u32,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            width: TEMPLATE_WIDTH,
            height: TEMPLATE_HEIGHT,
        }
    }
}

impl TemplateConfig {
    /// Create a template config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Get width as f32 for calculations
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Get height as f32 for calculations
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    /// Total pixel count of the atlas canvas
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Brush defaults for the paint session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Edge length of the decal box in the tangent plane, world units
    pub size: f32,
    /// Box extent along the snapped normal as a fraction of `size`
    pub depth_factor: f32,
    /// Brush-mask edge hardness (0.0 soft, 1.0 hard)
    pub hardness: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRUSH_SIZE,
            depth_factor: DEFAULT_DEPTH_FACTOR,
            hardness: DEFAULT_BRUSH_HARDNESS,
        }
    }
}

/// Export tunables for the bake pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Saturation boost factor applied after gamma correction
    pub saturation_boost: f32,
    /// Brush-mask alpha test threshold
    pub alpha_test: f32,
    /// Forward depth bias for decal rasterization, view-space units
    pub depth_bias: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            saturation_boost: DEFAULT_SATURATION_BOOST,
            alpha_test: DEFAULT_ALPHA_TEST,
            depth_bias: DEFAULT_DEPTH_BIAS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let config = TemplateConfig::default();
        assert_eq!(config.width, TEMPLATE_WIDTH);
        assert_eq!(config.height, TEMPLATE_HEIGHT);
        assert_eq!(config.pixel_count(), 585 * 559);
    }

    #[test]
    fn test_default_brush() {
        let brush = BrushConfig::default();
        assert_eq!(brush.size, DEFAULT_BRUSH_SIZE);
        assert_eq!(brush.hardness, DEFAULT_BRUSH_HARDNESS);
        assert!(brush.depth_factor < 1.0);
    }

    #[test]
    fn test_default_export() {
        let export = ExportConfig::default();
        assert_eq!(export.saturation_boost, DEFAULT_SATURATION_BOOST);
        assert_eq!(export.alpha_test, DEFAULT_ALPHA_TEST);
        assert!(export.depth_bias > 0.0);
    }
}
