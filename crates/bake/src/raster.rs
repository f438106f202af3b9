//! Software triangle rasterization for the face passes.
//!
//! Edge-function fill with incremental barycentric weights over the render
//! surface's depth buffer. Two draw styles cover the bake scene: the opaque
//! depth-writing part clone, and alpha-blended decals that depth-test with a
//! forward bias.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::surface::RenderSurface;

/// Barycentric tolerance: slightly negative so shared edges don't leave gaps
const INSIDE_ERR: f32 = -0.0001;

/// Degenerate-triangle area cutoff in squared pixels
const MIN_AREA: f32 = 1e-5;

/// A vertex ready for rasterization
#[derive(Debug, Clone, Copy)]
pub struct RasterVertex {
    /// Screen x, screen y (bottom-up rows), view depth
    pub position: Vec3,
    /// Decal-space UV, interpolated for the brush mask
    pub uv: Vec2,
}

impl RasterVertex {
    pub fn new(screen: Vec2, depth: f32, uv: Vec2) -> Self {
        Self {
            position: Vec3::new(screen.x, screen.y, depth),
            uv,
        }
    }
}

/// Procedural brush mask evaluated in decal UV space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrushMask {
    /// No mask: the full wrap footprint paints at the color's alpha
    None,
    /// Disc centered on the footprint with a hardness-controlled edge
    Disc {
        /// 0.0 = soft linear falloff, 1.0 = hard edge
        hardness: f32,
    },
}

impl BrushMask {
    /// Mask alpha at a decal UV coordinate
    pub fn alpha_at(&self, uv: Vec2) -> f32 {
        match *self {
            BrushMask::None => 1.0,
            BrushMask::Disc { hardness } => {
                // Normalized distance: 0 at the footprint center, 1 at the
                // inscribed circle's edge
                let t = (uv - Vec2::splat(0.5)).length() * 2.0;
                hardness_falloff(t, hardness)
            }
        }
    }
}

/// Falloff for a brush edge.
///
/// `distance_normalized` is 0 at center, 1 at edge; `hardness` blends
/// between a linear soft edge (0.0) and a hard cutoff (1.0).
#[inline]
pub fn hardness_falloff(distance_normalized: f32, hardness: f32) -> f32 {
    if distance_normalized > 1.0 {
        return 0.0;
    }
    if hardness >= 1.0 {
        1.0
    } else {
        let t = distance_normalized.clamp(0.0, 1.0);
        let soft = 1.0 - t;
        soft * (1.0 - hardness) + hardness
    }
}

/// How fragments of a triangle hit the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    /// Opaque write that also stores fragment depth
    pub depth_write: bool,
    /// Reject fragments behind the stored depth
    pub depth_test: bool,
    /// Subtracted from fragment depth before the test (pulls decals off
    /// their coincident surface)
    pub depth_bias: f32,
    /// Discard fragments whose mask alpha falls below this (0 disables)
    pub alpha_test: f32,
    pub mask: BrushMask,
}

impl DrawStyle {
    /// Style for the opaque part clone
    pub fn opaque() -> Self {
        Self {
            depth_write: true,
            depth_test: true,
            depth_bias: 0.0,
            alpha_test: 0.0,
            mask: BrushMask::None,
        }
    }

    /// Style for alpha-blended decals
    pub fn decal(depth_bias: f32, alpha_test: f32, mask: BrushMask) -> Self {
        Self {
            depth_write: false,
            depth_test: true,
            depth_bias,
            alpha_test,
            mask,
        }
    }
}

/// Fill one triangle into the surface.
///
/// Vertices are in screen space with view depth; color is straight RGBA in
/// [0, 1]. Pixel centers inside the triangle (with a small shared-edge
/// tolerance) are depth-tested, masked, and written or blended per `style`.
pub fn rasterize_triangle(
    surface: &mut RenderSurface,
    v1: RasterVertex,
    v2: RasterVertex,
    v3: RasterVertex,
    color: [f32; 4],
    style: &DrawStyle,
) {
    let (p1, p2, p3) = (v1.position, v2.position, v3.position);

    // Signed doubled area; degenerate triangles contribute nothing
    let area = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);
    if area.abs() < MIN_AREA {
        return;
    }
    let inv_area = 1.0 / area;

    let min_x = p1.x.min(p2.x).min(p3.x).floor().max(0.0) as u32;
    let min_y = p1.y.min(p2.y).min(p3.y).floor().max(0.0) as u32;
    let max_x = (p1.x.max(p2.x).max(p3.x).ceil() as i64).min(surface.width as i64 - 1);
    let max_y = (p1.y.max(p2.y).max(p3.y).ceil() as i64).min(surface.height as i64 - 1);
    if max_x < min_x as i64 || max_y < min_y as i64 {
        return;
    }
    let (max_x, max_y) = (max_x as u32, max_y as u32);

    // Edge coefficients for incremental barycentric evaluation
    let a0 = p2.y - p3.y;
    let b0 = p3.x - p2.x;
    let a1 = p3.y - p1.y;
    let b1 = p1.x - p3.x;

    for py in min_y..=max_y {
        let fy = py as f32 + 0.5;
        for px in min_x..=max_x {
            let fx = px as f32 + 0.5;

            let w0 = (a0 * (fx - p3.x) + b0 * (fy - p3.y)) * inv_area;
            let w1 = (a1 * (fx - p3.x) + b1 * (fy - p3.y)) * inv_area;
            let w2 = 1.0 - w0 - w1;
            if w0 < INSIDE_ERR || w1 < INSIDE_ERR || w2 < INSIDE_ERR {
                continue;
            }

            let depth = w0 * p1.z + w1 * p2.z + w2 * p3.z - style.depth_bias;
            if style.depth_test && depth >= surface.depth_at(px, py) {
                continue;
            }

            let mut opacity = 1.0;
            if style.mask != BrushMask::None || style.alpha_test > 0.0 {
                let uv = v1.uv * w0 + v2.uv * w1 + v3.uv * w2;
                let mask_alpha = style.mask.alpha_at(uv);
                if mask_alpha < style.alpha_test {
                    continue;
                }
                opacity = mask_alpha;
            }

            if style.depth_write {
                surface.set_pixel(px, py, [color[0], color[1], color[2], color[3] * opacity]);
                surface.set_depth(px, py, depth);
            } else {
                surface.blend_pixel(px, py, color, opacity);
            }
        }
    }
}
