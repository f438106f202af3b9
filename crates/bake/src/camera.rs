//! Orthographic face cameras for the bake passes.
//!
//! Each face is rendered from a camera one unit out along its canonical
//! direction, looking at the origin through a fixed (-1..1, -1..1) frustum.
//! The in-plane (right, up) basis per face is a frozen table so every
//! atlas cell keeps the orientation the classic skin layout expects,
//! including the top and bottom views where a Y-up look-at has no
//! natural roll.

use decal::FaceLabel;
use glam::{Vec2, Vec3};

/// Near clip distance of the face frustum
pub const FACE_NEAR: f32 = 0.1;

/// Far clip distance of the face frustum
pub const FACE_FAR: f32 = 10.0;

/// Orthographic camera for one face pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCamera {
    /// Camera position in world space
    pub eye: Vec3,
    /// Screen-right direction in world space
    pub right: Vec3,
    /// Screen-up direction in world space
    pub up: Vec3,
    pub near: f32,
    pub far: f32,
}

impl FaceCamera {
    /// The camera for a canonical face, looking at the origin
    pub fn face_view(face: FaceLabel) -> Self {
        let (eye, right, up) = match face {
            FaceLabel::Front => (Vec3::Z, Vec3::X, Vec3::Y),
            FaceLabel::Back => (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            FaceLabel::Left => (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            FaceLabel::Right => (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            // A Y-up look-at degenerates at the poles; the resolved roll
            // keeps world +X on screen-right for both views
            FaceLabel::Up => (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            FaceLabel::Down => (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        };
        Self {
            eye,
            right,
            up,
            near: FACE_NEAR,
            far: FACE_FAR,
        }
    }

    /// View direction (toward the origin)
    pub fn forward(&self) -> Vec3 {
        -self.eye
    }

    /// Project a world point to screen pixels and view depth.
    ///
    /// Screen rows are bottom-up, matching a render target before its
    /// vertical flip. Points in front of the near plane or beyond the far
    /// plane are rejected; points outside the side planes still project (the
    /// rasterizer clamps to the viewport).
    ///
    /// # Arguments
    /// * `point` - World-space position
    /// * `width`, `height` - Render target size in pixels
    ///
    /// # Returns
    /// `Some((screen_xy, depth))` with depth increasing away from the eye
    pub fn world_to_screen(&self, point: Vec3, width: u32, height: u32) -> Option<(Vec2, f32)> {
        let rel = point - self.eye;
        let depth = rel.dot(self.forward());
        if depth < self.near || depth > self.far {
            return None;
        }

        let x_ndc = rel.dot(self.right);
        let y_ndc = rel.dot(self.up);
        let screen = Vec2::new(
            (x_ndc + 1.0) * 0.5 * width as f32,
            (y_ndc + 1.0) * 0.5 * height as f32,
        );
        Some((screen, depth))
    }
}
