//! Editor view camera and pointer-to-ray conversion.
//!
//! The hit resolver consumes world-space picking rays; this module turns
//! pointer pixels into normalized device coordinates and NDC into rays for a
//! perspective camera orbiting the rig.

use glam::{Vec2, Vec3};

/// Perspective camera looking at the rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCamera {
    /// Camera position in world space
    pub eye: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_deg: f32,
    /// Viewport width / height
    pub aspect: f32,
}

impl ViewCamera {
    pub fn new(eye: Vec3, target: Vec3, fov_y_deg: f32, aspect: f32) -> Self {
        Self {
            eye,
            target,
            fov_y_deg,
            aspect,
        }
    }

    /// Build a camera from an orbit pose around `target`.
    ///
    /// Yaw 0 / pitch 0 places the eye on +Z at `distance`, the editor's
    /// default view. Pitch is clamped short of the poles so the view basis
    /// stays well-formed.
    pub fn orbit(
        target: Vec3,
        yaw_deg: f32,
        pitch_deg: f32,
        distance: f32,
        fov_y_deg: f32,
        aspect: f32,
    ) -> Self {
        let yaw = yaw_deg.to_radians();
        let pitch = pitch_deg.clamp(-89.0, 89.0).to_radians();
        let eye = target
            + distance
                * Vec3::new(
                    pitch.cos() * yaw.sin(),
                    pitch.sin(),
                    pitch.cos() * yaw.cos(),
                );
        Self::new(eye, target, fov_y_deg, aspect)
    }

    /// Convert a pointer pixel position to normalized device coordinates.
    ///
    /// NDC x runs -1 (left) to 1 (right); NDC y runs -1 (bottom) to 1 (top),
    /// so the pixel y axis is inverted.
    pub fn pointer_to_ndc(pixel: Vec2, viewport: Vec2) -> Vec2 {
        Vec2::new(
            (pixel.x / viewport.x) * 2.0 - 1.0,
            -(pixel.y / viewport.y) * 2.0 + 1.0,
        )
    }

    /// Emit the world-space picking ray through an NDC point.
    ///
    /// # Arguments
    /// * `ndc` - Normalized device coordinates, (0,0) at viewport center
    ///
    /// # Returns
    /// `(origin, direction)` with a unit direction
    pub fn ndc_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize();
        let mut right = forward.cross(Vec3::Y);
        if right.length_squared() < 1e-12 {
            // Looking straight along Y; any horizontal right vector works
            right = Vec3::X;
        }
        let right = right.normalize();
        let up = right.cross(forward);

        let tan_half = (self.fov_y_deg.to_radians() * 0.5).tan();
        let dir = forward + right * (ndc.x * tan_half * self.aspect) + up * (ndc.y * tan_half);

        (self.eye, dir.normalize())
    }
}
