//! Axis snapping for surface normals.
//!
//! Decal orientation, box sizing, and atlas face selection all key off the
//! canonical direction nearest a hit normal. Snapping is a nearest-axis
//! projection: the candidate with the maximum dot product wins, ties broken
//! by enumeration order.

use glam::Vec3;

use crate::types::{FaceLabel, SnappedDirection};

/// Snap an arbitrary direction to the nearest canonical axis direction.
///
/// The input does not need to be normalized; positive rescaling never changes
/// the result. Equal dot products resolve to the earlier entry in
/// [`SnappedDirection::ALL`].
///
/// # Arguments
/// * `normal` - Direction to classify, any nonzero length
///
/// # Returns
/// `Some(SnappedDirection)` for any well-formed direction, `None` when the
/// input is zero-length or non-finite (a degenerate normal aborts the paint
/// operation upstream).
pub fn snap_direction(normal: Vec3) -> Option<SnappedDirection> {
    let unit = normal.try_normalize()?;

    let mut best = SnappedDirection::ALL[0];
    let mut best_dot = unit.dot(best.unit());
    for candidate in &SnappedDirection::ALL[1..] {
        let dot = unit.dot(candidate.unit());
        if dot > best_dot {
            best = *candidate;
            best_dot = dot;
        }
    }
    Some(best)
}

/// Classify a normal straight to its face label.
///
/// Convenience over [`snap_direction`]; same degenerate-input behavior.
pub fn face_for_normal(normal: Vec3) -> Option<FaceLabel> {
    snap_direction(normal).map(SnappedDirection::face_label)
}
