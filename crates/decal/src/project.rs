//! Decal projection: turning a surface hit into a placed decal.
//!
//! The projector classifies the hit normal, orients a projection box at the
//! hit position, sizes it thin along the snapped axis, and clips the owning
//! mesh against it. Draw-order assignment and registry bookkeeping belong to
//! the paint session; this module stays pure.

use glam::{Quat, Vec3};
use tracing::{debug, warn};

use crate::classify::snap_direction;
use crate::rig::BodyPart;
use crate::types::{BrushSettings, Decal, DecalVolume, SnappedDirection, SurfaceHit};
use crate::wrap::wrap_mesh;

/// Rotation taking the canonical +Z projection axis to the snapped normal.
///
/// Shortest-arc rotation between the two unit vectors; the antiparallel case
/// (-Z) resolves to a half-turn about a perpendicular axis.
pub fn decal_orientation(snapped: SnappedDirection) -> Quat {
    Quat::from_rotation_arc(Vec3::Z, snapped.unit())
}

/// Decal box size for a brush, permuted so the thin extent lies on the
/// snapped normal's world axis.
///
/// The box stays square (`brush_size`) in the tangent plane and shrinks to
/// `brush_size * depth_factor` along the normal, which keeps a decal from
/// ballooning through to other faces of the part.
pub fn decal_size(brush_size: f32, depth_factor: f32, snapped: SnappedDirection) -> Vec3 {
    let s = brush_size;
    let d = brush_size * depth_factor;
    match snapped {
        SnappedDirection::PosX | SnappedDirection::NegX => Vec3::new(d, s, s),
        SnappedDirection::PosY | SnappedDirection::NegY => Vec3::new(s, d, s),
        SnappedDirection::PosZ | SnappedDirection::NegZ => Vec3::new(s, s, d),
    }
}

/// Build a decal from a surface hit.
///
/// Returns `None` (and logs why) for every non-paintable outcome: degenerate
/// hit normal, non-positive brush size, or a projection box that clips no
/// geometry. The caller supplies the draw order it reserved for this decal.
pub fn project_decal(
    part: &BodyPart,
    hit: &SurfaceHit,
    brush: &BrushSettings,
    draw_order: u64,
) -> Option<Decal> {
    if !hit.part.is_paintable() {
        warn!(part = %hit.part, "decal projection rejected: part is not paintable");
        return None;
    }
    if brush.size <= 0.0 || !brush.size.is_finite() {
        warn!(size = brush.size, "decal projection rejected: bad brush size");
        return None;
    }

    let Some(snapped) = snap_direction(hit.normal) else {
        debug!("decal projection skipped: degenerate hit normal");
        return None;
    };

    let volume = DecalVolume {
        center: hit.position,
        orientation: decal_orientation(snapped),
        size: decal_size(brush.size, brush.depth_factor, snapped),
    };

    let mesh = wrap_mesh(&part.mesh, part.offset, &volume);
    if mesh.is_empty() {
        debug!(part = %hit.part, "decal projection skipped: box clipped no geometry");
        return None;
    }

    Some(Decal {
        part: hit.part,
        face: snapped.face_label(),
        volume,
        color: brush.color,
        draw_order,
        visible: true,
        mesh,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::Rig;
    use crate::types::{FaceLabel, PartId, Rgb};

    const EPS: f32 = 1e-5;

    #[test]
    fn test_orientation_maps_z_to_normal() {
        for dir in SnappedDirection::ALL {
            let q = decal_orientation(dir);
            let rotated = q * Vec3::Z;
            assert!(
                (rotated - dir.unit()).length() < EPS,
                "{dir:?}: +Z must rotate onto the snapped normal"
            );
        }
    }

    #[test]
    fn test_orientation_is_unit() {
        for dir in SnappedDirection::ALL {
            assert!((decal_orientation(dir).length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_size_permutation() {
        let s = 2.0;
        let d = 0.5;

        let z = decal_size(s, d, SnappedDirection::PosZ);
        assert_eq!(z, Vec3::new(2.0, 2.0, 1.0));
        assert!(z.z < z.x && z.z < z.y);

        let x = decal_size(s, d, SnappedDirection::NegX);
        assert_eq!(x, Vec3::new(1.0, 2.0, 2.0));
        assert!(x.x < x.y && x.x < x.z);

        let y = decal_size(s, d, SnappedDirection::PosY);
        assert_eq!(y, Vec3::new(2.0, 1.0, 2.0));
        assert!(y.y < y.x && y.y < y.z);
    }

    #[test]
    fn test_project_on_torso_front() {
        let rig = Rig::classic();
        let torso = rig.part(PartId::Torso).unwrap();
        let hit = SurfaceHit {
            part: PartId::Torso,
            position: Vec3::new(0.0, 0.0, 0.5),
            normal: Vec3::Z,
        };
        let brush = BrushSettings {
            size: 1.0,
            depth_factor: 0.5,
            color: Rgb::new(255, 0, 0),
        };

        let decal = project_decal(torso, &hit, &brush, 7).expect("projection should succeed");
        assert_eq!(decal.part, PartId::Torso);
        assert_eq!(decal.face, FaceLabel::Front);
        assert_eq!(decal.draw_order, 7);
        assert!(decal.visible);
        assert!(!decal.mesh.is_empty());
        assert_eq!(decal.volume.center, hit.position);
    }

    #[test]
    fn test_project_rejects_degenerate_normal() {
        let rig = Rig::classic();
        let torso = rig.part(PartId::Torso).unwrap();
        let hit = SurfaceHit {
            part: PartId::Torso,
            position: Vec3::new(0.0, 0.0, 0.5),
            normal: Vec3::ZERO,
        };
        assert!(project_decal(torso, &hit, &BrushSettings::default(), 1).is_none());
    }

    #[test]
    fn test_project_rejects_bad_brush() {
        let rig = Rig::classic();
        let torso = rig.part(PartId::Torso).unwrap();
        let hit = SurfaceHit {
            part: PartId::Torso,
            position: Vec3::new(0.0, 0.0, 0.5),
            normal: Vec3::Z,
        };
        let brush = BrushSettings {
            size: 0.0,
            ..BrushSettings::default()
        };
        assert!(project_decal(torso, &hit, &brush, 1).is_none());
    }

    #[test]
    fn test_project_rejects_head_hit() {
        let rig = Rig::classic();
        let torso = rig.part(PartId::Torso).unwrap();
        let hit = SurfaceHit {
            part: PartId::Head,
            position: Vec3::new(0.0, 1.5, 0.0),
            normal: Vec3::Z,
        };
        assert!(project_decal(torso, &hit, &BrushSettings::default(), 1).is_none());
    }

    #[test]
    fn test_project_off_surface_yields_none() {
        let rig = Rig::classic();
        let torso = rig.part(PartId::Torso).unwrap();
        let hit = SurfaceHit {
            part: PartId::Torso,
            position: Vec3::new(50.0, 50.0, 50.0),
            normal: Vec3::Z,
        };
        assert!(project_decal(torso, &hit, &BrushSettings::default(), 1).is_none());
    }
}
