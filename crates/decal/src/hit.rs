//! Surface hit resolution for pointer picking.
//!
//! A picking ray is tested against the base meshes of every visible
//! paintable part and the nearest intersection wins. Only base meshes enter
//! the target set: decal wraps, outlines, and other sub-geometry are never
//! candidates, so painting over an already-painted spot resolves to the part
//! surface underneath.

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::camera::ViewCamera;
use crate::raycast::raycast_mesh;
use crate::rig::Rig;
use crate::types::SurfaceHit;

/// Resolve a pointer position (NDC) against the rig through a view camera.
///
/// Returns `None` when nothing paintable is under the pointer; that is the
/// ordinary miss case, not an error.
pub fn resolve_hit(rig: &Rig, camera: &ViewCamera, ndc: Vec2) -> Option<SurfaceHit> {
    let (origin, dir) = camera.ndc_ray(ndc);
    resolve_ray_hit(rig, origin, dir)
}

/// Resolve a world-space ray against the rig's visible paintable parts.
///
/// Parts are placed by translation only, so the ray moves into part-local
/// space by offset subtraction and hit data moves back out by addition;
/// normals need no transform.
pub fn resolve_ray_hit(rig: &Rig, ray_origin: Vec3, ray_dir: Vec3) -> Option<SurfaceHit> {
    let mut closest: Option<SurfaceHit> = None;
    let mut closest_t = f32::INFINITY;

    for part in rig.paintable_parts() {
        let local_origin = ray_origin - part.offset;
        if let Some(hit) = raycast_mesh(local_origin, ray_dir, &part.mesh) {
            if hit.t < closest_t {
                closest_t = hit.t;
                closest = Some(SurfaceHit {
                    part: part.id,
                    position: hit.position + part.offset,
                    normal: hit.normal,
                });
            }
        }
    }

    if closest.is_none() {
        debug!("hit resolver: ray missed every paintable surface");
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PartId;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_center_pointer_hits_torso_front() {
        let rig = Rig::classic();
        let camera = ViewCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 75.0, 1.0);

        let hit = resolve_hit(&rig, &camera, Vec2::ZERO).expect("center must hit torso");
        assert_eq!(hit.part, PartId::Torso);
        assert!((hit.position.z - 0.5).abs() < EPS);
        assert!((hit.normal - Vec3::Z).length() < EPS);
    }

    #[test]
    fn test_ray_hits_left_arm() {
        let rig = Rig::classic();
        let hit = resolve_ray_hit(&rig, Vec3::new(1.5, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert_eq!(hit.part, PartId::LeftArm);
        assert!((hit.position.z - 0.5).abs() < EPS);
    }

    #[test]
    fn test_nearest_part_wins() {
        let rig = Rig::classic();
        // From +X the left arm (spanning x 1..2) occludes the torso
        let hit = resolve_ray_hit(&rig, Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X).unwrap();
        assert_eq!(hit.part, PartId::LeftArm);
        assert!((hit.position.x - 2.0).abs() < EPS);
        assert!((hit.normal - Vec3::X).length() < EPS);
    }

    #[test]
    fn test_hidden_part_exposes_occluded_one() {
        let mut rig = Rig::classic();
        rig.set_visible(PartId::LeftArm, false);
        let hit = resolve_ray_hit(&rig, Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X).unwrap();
        assert_eq!(hit.part, PartId::Torso);
        assert!((hit.position.x - 1.0).abs() < EPS);
    }

    #[test]
    fn test_miss_is_none() {
        let rig = Rig::classic();
        let hit = resolve_ray_hit(&rig, Vec3::new(0.0, 10.0, 5.0), Vec3::Z);
        assert!(hit.is_none());
    }

    #[test]
    fn test_all_hidden_means_no_hit() {
        let mut rig = Rig::classic();
        for part in [
            PartId::Torso,
            PartId::RightArm,
            PartId::LeftArm,
            PartId::RightLeg,
            PartId::LeftLeg,
        ] {
            rig.set_visible(part, false);
        }
        assert!(resolve_ray_hit(&rig, Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).is_none());
    }
}
