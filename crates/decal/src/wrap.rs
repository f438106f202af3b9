//! Decal wrap construction.
//!
//! A decal is not a flat quad: it is the owning mesh's geometry clipped
//! against the oriented projection box, so paint follows the surface and
//! bends around edges. Clipping runs in projector-local space (box center at
//! the origin, projection axis +Z) with Sutherland-Hodgman against the six
//! box half-spaces, then fan-triangulates each surviving polygon.

use glam::{Vec2, Vec3};
use tracing::trace;

use crate::mesh::TriMesh;
use crate::types::{DecalVolume, WrapMesh};

/// Minimum polygon area worth keeping after a clip, squared units
const DEGENERATE_AREA: f32 = 1e-10;

/// Clip a part mesh against a decal volume and build the wrap.
///
/// The volume's `size` is expressed along world axes (thin component on the
/// snapped normal's axis); because the orientation maps the projection axis
/// onto that normal, the clip extents are recovered per projector axis by
/// rotating each axis into world space and reading the extent it lands on.
///
/// # Arguments
/// * `mesh` - The owning part's base mesh, in part-local space
/// * `mesh_offset` - The part's world translation
/// * `volume` - Oriented projection box in world space
///
/// # Returns
/// Wrap geometry in world space with projector-space UVs; empty when the box
/// touches no triangle.
pub fn wrap_mesh(mesh: &TriMesh, mesh_offset: Vec3, volume: &DecalVolume) -> WrapMesh {
    let half_world = volume.size * 0.5;
    let half = Vec3::new(
        (volume.orientation * Vec3::X).abs().dot(half_world),
        (volume.orientation * Vec3::Y).abs().dot(half_world),
        (volume.orientation * Vec3::Z).abs().dot(half_world),
    );
    let inv_orientation = volume.orientation.inverse();

    let mut wrap = WrapMesh::default();

    for tri in 0..mesh.triangle_count() {
        let (v0, v1, v2) = mesh.triangle_positions(tri);
        let mut polygon: Vec<Vec3> = [v0, v1, v2]
            .iter()
            .map(|&v| inv_orientation * (v + mesh_offset - volume.center))
            .collect();

        for (axis, limit) in [
            (Vec3::X, half.x),
            (Vec3::NEG_X, half.x),
            (Vec3::Y, half.y),
            (Vec3::NEG_Y, half.y),
            (Vec3::Z, half.z),
            (Vec3::NEG_Z, half.z),
        ] {
            if polygon.len() < 3 {
                break;
            }
            polygon = clip_polygon(&polygon, axis, limit);
        }
        if polygon.len() < 3 {
            continue;
        }
        trace!(triangle = tri, vertices = polygon.len(), "triangle survived decal clip");

        // Fan triangulation, positions back out to world space, UVs spanning
        // the box footprint
        for i in 1..polygon.len() - 1 {
            let corners = [polygon[0], polygon[i], polygon[i + 1]];
            if triangle_area_sq(corners) < DEGENERATE_AREA {
                continue;
            }
            for p in corners {
                wrap.positions.push(volume.orientation * p + volume.center);
                wrap.uvs.push(Vec2::new(
                    p.x / (half.x * 2.0) + 0.5,
                    p.y / (half.y * 2.0) + 0.5,
                ));
            }
        }
    }

    wrap
}

/// Clip a convex polygon against the half-space `p · axis <= limit`.
///
/// Boundary points count as inside; edge crossings are interpolated.
fn clip_polygon(polygon: &[Vec3], axis: Vec3, limit: f32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(polygon.len() + 2);

    for i in 0..polygon.len() {
        let current = polygon[i];
        let next = polygon[(i + 1) % polygon.len()];
        let d0 = current.dot(axis) - limit;
        let d1 = next.dot(axis) - limit;
        let inside0 = d0 <= 0.0;
        let inside1 = d1 <= 0.0;

        if inside0 {
            out.push(current);
        }
        if inside0 != inside1 {
            let t = d0 / (d0 - d1);
            out.push(current + (next - current) * t);
        }
    }

    out
}

fn triangle_area_sq(corners: [Vec3; 3]) -> f32 {
    let cross = (corners[1] - corners[0]).cross(corners[2] - corners[0]);
    cross.length_squared() * 0.25
}
