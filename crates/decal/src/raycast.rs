//! Ray-mesh intersection for pointer picking.
//!
//! This module provides ray-triangle intersection using the Moller-Trumbore
//! algorithm, with barycentric interpolation of vertex normals at hit points.

use glam::Vec3;

use crate::mesh::TriMesh;

/// Epsilon for floating point comparisons in ray intersection
pub(crate) const EPSILON: f32 = 1e-6;

/// Result of a ray-triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Barycentric coordinate u (weight for vertex 1)
    pub u: f32,
    /// Barycentric coordinate v (weight for vertex 2)
    pub v: f32,
}

/// Closest intersection of a ray with a mesh
#[derive(Debug, Clone, Copy)]
pub struct MeshHit {
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Index of the hit triangle
    pub triangle: u32,
    /// Intersection point (same space as the ray)
    pub position: Vec3,
    /// Interpolated unit normal at the intersection
    pub normal: Vec3,
}

/// Moller-Trumbore ray-triangle intersection algorithm.
///
/// Returns the hit distance and barycentric coordinates if the ray intersects
/// the triangle.
///
/// # Arguments
/// * `ray_origin` - Origin point of the ray
/// * `ray_dir` - Direction of the ray (should be normalized for consistent t values)
/// * `v0`, `v1`, `v2` - Triangle vertices in counter-clockwise order
///
/// # Returns
/// `Some(TriangleHit)` if ray intersects, `None` otherwise
pub fn ray_triangle_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleHit> {
    // Edge vectors
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    // Begin calculating determinant - also used to calculate u parameter
    let pvec = ray_dir.cross(edge2);
    let det = edge1.dot(pvec);

    // If determinant is near zero, ray lies in plane of triangle or misses
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;

    // Calculate distance from v0 to ray origin
    let tvec = ray_origin - v0;

    // Calculate u parameter and test bounds
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    // Prepare to test v parameter
    let qvec = tvec.cross(edge1);

    // Calculate v parameter and test bounds
    let v = ray_dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    // Calculate t - ray intersection distance
    let t = edge2.dot(qvec) * inv_det;

    // Only accept hits in front of the ray
    if t < EPSILON {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// Interpolate a Vec3 attribute using barycentric coordinates.
pub fn interpolate_vec3(v0: Vec3, v1: Vec3, v2: Vec3, u: f32, v: f32) -> Vec3 {
    let w = 1.0 - u - v;
    v0 * w + v1 * u + v2 * v
}

/// Cast a ray against a mesh and return the closest hit.
///
/// # Arguments
/// * `ray_origin` - Origin of the ray in mesh local space
/// * `ray_dir` - Direction of the ray (should be normalized)
/// * `mesh` - Mesh geometry to test
///
/// # Returns
/// `Some(MeshHit)` with the closest intersection, `None` if no hit
pub fn raycast_mesh(ray_origin: Vec3, ray_dir: Vec3, mesh: &TriMesh) -> Option<MeshHit> {
    let mut closest_hit: Option<(TriangleHit, u32)> = None;

    // Test all triangles (brute force - the rig's parts are 12 triangles each)
    for tri_idx in 0..mesh.triangle_count() {
        let (v0, v1, v2) = mesh.triangle_positions(tri_idx);

        if let Some(hit) = ray_triangle_intersection(ray_origin, ray_dir, v0, v1, v2) {
            let dominated = match &closest_hit {
                Some((prev, _)) => hit.t >= prev.t,
                None => false,
            };
            if !dominated {
                closest_hit = Some((hit, tri_idx as u32));
            }
        }
    }

    closest_hit.map(|(hit, triangle)| {
        let position = ray_origin + ray_dir * hit.t;

        // Interpolate the vertex normals; falls back to the geometric normal
        // for meshes without normal data
        let normal = if mesh.normals.is_empty() {
            let (v0, v1, v2) = mesh.triangle_positions(triangle as usize);
            (v1 - v0).cross(v2 - v0).normalize()
        } else {
            let (n0, n1, n2) = mesh.triangle_normals(triangle as usize);
            interpolate_vec3(n0, n1, n2, hit.u, hit.v).normalize()
        };

        MeshHit {
            t: hit.t,
            triangle,
            position,
            normal,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_triangle_hit() {
        // Triangle in XY plane at z=0
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        // Ray pointing down at center of triangle
        let origin = Vec3::new(0.25, 0.25, 1.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);

        let hit = ray_triangle_intersection(origin, dir, v0, v1, v2);
        assert!(hit.is_some());

        let hit = hit.unwrap();
        assert!((hit.t - 1.0).abs() < EPSILON);
        assert!((hit.u - 0.25).abs() < EPSILON);
        assert!((hit.v - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_ray_triangle_miss() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        // Ray pointing down but missing triangle
        let origin = Vec3::new(2.0, 2.0, 1.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);

        let hit = ray_triangle_intersection(origin, dir, v0, v1, v2);
        assert!(hit.is_none());
    }

    #[test]
    fn test_ray_triangle_behind() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        // Ray pointing away from triangle
        let origin = Vec3::new(0.25, 0.25, 1.0);
        let dir = Vec3::new(0.0, 0.0, 1.0);

        let hit = ray_triangle_intersection(origin, dir, v0, v1, v2);
        assert!(hit.is_none());
    }

    #[test]
    fn test_raycast_cuboid_front_face() {
        let mesh = crate::mesh::TriMesh::cuboid(Vec3::new(2.0, 2.0, 1.0));

        let origin = Vec3::new(0.25, -0.3, 5.0);
        let dir = Vec3::NEG_Z;

        let hit = raycast_mesh(origin, dir, &mesh).expect("ray should hit the box");
        assert!((hit.position.z - 0.5).abs() < EPSILON);
        assert!((hit.normal - Vec3::Z).length() < EPSILON);
        assert!((hit.t - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_raycast_nearest_face_wins() {
        // Ray through the box must report the near face, not the far one
        let mesh = crate::mesh::TriMesh::cuboid(Vec3::splat(2.0));

        let hit = raycast_mesh(Vec3::new(5.0, 0.1, 0.1), Vec3::NEG_X, &mesh).unwrap();
        assert!((hit.position.x - 1.0).abs() < EPSILON);
        assert!((hit.normal - Vec3::X).length() < EPSILON);
    }

    #[test]
    fn test_interpolate_vec3_vertices() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        assert!((interpolate_vec3(v0, v1, v2, 0.0, 0.0) - v0).length() < EPSILON);
        assert!((interpolate_vec3(v0, v1, v2, 1.0, 0.0) - v1).length() < EPSILON);
        assert!((interpolate_vec3(v0, v1, v2, 0.0, 1.0) - v2).length() < EPSILON);

        let center = (v0 + v1 + v2) / 3.0;
        let result = interpolate_vec3(v0, v1, v2, 1.0 / 3.0, 1.0 / 3.0);
        assert!((result - center).length() < EPSILON);
    }
}
