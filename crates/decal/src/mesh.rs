//! Triangle mesh data for body parts.
//!
//! Parts of the classic rig are axis-aligned cuboids with flat per-face
//! normals; the raycaster and the decal wrap both consume this indexed form.

use glam::Vec3;

/// Indexed triangle mesh with per-vertex normals
#[derive(Debug, Clone, PartialEq)]
pub struct TriMesh {
    /// Vertex positions in mesh-local space
    pub positions: Vec<Vec3>,
    /// Triangle indices (3 per triangle)
    pub indices: Vec<u32>,
    /// Vertex normals (same length as positions)
    pub normals: Vec<Vec3>,
}

impl TriMesh {
    /// Build an axis-aligned cuboid centered at the origin.
    ///
    /// 24 vertices (4 per face, so normals stay flat) and 12 triangles,
    /// counter-clockwise when viewed from outside.
    ///
    /// # Arguments
    /// * `size` - Full extents along X, Y, Z
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;

        // Quad corners per face, CCW from outside, with the face normal
        let faces: [([Vec3; 4], Vec3); 6] = [
            // +Z
            (
                [
                    Vec3::new(-h.x, -h.y, h.z),
                    Vec3::new(h.x, -h.y, h.z),
                    Vec3::new(h.x, h.y, h.z),
                    Vec3::new(-h.x, h.y, h.z),
                ],
                Vec3::Z,
            ),
            // -Z
            (
                [
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(-h.x, -h.y, -h.z),
                    Vec3::new(-h.x, h.y, -h.z),
                    Vec3::new(h.x, h.y, -h.z),
                ],
                Vec3::NEG_Z,
            ),
            // +X
            (
                [
                    Vec3::new(h.x, -h.y, h.z),
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(h.x, h.y, -h.z),
                    Vec3::new(h.x, h.y, h.z),
                ],
                Vec3::X,
            ),
            // -X
            (
                [
                    Vec3::new(-h.x, -h.y, -h.z),
                    Vec3::new(-h.x, -h.y, h.z),
                    Vec3::new(-h.x, h.y, h.z),
                    Vec3::new(-h.x, h.y, -h.z),
                ],
                Vec3::NEG_X,
            ),
            // +Y
            (
                [
                    Vec3::new(-h.x, h.y, h.z),
                    Vec3::new(h.x, h.y, h.z),
                    Vec3::new(h.x, h.y, -h.z),
                    Vec3::new(-h.x, h.y, -h.z),
                ],
                Vec3::Y,
            ),
            // -Y
            (
                [
                    Vec3::new(-h.x, -h.y, -h.z),
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(h.x, -h.y, h.z),
                    Vec3::new(-h.x, -h.y, h.z),
                ],
                Vec3::NEG_Y,
            ),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (corners, normal) in faces {
            let base = positions.len() as u32;
            positions.extend_from_slice(&corners);
            normals.extend_from_slice(&[normal; 4]);
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            positions,
            indices,
            normals,
        }
    }

    /// Number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex indices for a triangle
    pub fn triangle_indices(&self, tri_index: usize) -> (u32, u32, u32) {
        let base = tri_index * 3;
        (
            self.indices[base],
            self.indices[base + 1],
            self.indices[base + 2],
        )
    }

    /// Vertex positions for a triangle
    pub fn triangle_positions(&self, tri_index: usize) -> (Vec3, Vec3, Vec3) {
        let (i0, i1, i2) = self.triangle_indices(tri_index);
        (
            self.positions[i0 as usize],
            self.positions[i1 as usize],
            self.positions[i2 as usize],
        )
    }

    /// Vertex normals for a triangle
    pub fn triangle_normals(&self, tri_index: usize) -> (Vec3, Vec3, Vec3) {
        let (i0, i1, i2) = self.triangle_indices(tri_index);
        (
            self.normals[i0 as usize],
            self.normals[i1 as usize],
            self.normals[i2 as usize],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_counts() {
        let mesh = TriMesh::cuboid(Vec3::new(2.0, 2.0, 1.0));
        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.normals.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_cuboid_extents() {
        let mesh = TriMesh::cuboid(Vec3::new(2.0, 4.0, 1.0));
        for p in &mesh.positions {
            assert!(p.x.abs() <= 1.0 + 1e-6);
            assert!(p.y.abs() <= 2.0 + 1e-6);
            assert!(p.z.abs() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_cuboid_winding_matches_normals() {
        // Geometric normal of every triangle must agree with its flat
        // vertex normal (CCW from outside)
        let mesh = TriMesh::cuboid(Vec3::splat(2.0));
        for tri in 0..mesh.triangle_count() {
            let (v0, v1, v2) = mesh.triangle_positions(tri);
            let geometric = (v1 - v0).cross(v2 - v0).normalize();
            let (n0, _, _) = mesh.triangle_normals(tri);
            assert!((geometric - n0).length() < 1e-6);
        }
    }

    #[test]
    fn test_cuboid_normals_unit_and_axis_aligned() {
        let mesh = TriMesh::cuboid(Vec3::new(1.0, 2.0, 1.0));
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-6);
            let sum = n.x.abs() + n.y.abs() + n.z.abs();
            assert!((sum - 1.0).abs() < 1e-6);
        }
    }
}
