//! The segmented humanoid rig decals are painted onto.
//!
//! Parts are axis-aligned cuboids positioned by translation only. The head
//! is display-only in the editor (a loaded model, never painted, never
//! baked), so it carries no geometry here.

use glam::Vec3;

use crate::mesh::TriMesh;
use crate::types::PartId;

/// One paintable body part: base mesh plus world placement
#[derive(Debug, Clone)]
pub struct BodyPart {
    pub id: PartId,
    /// Base mesh in part-local space, centered at the origin
    pub mesh: TriMesh,
    /// World translation of the part center
    pub offset: Vec3,
    /// Hidden parts are skipped by the hit resolver
    pub visible: bool,
}

impl BodyPart {
    fn cuboid(id: PartId, size: Vec3, offset: Vec3) -> Self {
        Self {
            id,
            mesh: TriMesh::cuboid(size),
            offset,
            visible: true,
        }
    }
}

/// The paintable rig: torso, arms, legs
#[derive(Debug, Clone)]
pub struct Rig {
    parts: Vec<BodyPart>,
}

impl Rig {
    /// Build the classic rig layout.
    ///
    /// | part     | size      | offset        |
    /// |----------|-----------|---------------|
    /// | torso    | 2 x 2 x 1 | (0, 0, 0)     |
    /// | rightArm | 1 x 2 x 1 | (-1.5, 0, 0)  |
    /// | leftArm  | 1 x 2 x 1 | (1.5, 0, 0)   |
    /// | rightLeg | 1 x 2 x 1 | (-0.5, -2, 0) |
    /// | leftLeg  | 1 x 2 x 1 | (0.5, -2, 0)  |
    pub fn classic() -> Self {
        let limb = Vec3::new(1.0, 2.0, 1.0);
        Self {
            parts: vec![
                BodyPart::cuboid(PartId::Torso, Vec3::new(2.0, 2.0, 1.0), Vec3::ZERO),
                BodyPart::cuboid(PartId::RightArm, limb, Vec3::new(-1.5, 0.0, 0.0)),
                BodyPart::cuboid(PartId::LeftArm, limb, Vec3::new(1.5, 0.0, 0.0)),
                BodyPart::cuboid(PartId::RightLeg, limb, Vec3::new(-0.5, -2.0, 0.0)),
                BodyPart::cuboid(PartId::LeftLeg, limb, Vec3::new(0.5, -2.0, 0.0)),
            ],
        }
    }

    pub fn part(&self, id: PartId) -> Option<&BodyPart> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub fn part_mut(&mut self, id: PartId) -> Option<&mut BodyPart> {
        self.parts.iter_mut().find(|p| p.id == id)
    }

    /// Show or hide a part. Returns false when the rig has no such part.
    pub fn set_visible(&mut self, id: PartId, visible: bool) -> bool {
        match self.part_mut(id) {
            Some(part) => {
                part.visible = visible;
                true
            }
            None => false,
        }
    }

    /// All parts, visible or not
    pub fn parts(&self) -> &[BodyPart] {
        &self.parts
    }

    /// The current raycast whitelist: visible parts that accept paint
    pub fn paintable_parts(&self) -> impl Iterator<Item = &BodyPart> {
        self.parts
            .iter()
            .filter(|p| p.visible && p.id.is_paintable())
    }
}

impl Default for Rig {
    fn default() -> Self {
        Self::classic()
    }
}
