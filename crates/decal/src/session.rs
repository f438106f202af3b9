//! Paint registry and session state.
//!
//! The registry owns every placed decal, bucketed per part in append order.
//! The session wraps the registry with the rig, the monotonic draw-order
//! counter, and the one-call paint path used by pointer handlers: resolve →
//! classify → project → append.

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::camera::ViewCamera;
use crate::hit::{resolve_hit, resolve_ray_hit};
use crate::project::project_decal;
use crate::rig::Rig;
use crate::types::{BrushSettings, Decal, FaceLabel, PartId, SurfaceHit};

/// Per-part ordered decal buckets.
///
/// Buckets are append-only (paint order = draw order); the only in-place
/// mutation is the `visible` flip mirroring part visibility.
#[derive(Debug, Clone, Default)]
pub struct PaintRegistry {
    buckets: [Vec<Decal>; PartId::ALL.len()],
}

impl PaintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decal to its owner part's bucket
    pub fn append(&mut self, decal: Decal) {
        self.buckets[decal.part.index()].push(decal);
    }

    /// All decals on a part, in draw order
    pub fn decals(&self, part: PartId) -> &[Decal] {
        &self.buckets[part.index()]
    }

    /// Decals on a part whose snapped face matches, in draw order
    pub fn face_decals(
        &self,
        part: PartId,
        face: FaceLabel,
    ) -> impl Iterator<Item = &Decal> {
        self.decals(part).iter().filter(move |d| d.face == face)
    }

    /// Flip `visible` on every decal of a part. Returns how many flipped.
    pub fn set_part_visible(&mut self, part: PartId, visible: bool) -> usize {
        let bucket = &mut self.buckets[part.index()];
        for decal in bucket.iter_mut() {
            decal.visible = visible;
        }
        bucket.len()
    }

    /// Total decal count across all parts
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Drop every decal (full-scene reset)
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }
}

/// One editing session: rig, registry, and the draw-order counter.
///
/// The counter is monotonic for the life of the session; a reset clears the
/// registry but never rewinds the counter, so draw orders stay unique across
/// the whole process.
#[derive(Debug, Clone)]
pub struct PaintSession {
    rig: Rig,
    registry: PaintRegistry,
    next_draw_order: u64,
}

impl PaintSession {
    pub fn new(rig: Rig) -> Self {
        Self {
            rig,
            registry: PaintRegistry::new(),
            next_draw_order: 0,
        }
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn registry(&self) -> &PaintRegistry {
        &self.registry
    }

    /// Paint through a camera at a pointer NDC position.
    ///
    /// Returns the placed decal's draw order, or `None` when the pointer
    /// missed, the normal degenerated, or the box clipped nothing — all
    /// silent no-ops for the caller.
    pub fn paint(
        &mut self,
        camera: &ViewCamera,
        ndc: Vec2,
        brush: &BrushSettings,
    ) -> Option<u64> {
        let hit = resolve_hit(&self.rig, camera, ndc)?;
        self.paint_hit(hit, brush)
    }

    /// Paint along an explicit world-space ray
    pub fn paint_ray(
        &mut self,
        ray_origin: Vec3,
        ray_dir: Vec3,
        brush: &BrushSettings,
    ) -> Option<u64> {
        let hit = resolve_ray_hit(&self.rig, ray_origin, ray_dir)?;
        self.paint_hit(hit, brush)
    }

    /// Project and register a decal for an already-resolved hit.
    ///
    /// Hidden parts accept no paint through any path; the draw-order counter
    /// advances only when a decal is actually placed.
    pub fn paint_hit(&mut self, hit: SurfaceHit, brush: &BrushSettings) -> Option<u64> {
        let part = self.rig.part(hit.part).filter(|p| p.visible)?;
        let order = self.next_draw_order + 1;
        let decal = project_decal(part, &hit, brush, order)?;

        self.next_draw_order = order;
        debug!(
            part = %decal.part,
            face = %decal.face,
            order,
            triangles = decal.mesh.triangle_count(),
            "decal placed"
        );
        self.registry.append(decal);
        Some(order)
    }

    /// Show or hide a part, mirroring the flip onto its registered decals
    pub fn set_part_visible(&mut self, part: PartId, visible: bool) {
        let in_rig = self.rig.set_visible(part, visible);
        let flipped = self.registry.set_part_visible(part, visible);
        debug!(part = %part, visible, in_rig, flipped, "part visibility changed");
    }

    /// Full-scene reset: drops all decals, keeps the draw-order counter
    pub fn reset(&mut self) {
        self.registry.clear();
        debug!("session reset, registry cleared");
    }

    /// Number of decals placed and still registered
    pub fn decal_count(&self) -> usize {
        self.registry.len()
    }
}

impl Default for PaintSession {
    fn default() -> Self {
        Self::new(Rig::classic())
    }
}
