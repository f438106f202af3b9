//! The texture baking pipeline: face passes composited into the atlas.
//!
//! One pass per face label: clear the scratch surface, render a white
//! depth-writing clone of the part recentered at the origin, render that
//! face's decals over it in draw order, read back, flip, color-correct, and
//! scale the working image into the face's atlas cell. After all requested
//! faces the atlas canvas is ready for PNG encoding.

use std::fs;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use applique_config::{BrushConfig, ExportConfig, TemplateConfig};
use decal::{BodyPart, FaceLabel, PaintRegistry, PartId, Rig};

use crate::camera::FaceCamera;
use crate::color::correct_buffer;
use crate::layout::PartGroup;
use crate::raster::{BrushMask, DrawStyle, RasterVertex, rasterize_triangle};
use crate::surface::{RenderSurface, Rgba8Canvas};

/// Default file name for the exported atlas
pub const EXPORT_FILE_NAME: &str = "front_face_texture.png";

/// Errors from the bake pipeline.
///
/// Paint-path problems never reach here; these are export-only conditions.
#[derive(Debug, Error)]
pub enum BakeError {
    /// The atlas template defines no region family for this part
    #[error("no atlas region defined for part '{part}'")]
    NoAtlasRegion { part: PartId },
    /// The rig carries no geometry for this part
    #[error("rig has no part '{part}'")]
    MissingPart { part: PartId },
    #[error("png encoding failed")]
    Encode(#[from] image::ImageError),
    #[error("failed writing atlas to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Tunables for one export run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Atlas canvas and working-surface resolution
    pub template: TemplateConfig,
    /// Color correction and decal depth/alpha constants
    pub color: ExportConfig,
    /// Brush mask applied to decal fragments at bake time
    pub mask: BrushMask,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            template: TemplateConfig::default(),
            color: ExportConfig::default(),
            mask: BrushMask::Disc {
                hardness: BrushConfig::default().hardness,
            },
        }
    }
}

/// Bakes painted parts into atlas canvases.
///
/// Owns the scratch render surface so repeated bakes reuse its buffers.
pub struct AtlasExporter {
    settings: ExportSettings,
    scratch: RenderSurface,
}

impl AtlasExporter {
    pub fn new(settings: ExportSettings) -> Self {
        let scratch = RenderSurface::new(settings.template.width, settings.template.height);
        Self { settings, scratch }
    }

    /// Bake all six faces of a part into a fresh atlas canvas
    pub fn bake_part(
        &mut self,
        rig: &Rig,
        registry: &PaintRegistry,
        part: PartId,
    ) -> Result<Rgba8Canvas, BakeError> {
        self.bake_part_faces(rig, registry, part, &FaceLabel::BAKE_ORDER)
    }

    /// Bake a chosen face subset of a part.
    ///
    /// The single-face export is the one-entry case of this. Cells for faces
    /// not in `faces` stay transparent black.
    pub fn bake_part_faces(
        &mut self,
        rig: &Rig,
        registry: &PaintRegistry,
        part: PartId,
        faces: &[FaceLabel],
    ) -> Result<Rgba8Canvas, BakeError> {
        let group = PartGroup::for_part(part).ok_or(BakeError::NoAtlasRegion { part })?;
        let body = rig.part(part).ok_or(BakeError::MissingPart { part })?;

        let (width, height) = (self.settings.template.width, self.settings.template.height);
        let mut atlas = Rgba8Canvas::new(width, height);

        for &face in faces {
            let working = self.render_face(body, registry, face);
            let rect = group.face_rect(face);
            // The rect table is bottom-up; canvas rows are top-down
            atlas.blit_scaled(
                &working,
                rect.x0,
                height - rect.y1,
                rect.width(),
                rect.height(),
            );
        }
        debug!(part = %part, faces = faces.len(), "atlas composited");
        Ok(atlas)
    }

    /// Render one face pass and return the corrected working image
    fn render_face(
        &mut self,
        body: &BodyPart,
        registry: &PaintRegistry,
        face: FaceLabel,
    ) -> Rgba8Canvas {
        self.scratch.clear();
        let camera = FaceCamera::face_view(face);

        // White depth-writing clone of the part, recentered at the origin
        // (the bake view is part-local; rig offsets only place parts in the
        // world)
        let opaque = DrawStyle::opaque();
        for tri in 0..body.mesh.triangle_count() {
            let (a, b, c) = body.mesh.triangle_positions(tri);
            draw_triangle(
                &mut self.scratch,
                &camera,
                [a, b, c],
                [Vec2::ZERO; 3],
                [1.0, 1.0, 1.0, 1.0],
                &opaque,
            );
        }

        // This face's decals over the clone, oldest first so later strokes
        // blend on top
        let style = DrawStyle::decal(
            self.settings.color.depth_bias,
            self.settings.color.alpha_test,
            self.settings.mask,
        );
        let mut baked = 0usize;
        for decal in registry.face_decals(body.id, face) {
            if !decal.visible {
                continue;
            }
            let color = decal.color.to_rgba_f32(1.0);
            for tri in 0..decal.mesh.triangle_count() {
                let base = tri * 3;
                let positions = [
                    decal.mesh.positions[base] - body.offset,
                    decal.mesh.positions[base + 1] - body.offset,
                    decal.mesh.positions[base + 2] - body.offset,
                ];
                let uvs = [
                    decal.mesh.uvs[base],
                    decal.mesh.uvs[base + 1],
                    decal.mesh.uvs[base + 2],
                ];
                draw_triangle(&mut self.scratch, &camera, positions, uvs, color, &style);
            }
            baked += 1;
        }
        debug!(part = %body.id, face = %face, decals = baked, "face pass rendered");

        let mut working = self.scratch.readback();
        working.flip_vertical();
        correct_buffer(&mut working, self.settings.color.saturation_boost);
        working
    }
}

/// Project one world-space triangle and rasterize it.
///
/// A triangle with any vertex outside the near/far range is dropped whole.
fn draw_triangle(
    surface: &mut RenderSurface,
    camera: &FaceCamera,
    positions: [Vec3; 3],
    uvs: [Vec2; 3],
    color: [f32; 4],
    style: &DrawStyle,
) {
    let (width, height) = (surface.width, surface.height);
    let mut verts = [RasterVertex::new(Vec2::ZERO, 0.0, Vec2::ZERO); 3];
    for (vert, (position, uv)) in verts.iter_mut().zip(positions.into_iter().zip(uvs)) {
        let Some((screen, depth)) = camera.world_to_screen(position, width, height) else {
            return;
        };
        *vert = RasterVertex::new(screen, depth, uv);
    }
    rasterize_triangle(surface, verts[0], verts[1], verts[2], color, style);
}

/// Encode an atlas canvas as PNG bytes
pub fn encode_png(canvas: &Rgba8Canvas) -> Result<Vec<u8>, BakeError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        canvas.as_bytes(),
        canvas.width,
        canvas.height,
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Encode a canvas and write it to disk
pub fn write_png(path: &Path, canvas: &Rgba8Canvas) -> Result<(), BakeError> {
    let bytes = encode_png(canvas)?;
    fs::write(path, &bytes).map_err(|source| BakeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "atlas written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use decal::{BrushSettings, PaintSession, Rgb, SurfaceHit, ViewCamera};

    // Top-down center of the torso FRONT cell (231,357,359,485 bottom-up
    // on the 585x559 template)
    const FRONT_CENTER: (u32, u32) = (295, 138);

    fn red_brush() -> BrushSettings {
        BrushSettings {
            size: 1.0,
            depth_factor: 0.5,
            color: Rgb::new(255, 0, 0),
        }
    }

    fn center_front_hit() -> SurfaceHit {
        SurfaceHit {
            part: PartId::Torso,
            position: Vec3::new(0.0, 0.0, 0.5),
            normal: Vec3::Z,
        }
    }

    #[test]
    fn test_unpainted_torso_bakes_white_silhouette() {
        let rig = Rig::classic();
        let registry = PaintRegistry::new();
        let mut exporter = AtlasExporter::new(ExportSettings::default());

        let atlas = exporter.bake_part(&rig, &registry, PartId::Torso).unwrap();
        let (cx, cy) = FRONT_CENTER;
        assert_eq!(atlas.get_pixel(cx, cy), Some([255, 255, 255, 255]));
        // Outside every cell the canvas is untouched
        assert_eq!(atlas.get_pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_pole_cells_show_horizontal_band() {
        let rig = Rig::classic();
        let registry = PaintRegistry::new();
        let mut exporter = AtlasExporter::new(ExportSettings::default());

        let atlas = exporter.bake_part(&rig, &registry, PartId::Torso).unwrap();
        // Seen from above or below, the torso footprint spans the full cell
        // width but only the middle half of its rows: a horizontal band.
        // UP cell (231,487,359,551 bottom-up -> y 8..72 top-down)
        assert_eq!(atlas.get_pixel(236, 40), Some([255, 255, 255, 255]));
        assert_eq!(atlas.get_pixel(295, 12), Some([0, 0, 0, 0]));
        // DOWN cell (231,290,359,355 bottom-up -> y 204..269 top-down)
        assert_eq!(atlas.get_pixel(236, 237), Some([255, 255, 255, 255]));
        assert_eq!(atlas.get_pixel(295, 208), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_arm_has_no_atlas_region() {
        let rig = Rig::classic();
        let registry = PaintRegistry::new();
        let mut exporter = AtlasExporter::new(ExportSettings::default());

        let err = exporter
            .bake_part(&rig, &registry, PartId::LeftArm)
            .unwrap_err();
        assert!(matches!(
            err,
            BakeError::NoAtlasRegion {
                part: PartId::LeftArm
            }
        ));
    }

    #[test]
    fn test_leg_bakes_into_bottom_left_group() {
        let rig = Rig::classic();
        let registry = PaintRegistry::new();
        let mut exporter = AtlasExporter::new(ExportSettings::default());

        let atlas = exporter.bake_part(&rig, &registry, PartId::LeftLeg).unwrap();
        // Center of the bottom-left FRONT cell (217,76,281,204 bottom-up)
        assert_eq!(atlas.get_pixel(249, 419), Some([255, 255, 255, 255]));
        // Torso cells stay empty when only a leg is baked
        let (cx, cy) = FRONT_CENTER;
        assert_eq!(atlas.get_pixel(cx, cy), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_front_decal_confined_to_front_cell() {
        let mut session = PaintSession::default();
        session.paint_hit(center_front_hit(), &red_brush()).unwrap();

        let mut exporter = AtlasExporter::new(ExportSettings::default());
        let painted = exporter
            .bake_part(session.rig(), session.registry(), PartId::Torso)
            .unwrap();
        let control = exporter
            .bake_part(session.rig(), &PaintRegistry::new(), PartId::Torso)
            .unwrap();

        // FRONT cell in top-down pixels
        let (x0, x1, y0, y1) = (231, 359, 74, 202);
        let (cx, cy) = FRONT_CENTER;
        assert_ne!(painted.get_pixel(cx, cy), control.get_pixel(cx, cy));
        for y in 0..painted.height {
            for x in 0..painted.width {
                if painted.get_pixel(x, y) != control.get_pixel(x, y) {
                    assert!(
                        x >= x0 && x < x1 && y >= y0 && y < y1,
                        "decal leaked outside the FRONT cell at ({x}, {y})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_center_stroke_bakes_red() {
        let mut session = PaintSession::default();
        let camera = ViewCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 75.0, 1.0);
        session.paint(&camera, Vec2::ZERO, &red_brush()).unwrap();

        let mut exporter = AtlasExporter::new(ExportSettings::default());
        let atlas = exporter
            .bake_part(session.rig(), session.registry(), PartId::Torso)
            .unwrap();

        let (cx, cy) = FRONT_CENTER;
        let [r, g, b, a] = atlas.get_pixel(cx, cy).unwrap();
        assert_eq!(a, 255);
        assert!(r > g && r > b);
        // Solid red survives the sRGB + saturation pass exactly
        assert_eq!([r, g, b], [255, 0, 0]);
    }

    #[test]
    fn test_invisible_decals_are_skipped() {
        let mut session = PaintSession::default();
        session.paint_hit(center_front_hit(), &red_brush()).unwrap();
        session.set_part_visible(PartId::Torso, false);

        let mut exporter = AtlasExporter::new(ExportSettings::default());
        let atlas = exporter
            .bake_part(session.rig(), session.registry(), PartId::Torso)
            .unwrap();
        let (cx, cy) = FRONT_CENTER;
        assert_eq!(atlas.get_pixel(cx, cy), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_single_face_bake_leaves_other_cells_empty() {
        let rig = Rig::classic();
        let registry = PaintRegistry::new();
        let mut exporter = AtlasExporter::new(ExportSettings::default());

        let atlas = exporter
            .bake_part_faces(&rig, &registry, PartId::Torso, &[FaceLabel::Front])
            .unwrap();
        let (cx, cy) = FRONT_CENTER;
        assert_eq!(atlas.get_pixel(cx, cy), Some([255, 255, 255, 255]));
        // BACK cell (427,357,555,485) was never composited
        assert_eq!(atlas.get_pixel(491, 138), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_default_mask_follows_brush_config() {
        let settings = ExportSettings::default();
        assert_eq!(
            settings.mask,
            BrushMask::Disc {
                hardness: BrushConfig::default().hardness
            }
        );
    }

    #[test]
    fn test_export_is_deterministic() {
        let mut session = PaintSession::default();
        session.paint_hit(center_front_hit(), &red_brush()).unwrap();

        let mut exporter = AtlasExporter::new(ExportSettings::default());
        let first = exporter
            .bake_part(session.rig(), session.registry(), PartId::Torso)
            .unwrap();
        let second = exporter
            .bake_part(session.rig(), session.registry(), PartId::Torso)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(encode_png(&first).unwrap(), encode_png(&second).unwrap());
    }
}
