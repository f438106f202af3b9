//! Applique command-line driver.
//!
//! Stands in for the editor UI: replays a recorded paint script (or a
//! built-in demo stroke set) through a paint session over the classic rig,
//! bakes the requested part, and writes the atlas PNG.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use glam::{Vec2, Vec3};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use applique_bake::{AtlasExporter, BakeError, EXPORT_FILE_NAME, ExportSettings, write_png};
use applique_config::{
    BrushConfig, DEFAULT_BRUSH_COLOR, DEFAULT_CAMERA_DISTANCE, DEFAULT_CAMERA_FOV_DEG,
};
use decal::{
    BrushSettings, FaceLabel, PaintSession, ParseColorError, PartId, Rgb, ViewCamera,
};

#[derive(Parser)]
#[command(
    name = "applique",
    about = "Paint decals on the classic rig and bake clothing textures"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a recorded paint script and bake the result
    Replay {
        /// Paint script JSON file
        #[arg(long, short)]
        script: PathBuf,
        /// Part to bake
        #[arg(long, default_value = "torso")]
        part: PartId,
        /// Comma-separated face subset to bake (all six when omitted)
        #[arg(long, value_delimiter = ',')]
        faces: Option<Vec<FaceLabel>>,
        /// Output PNG path
        #[arg(long, short, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// Paint a built-in stroke set on the torso and bake it
    Demo {
        /// Output PNG path
        #[arg(long, short, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
}

#[derive(Debug, Error)]
enum AppError {
    #[error("failed reading script {path}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("script parse failed")]
    ParseScript(#[from] serde_json::Error),
    #[error("invalid stroke color")]
    Color(#[from] ParseColorError),
    #[error(transparent)]
    Bake(#[from] BakeError),
}

/// A recorded editor session: optional camera pose, viewport, strokes
#[derive(Debug, Deserialize)]
struct PaintScript {
    /// Orbit pose; the default front view when omitted
    #[serde(default)]
    camera: Option<CameraPose>,
    /// Pixel viewport for the strokes; when omitted, stroke pointers are
    /// already NDC and the aspect ratio is 1
    #[serde(default)]
    viewport: Option<Viewport>,
    strokes: Vec<Stroke>,
}

#[derive(Debug, Deserialize)]
struct CameraPose {
    #[serde(default)]
    yaw_deg: f32,
    #[serde(default)]
    pitch_deg: f32,
    #[serde(default = "default_distance")]
    distance: f32,
}

#[derive(Debug, Deserialize)]
struct Viewport {
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
struct Stroke {
    /// Pointer position in viewport pixels (top-left origin), or NDC when
    /// the script carries no viewport
    pointer: [f32; 2],
    /// Hex paint color
    #[serde(default = "default_color")]
    color: String,
    /// Brush size in world units
    #[serde(default = "default_size")]
    size: f32,
}

fn default_distance() -> f32 {
    DEFAULT_CAMERA_DISTANCE
}

fn default_color() -> String {
    DEFAULT_BRUSH_COLOR.to_string()
}

fn default_size() -> f32 {
    BrushConfig::default().size
}

fn main() {
    tracing_subscriber::fmt().without_time().compact().init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Replay {
            script,
            part,
            faces,
            output,
        } => replay(&script, part, faces.as_deref(), &output),
        Command::Demo { output } => demo(&output),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn replay(
    script_path: &Path,
    part: PartId,
    faces: Option<&[FaceLabel]>,
    output: &Path,
) -> Result<(), AppError> {
    let text = fs::read_to_string(script_path).map_err(|source| AppError::ReadScript {
        path: script_path.to_path_buf(),
        source,
    })?;
    let script: PaintScript = serde_json::from_str(&text)?;

    let viewport = script
        .viewport
        .as_ref()
        .map(|v| Vec2::new(v.width, v.height));
    let aspect = viewport.map_or(1.0, |v| v.x / v.y);
    let camera = match &script.camera {
        Some(pose) => ViewCamera::orbit(
            Vec3::ZERO,
            pose.yaw_deg,
            pose.pitch_deg,
            pose.distance,
            DEFAULT_CAMERA_FOV_DEG,
            aspect,
        ),
        None => default_camera(aspect),
    };

    let mut session = PaintSession::default();
    let defaults = BrushConfig::default();
    let mut placed = 0usize;
    for (index, stroke) in script.strokes.iter().enumerate() {
        let brush = BrushSettings {
            size: stroke.size,
            depth_factor: defaults.depth_factor,
            color: Rgb::from_hex(&stroke.color)?,
        };
        let ndc = match viewport {
            Some(size) => ViewCamera::pointer_to_ndc(Vec2::from(stroke.pointer), size),
            None => Vec2::from(stroke.pointer),
        };
        match session.paint(&camera, ndc, &brush) {
            Some(order) => {
                placed += 1;
                debug!(index, order, "stroke placed");
            }
            None => warn!(index, "stroke missed, skipped"),
        }
    }
    info!(strokes = script.strokes.len(), placed, "script replayed");

    bake_and_write(&session, part, faces, output)
}

fn demo(output: &Path) -> Result<(), AppError> {
    let mut session = PaintSession::default();
    let camera = default_camera(1.0);
    let defaults = BrushConfig::default();

    // Three dabs on the torso front
    let dabs: [(f32, f32, &str); 3] = [
        (-0.06, 0.05, "#d33"),
        (0.06, 0.05, "#3d3"),
        (0.0, -0.05, "#33d"),
    ];
    for (x, y, color) in dabs {
        let brush = BrushSettings {
            size: 0.6,
            depth_factor: defaults.depth_factor,
            color: Rgb::from_hex(color)?,
        };
        if session.paint(&camera, Vec2::new(x, y), &brush).is_none() {
            warn!(x, y, "demo dab missed");
        }
    }
    info!(decals = session.decal_count(), "demo strokes painted");

    bake_and_write(&session, PartId::Torso, None, output)
}

fn bake_and_write(
    session: &PaintSession,
    part: PartId,
    faces: Option<&[FaceLabel]>,
    output: &Path,
) -> Result<(), AppError> {
    let mut exporter = AtlasExporter::new(ExportSettings::default());
    let atlas = match faces {
        Some(faces) => exporter.bake_part_faces(session.rig(), session.registry(), part, faces)?,
        None => exporter.bake_part(session.rig(), session.registry(), part)?,
    };
    write_png(output, &atlas)?;
    info!(part = %part, path = %output.display(), "atlas exported");
    Ok(())
}

fn default_camera(aspect: f32) -> ViewCamera {
    ViewCamera::new(
        Vec3::new(0.0, 0.0, DEFAULT_CAMERA_DISTANCE),
        Vec3::ZERO,
        DEFAULT_CAMERA_FOV_DEG,
        aspect,
    )
}
