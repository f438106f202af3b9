use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body parts of the classic segmented rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PartId {
    Head = 0,
    Torso = 1,
    RightArm = 2,
    LeftArm = 3,
    RightLeg = 4,
    LeftLeg = 5,
}

impl PartId {
    /// All parts, in registry bucket order
    pub const ALL: [PartId; 6] = [
        PartId::Head,
        PartId::Torso,
        PartId::RightArm,
        PartId::LeftArm,
        PartId::RightLeg,
        PartId::LeftLeg,
    ];

    /// Whether decals may ever land on this part. The head is display-only.
    pub fn is_paintable(self) -> bool {
        !matches!(self, PartId::Head)
    }

    /// Registry bucket index
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartId::Head => "head",
            PartId::Torso => "torso",
            PartId::RightArm => "rightArm",
            PartId::LeftArm => "leftArm",
            PartId::RightLeg => "rightLeg",
            PartId::LeftLeg => "leftLeg",
        }
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartId {
    type Err = ParsePartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(PartId::Head),
            "torso" => Ok(PartId::Torso),
            "rightArm" | "right-arm" => Ok(PartId::RightArm),
            "leftArm" | "left-arm" => Ok(PartId::LeftArm),
            "rightLeg" | "right-leg" => Ok(PartId::RightLeg),
            "leftLeg" | "left-leg" => Ok(PartId::LeftLeg),
            _ => Err(ParsePartError {
                name: s.to_string(),
            }),
        }
    }
}

/// Error for an unrecognized part name
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown body part '{name}'")]
pub struct ParsePartError {
    pub name: String,
}

/// The six cube faces a snapped normal can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FaceLabel {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
    Front = 4,
    Back = 5,
}

impl FaceLabel {
    /// Face traversal order used by the baking pipeline
    pub const BAKE_ORDER: [FaceLabel; 6] = [
        FaceLabel::Front,
        FaceLabel::Back,
        FaceLabel::Left,
        FaceLabel::Right,
        FaceLabel::Up,
        FaceLabel::Down,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FaceLabel::Right => "RIGHT",
            FaceLabel::Left => "LEFT",
            FaceLabel::Up => "UP",
            FaceLabel::Down => "DOWN",
            FaceLabel::Front => "FRONT",
            FaceLabel::Back => "BACK",
        }
    }
}

impl fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaceLabel {
    type Err = ParseFaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RIGHT" => Ok(FaceLabel::Right),
            "LEFT" => Ok(FaceLabel::Left),
            "UP" => Ok(FaceLabel::Up),
            "DOWN" => Ok(FaceLabel::Down),
            "FRONT" => Ok(FaceLabel::Front),
            "BACK" => Ok(FaceLabel::Back),
            _ => Err(ParseFaceError {
                name: s.to_string(),
            }),
        }
    }
}

/// Error for an unrecognized face name
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown face label '{name}'")]
pub struct ParseFaceError {
    pub name: String,
}

/// One of the six canonical axis-aligned unit directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SnappedDirection {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl SnappedDirection {
    /// Candidate axes in classifier tie-break order (first maximum wins)
    pub const ALL: [SnappedDirection; 6] = [
        SnappedDirection::PosX,
        SnappedDirection::NegX,
        SnappedDirection::PosY,
        SnappedDirection::NegY,
        SnappedDirection::PosZ,
        SnappedDirection::NegZ,
    ];

    /// The unit vector for this direction
    pub fn unit(self) -> Vec3 {
        match self {
            SnappedDirection::PosX => Vec3::X,
            SnappedDirection::NegX => Vec3::NEG_X,
            SnappedDirection::PosY => Vec3::Y,
            SnappedDirection::NegY => Vec3::NEG_Y,
            SnappedDirection::PosZ => Vec3::Z,
            SnappedDirection::NegZ => Vec3::NEG_Z,
        }
    }

    /// The face label this direction selects (total over all six directions)
    pub fn face_label(self) -> FaceLabel {
        match self {
            SnappedDirection::PosX => FaceLabel::Right,
            SnappedDirection::NegX => FaceLabel::Left,
            SnappedDirection::PosY => FaceLabel::Up,
            SnappedDirection::NegY => FaceLabel::Down,
            SnappedDirection::PosZ => FaceLabel::Front,
            SnappedDirection::NegZ => FaceLabel::Back,
        }
    }
}

/// An RGB paint color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rgb` or `#rrggbb` hex string (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let err = || ParseColorError {
            input: hex.to_string(),
        };
        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, ch) in out.iter_mut().zip(digits.chars()) {
                    let nibble = ch.to_digit(16).ok_or_else(err)? as u8;
                    *slot = nibble << 4 | nibble;
                }
                Ok(Self::new(out[0], out[1], out[2]))
            }
            6 => {
                let mut out = [0u8; 3];
                for (slot, pair) in out.iter_mut().zip(digits.as_bytes().chunks(2)) {
                    let pair = std::str::from_utf8(pair).map_err(|_| err())?;
                    *slot = u8::from_str_radix(pair, 16).map_err(|_| err())?;
                }
                Ok(Self::new(out[0], out[1], out[2]))
            }
            _ => Err(err()),
        }
    }

    /// Color as linear float channels in [0, 1]
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Color as RGBA float channels with the given alpha
    pub fn to_rgba_f32(self, alpha: f32) -> [f32; 4] {
        let [r, g, b] = self.to_f32();
        [r, g, b, alpha]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error for a malformed hex color string
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid hex color '{input}' (expected #rgb or #rrggbb)")]
pub struct ParseColorError {
    pub input: String,
}

/// A resolved pointer hit on a paintable surface.
///
/// Produced once per pointer sample by the hit resolver; plain immutable
/// data, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// The part whose base mesh was hit
    pub part: PartId,
    /// Hit position in world space
    pub position: Vec3,
    /// Surface normal at the hit, in world space
    pub normal: Vec3,
}

/// The oriented projection volume a decal is clipped against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalVolume {
    /// Box center in world space (the hit position)
    pub center: Vec3,
    /// Rotation taking the canonical +Z projection axis to the snapped normal
    pub orientation: Quat,
    /// Box extents: square in the tangent plane, thin along the normal
    pub size: Vec3,
}

/// Clipped decal geometry: a triangle soup with projector-space UVs.
///
/// `positions` holds world-space vertices, three per triangle; `uvs` is the
/// same length, with (0,0)..(1,1) spanning the decal box footprint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrapMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl WrapMesh {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A single placed paint mark
#[derive(Debug, Clone)]
pub struct Decal {
    /// The part this decal is registered under
    pub part: PartId,
    /// Face selected by the snapped hit normal, used for export filtering
    pub face: FaceLabel,
    /// The projection volume the wrap was clipped against
    pub volume: DecalVolume,
    /// Paint color
    pub color: Rgb,
    /// Stacking order within the session; strictly increasing
    pub draw_order: u64,
    /// Mirrors the owning part's visibility
    pub visible: bool,
    /// Clipped wrap geometry, ready for display or baking
    pub mesh: WrapMesh,
}

/// Brush parameters supplied by the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    /// Edge length of the decal box in the tangent plane, world units
    pub size: f32,
    /// Box extent along the snapped normal as a fraction of `size`
    pub depth_factor: f32,
    /// Paint color
    pub color: Rgb,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            size: 1.0,
            depth_factor: 0.5,
            color: Rgb::new(0xff, 0xaa, 0xaa),
        }
    }
}
