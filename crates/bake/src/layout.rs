//! Atlas layout for the classic 585x559 character template.
//!
//! Rectangles follow the template's bottom-up convention: `y0` is the edge
//! closest to the bottom of the sheet and `y1` the edge closest to the top.
//! Compositing converts to top-down rows. The torso occupies the large
//! center-bottom cross; each leg gets a half-width cross near the top. Arms
//! have no region on this template.

use decal::{FaceLabel, PartId};

/// One face cell of the template, in bottom-up template coordinates.
///
/// `x1`/`y1` are exclusive, so `width`/`height` are plain differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl FaceRect {
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Same-size rect translated by whole template pixels
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x0: (self.x0 as i32 + dx) as u32,
            y0: (self.y0 as i32 + dy) as u32,
            x1: (self.x1 as i32 + dx) as u32,
            y1: (self.y1 as i32 + dy) as u32,
        }
    }

    pub const fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub const fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

// Torso cross, center-bottom of the sheet
const TORSO_FRONT: FaceRect = FaceRect::new(231, 357, 359, 485);
const TORSO_BACK: FaceRect = FaceRect::new(427, 357, 555, 485);
const TORSO_LEFT: FaceRect = FaceRect::new(361, 357, 425, 485);
const TORSO_RIGHT: FaceRect = FaceRect::new(165, 357, 229, 485);
const TORSO_UP: FaceRect = FaceRect::new(231, 487, 359, 551);
const TORSO_DOWN: FaceRect = FaceRect::new(231, 290, 359, 355);

// Bottom-left leg cross, upper-left of the sheet
const BL_FRONT: FaceRect = FaceRect::new(217, 76, 281, 204);
const BL_BACK: FaceRect = FaceRect::new(85, 76, 149, 204);
const BL_UP: FaceRect = FaceRect::new(217, 206, 281, 270);
const BL_DOWN: FaceRect = BL_UP.offset(0, -196);
const BL_LEFT: FaceRect = BL_BACK.offset(-66, 0);
const BL_RIGHT: FaceRect = BL_FRONT.offset(-66, 0);

// Bottom-right leg cross, upper-right of the sheet; side cells mirror the
// bottom-left arrangement
const BR_FRONT: FaceRect = FaceRect::new(308, 76, 372, 204);
const BR_BACK: FaceRect = FaceRect::new(440, 76, 504, 204);
const BR_UP: FaceRect = FaceRect::new(308, 206, 372, 270);
const BR_DOWN: FaceRect = BR_UP.offset(0, -196);
const BR_LEFT: FaceRect = BR_FRONT.offset(66, 0);
const BR_RIGHT: FaceRect = BR_BACK.offset(66, 0);

/// Template region group a body part bakes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartGroup {
    Torso,
    BottomLeft,
    BottomRight,
}

impl PartGroup {
    /// Group for a body part, or `None` when the template has no region
    /// for it (arms, head).
    pub fn for_part(part: PartId) -> Option<Self> {
        match part {
            PartId::Torso => Some(PartGroup::Torso),
            PartId::LeftLeg => Some(PartGroup::BottomLeft),
            PartId::RightLeg => Some(PartGroup::BottomRight),
            PartId::Head | PartId::LeftArm | PartId::RightArm => None,
        }
    }

    /// Template cell for one face of this group
    pub fn face_rect(&self, face: FaceLabel) -> FaceRect {
        match (self, face) {
            (PartGroup::Torso, FaceLabel::Front) => TORSO_FRONT,
            (PartGroup::Torso, FaceLabel::Back) => TORSO_BACK,
            (PartGroup::Torso, FaceLabel::Left) => TORSO_LEFT,
            (PartGroup::Torso, FaceLabel::Right) => TORSO_RIGHT,
            (PartGroup::Torso, FaceLabel::Up) => TORSO_UP,
            (PartGroup::Torso, FaceLabel::Down) => TORSO_DOWN,
            (PartGroup::BottomLeft, FaceLabel::Front) => BL_FRONT,
            (PartGroup::BottomLeft, FaceLabel::Back) => BL_BACK,
            (PartGroup::BottomLeft, FaceLabel::Left) => BL_LEFT,
            (PartGroup::BottomLeft, FaceLabel::Right) => BL_RIGHT,
            (PartGroup::BottomLeft, FaceLabel::Up) => BL_UP,
            (PartGroup::BottomLeft, FaceLabel::Down) => BL_DOWN,
            (PartGroup::BottomRight, FaceLabel::Front) => BR_FRONT,
            (PartGroup::BottomRight, FaceLabel::Back) => BR_BACK,
            (PartGroup::BottomRight, FaceLabel::Left) => BR_LEFT,
            (PartGroup::BottomRight, FaceLabel::Right) => BR_RIGHT,
            (PartGroup::BottomRight, FaceLabel::Up) => BR_UP,
            (PartGroup::BottomRight, FaceLabel::Down) => BR_DOWN,
        }
    }
}
