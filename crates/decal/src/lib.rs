//! Applique decal system - surface painting on a segmented humanoid rig
//!
//! This crate provides the GPU-free core of the decal editor:
//! - [`types`] - Parts, faces, colors, hits, and the decal record itself
//! - [`classify`] - Axis snapping of surface normals (the face classifier)
//! - [`mesh`] - Triangle meshes and the cuboid part builder
//! - [`raycast`] - Moller-Trumbore ray-mesh intersection
//! - [`rig`] - The classic five-part paintable rig
//! - [`camera`] - Editor view camera and pointer-to-ray conversion
//! - [`hit`] - Surface hit resolution against visible parts
//! - [`wrap`] - Oriented-box mesh clipping for decal geometry
//! - [`project`] - Decal orientation, sizing, and construction
//! - [`session`] - Paint registry and the stateful paint session

pub mod camera;
pub mod classify;
pub mod hit;
pub mod mesh;
pub mod project;
pub mod raycast;
pub mod rig;
pub mod session;
pub mod types;
pub mod wrap;

pub use camera::*;
pub use classify::*;
pub use hit::*;
pub use mesh::*;
pub use project::*;
pub use raycast::*;
pub use rig::*;
pub use session::*;
pub use types::*;
pub use wrap::*;
