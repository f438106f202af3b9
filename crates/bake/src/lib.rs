//! Applique texture baking - painted decals to a clothing-template atlas
//!
//! A CPU rendition of the editor's export path:
//! - [`surface`] - Float render target with depth, and the 8-bit atlas canvas
//! - [`camera`] - Orthographic face cameras with a frozen per-face basis
//! - [`raster`] - Edge-function triangle fill, depth bias, and brush masks
//! - [`color`] - Linear-to-sRGB transfer and saturation boost
//! - [`layout`] - The fixed atlas rectangle table per part group
//! - [`export`] - The face-by-face bake pipeline and PNG emission

pub mod camera;
pub mod color;
pub mod export;
pub mod layout;
pub mod raster;
pub mod surface;

pub use camera::*;
pub use color::*;
pub use export::*;
pub use layout::*;
pub use raster::*;
pub use surface::*;
