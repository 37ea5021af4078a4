//! Varta Render Engine
//!
//! Turns a content record into pixels and files.
//!
//! ```text
//! ContentRecord ──┐
//!                 ├── Layout Fitter (varta-layout-core)
//! Clock ──────────┘         │
//!                           ├── Compositor (boxes in 600x800 frame space)
//!                           │         │
//!                           │         ├── RasterSurface (paint @ pixel ratio)
//!                           │         │         │
//!                           │         │         ├── Download (PNG file)
//!                           │         │         └── Print (host spooler)
//!                           │
//! source image ── CropTool ─┴── reporter photo (300x300 PNG)
//! ```
//!
//! [`studio::Studio`] owns the single active record and wires the pieces
//! together.

pub mod compositor;
pub mod crop;
pub mod export;
pub mod painter;
pub mod raster;
pub mod studio;

pub use compositor::{compose, ClippingComposition, ClippingScene};
pub use crop::{CropConfig, CropPhase, CropState, CropTool};
pub use export::*;
pub use painter::{RasterSurface, RenderSurface};
pub use studio::{Studio, UploadOutcome};
