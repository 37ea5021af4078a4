//! Varta Layout Core: the Fitter
//!
//! Chooses how a clipping is presented so its content stays inside the
//! fixed 600x800 frame:
//! - **Fitter:** Headline tier, body font, columns, line height, photo height
//! - **Overflow:** Advisory estimate of whether the body still overflows
//! - **Preview scale:** Responsive zoom for showing the frame on screen
//!
//! This crate is pure computation with no I/O and no rendering.
//! All inputs are data; all outputs are data.

pub mod fitter;
pub mod overflow;
pub mod preview_scale;

pub use fitter::{fit, fit_record, FitInput, HeadlineTier, PresentationParams};
pub use overflow::{estimate_overflow, OverflowEstimate};
pub use preview_scale::{PreviewScaleConfig, PreviewScaler};

/// Frame width in pixels.
pub const FRAME_WIDTH: u32 = 600;

/// Frame height in pixels.
pub const FRAME_HEIGHT: u32 = 800;
