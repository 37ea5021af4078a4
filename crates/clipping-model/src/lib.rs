//! Varta Clipping Model
//!
//! Defines the core data contracts for a newspaper clipping:
//! - **Content:** The editable record (headline, body, credits, images, theme)
//! - **Theme:** Static colour palettes for each clipping style
//! - **Geometry:** Points, rectangles, and circles in frame pixel space
//! - **Images:** Inline `data:` URL images produced from local files
//! - **Dateline:** Marathi-language date formatting for the masthead
//!
//! All geometry is expressed in the fixed 600x800 frame coordinate space;
//! raster backends multiply by their pixel ratio.

pub mod content;
pub mod dateline;
pub mod geometry;
pub mod image_ref;
pub mod masthead;
pub mod theme;

pub use content::*;
pub use geometry::*;
pub use image_ref::*;
pub use theme::*;
