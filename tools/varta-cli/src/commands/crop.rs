//! Crop a portrait to the square reporter-photo raster.

use std::path::PathBuf;

use varta_clipping_model::{ImageRef, Point2D};
use varta_common::config::AppConfig;
use varta_common::error::VartaError;
use varta_render_engine::{CropConfig, CropTool};

use crate::CropArgs;

pub fn run(
    config: &AppConfig,
    image: PathBuf,
    output: PathBuf,
    adjust: CropArgs,
    preview: Option<PathBuf>,
) -> anyhow::Result<()> {
    let source = ImageRef::from_file(&image)
        .and_then(|r| r.decode())
        .map_err(|e| anyhow::anyhow!("Failed to read image: {e}"))?;

    let mut tool = CropTool::with_image(CropConfig::from(&config.crop), &source);
    apply(&mut tool, adjust);

    if let Some(preview_path) = preview {
        let rendered = tool
            .render_preview()
            .ok_or_else(|| VartaError::crop("source image not loaded"))?;
        rendered.save(&preview_path)?;
        println!("Preview: {}", preview_path.display());
    }

    let cropped = tool
        .commit()
        .ok_or_else(|| VartaError::crop("source image not loaded"))?;
    cropped.save(&output)?;

    let state = tool.state();
    println!("Cropped {} -> {}", image.display(), output.display());
    println!(
        "  Zoom: {:.2}, pan: ({}, {}), size: {}x{}",
        state.zoom,
        state.pan.x,
        state.pan.y,
        cropped.width(),
        cropped.height()
    );
    Ok(())
}

/// Replay the requested zoom and pan as slider and drag input.
pub fn apply(tool: &mut CropTool, adjust: CropArgs) {
    let zoom = tool.set_zoom(adjust.zoom);
    if zoom != adjust.zoom {
        tracing::warn!(requested = adjust.zoom, applied = zoom, "Zoom clamped");
    }
    tool.drag_by(Point2D::new(adjust.pan_x, adjust.pan_y));
}
