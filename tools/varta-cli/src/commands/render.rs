//! Download a clipping as a PNG.

use std::path::PathBuf;

use varta_clipping_model::{masthead, ContentRecord, ContentUpdate, ImageRef, ImageSlot, Theme};
use varta_common::config::AppConfig;
use varta_render_engine::Studio;

use crate::CropArgs;

/// Overrides given on the command line.
pub struct RenderOptions {
    pub output: Option<PathBuf>,
    pub scale: Option<u32>,
    pub theme: Option<String>,
    pub reporter_photo: Option<PathBuf>,
    pub adjust: CropArgs,
}

pub async fn run(mut config: AppConfig, path: PathBuf, options: RenderOptions) -> anyhow::Result<()> {
    let content = ContentRecord::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load content: {e}"))?;

    if let Some(dir) = options.output {
        config.output_dir = dir;
    }
    if let Some(scale) = options.scale {
        config.export.pixel_ratio = scale;
    }

    let mut studio = Studio::new(content, config);

    if let Some(label) = options.theme {
        let theme = Theme::from_label(&label).ok_or_else(|| {
            anyhow::anyhow!("Unknown theme: {label}. Use: classic, kesari, modern-blue")
        })?;
        studio.apply(ContentUpdate::theme(theme));
    }

    if let Some(photo_path) = options.reporter_photo {
        let image = ImageRef::from_file(&photo_path)
            .map_err(|e| anyhow::anyhow!("Failed to read reporter photo: {e}"))?;
        studio.upload(ImageSlot::ReporterPhoto, image)?;
        if let Some(tool) = studio.crop_tool_mut() {
            super::crop::apply(tool, options.adjust);
        }
        if !studio.commit_crop()? {
            anyhow::bail!("Reporter photo could not be cropped");
        }
    }

    println!("Rendering {} ({})", path.display(), studio.content().theme.label());
    super::fit::print_params(&studio.params());

    match studio.download().await {
        Ok(file) => {
            println!("{}: {}", masthead::EXPORT_DONE_MESSAGE, file.display());
            Ok(())
        }
        Err(e) => {
            if e.is_retryable() {
                eprintln!("{}", masthead::EXPORT_FAILED_MESSAGE);
            }
            Err(e.into())
        }
    }
}
