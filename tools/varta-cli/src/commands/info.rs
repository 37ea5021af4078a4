//! Show a content file and how it will be laid out.

use std::path::PathBuf;

use varta_clipping_model::{ContentRecord, ImageSlot};
use varta_common::clock::SystemClock;
use varta_render_engine::ClippingScene;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let content = ContentRecord::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load content: {e}"))?;
    let scene = ClippingScene::new(&content, &SystemClock);

    println!("Clipping: {}", path.display());
    println!("  Theme: {}", content.theme.label());
    println!("  Headline: {} chars", content.headline_len());
    println!("  Body: {} chars", content.body_len());
    println!("  Reporter: {}", content.display_reporter_name());
    println!("  Designation: {}", content.display_designation());
    println!("  Dateline: {}", scene.dateline);
    println!();

    println!("Images:");
    for slot in [ImageSlot::Photo, ImageSlot::Logo, ImageSlot::ReporterPhoto] {
        match content.image(slot) {
            Some(image) => println!("  {}: {}", slot.label(), image.mime_type()),
            None => println!("  {}: (none)", slot.label()),
        }
    }
    println!();

    println!("Layout:");
    super::fit::print_params(&scene.params);
    let estimate = scene.overflow();
    println!(
        "  Body lines: ~{} needed, {} available",
        estimate.lines_needed, estimate.lines_available
    );
    if estimate.overflows() {
        tracing::warn!(
            excess_lines = estimate.excess_lines(),
            "Body text likely overflows its area"
        );
    }

    Ok(())
}
