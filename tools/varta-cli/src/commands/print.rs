//! Send a clipping to the printer.

use std::path::PathBuf;

use varta_clipping_model::ContentRecord;
use varta_common::config::AppConfig;
use varta_render_engine::{CommandSpooler, Studio};

pub fn run(config: AppConfig, path: PathBuf) -> anyhow::Result<()> {
    let content = ContentRecord::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load content: {e}"))?;
    let spooler = CommandSpooler::detect()?;

    let studio = Studio::new(content, config);
    studio.print(&spooler)?;

    println!("Sent {} to the printer", path.display());
    Ok(())
}
