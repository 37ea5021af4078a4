//! Write an empty content file.

use std::path::PathBuf;

use varta_clipping_model::ContentRecord;

pub fn run(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    ContentRecord::default()
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write content file: {e}"))?;

    println!("Created {}", path.display());
    println!("  Fill in headline, body, reporter_name, and designation,");
    println!("  then run: varta render {}", path.display());
    Ok(())
}
