use anyhow::Context;
use clap::Parser;
use log::info;

use texture_extract::cli::Cli;
use texture_extract::config::Config;
use texture_extract::extractor::Extractor;

const OUTPUT_FILE: &str = "texture.png";

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::default();

    let extractor = Extractor::load(
        &cli.obj_file,
        &cli.camera_file,
        &cli.image_file,
        cli.base_atlas_file.as_deref(),
        config,
    )
    .with_context(|| format!("failed to load inputs from {}", cli.obj_file.display()))?;

    let atlas = extractor
        .extract()
        .context("texture extraction failed")?;

    atlas
        .save(std::path::Path::new(OUTPUT_FILE))
        .with_context(|| format!("failed to write {OUTPUT_FILE}"))?;

    info!("wrote {OUTPUT_FILE}");
    Ok(())
}
