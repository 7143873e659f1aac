//! Command-line argument parsing for the `texture_extract` binary.

use std::path::PathBuf;

use clap::Parser;

/// Extracts a UV texture atlas for a textured mesh from a photograph taken
/// with a known camera.
#[derive(Parser, Debug)]
#[command(name = "texture_extract")]
pub struct Cli {
    /// Path to the mesh's Wavefront OBJ file.
    pub obj_file: PathBuf,

    /// Path to the camera description (JSON).
    pub camera_file: PathBuf,

    /// Path to the source photograph.
    pub image_file: PathBuf,

    /// Path to an existing UV atlas to refine, instead of starting blank.
    pub base_atlas_file: Option<PathBuf>,
}
