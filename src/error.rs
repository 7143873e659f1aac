//! Error types surfaced by the extraction pipeline.

use thiserror::Error;

/// Fatal errors that can terminate a run.
///
/// Geometric degeneracies (zero-area triangles, `z == 0` vertices) are
/// handled silently elsewhere and are not represented here.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Wrong file extension, malformed OBJ line, or a camera JSON file
    /// missing a required field / failing validation.
    #[error("{0}")]
    InputFormat(String),

    /// A file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An image could not be decoded or encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Camera JSON could not be parsed.
    #[error("camera JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtractError>;
