//! UV texture atlas extraction for a textured 3D mesh, from a single
//! photograph taken with a known camera.
//!
//! [`extractor::Extractor`] wires together OBJ/camera/image loading
//! ([`resources`], [`scene`]), the geometric transform stack and culling
//! ([`pipeline`]), and the per-face rasterizer ([`pipeline::rasterizer`])
//! into the full extraction pipeline.

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod resources;
pub mod scene;
