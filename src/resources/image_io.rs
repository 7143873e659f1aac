//! Image decode/encode and the UV-atlas raster image, backed by the
//! `image` crate. Grounded in the teacher's `resources::texture::Texture`
//! (pixel buffer + `Format` enum), adapted to hold real decoded/encoded
//! image buffers instead of a hand-rolled pixel `Vec<u8>`.

use image::{ImageBuffer, Rgb, Rgba};

use crate::config::Config;
use crate::error::Result;

/// Either an RGB or an RGBA raster image, depending on
/// [`Config::quality_mode`].
pub enum AtlasImage {
    /// 8-bit RGB, used outside quality mode.
    Rgb(ImageBuffer<Rgb<u8>, Vec<u8>>),
    /// 8-bit RGBA, used in quality mode.
    Rgba(ImageBuffer<Rgba<u8>, Vec<u8>>),
}

impl AtlasImage {
    /// Creates a new all-black atlas of the given size in the format
    /// `config.quality_mode` selects.
    pub fn blank(width: u32, height: u32, config: &Config) -> AtlasImage {
        if config.quality_mode {
            AtlasImage::Rgba(ImageBuffer::new(width, height))
        } else {
            AtlasImage::Rgb(ImageBuffer::new(width, height))
        }
    }

    /// Decodes an existing atlas from disk, to be refined in place.
    pub fn load(path: &std::path::Path, config: &Config) -> Result<AtlasImage> {
        let dynamic = image::open(path)?;
        Ok(if config.quality_mode {
            AtlasImage::Rgba(dynamic.to_rgba8())
        } else {
            AtlasImage::Rgb(dynamic.to_rgb8())
        })
    }

    /// Loads the photographic source image, converted to the pixel format
    /// `config.quality_mode` selects.
    pub fn load_source(path: &std::path::Path, config: &Config) -> Result<AtlasImage> {
        AtlasImage::load(path, config)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            AtlasImage::Rgb(img) => img.width(),
            AtlasImage::Rgba(img) => img.width(),
        }
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            AtlasImage::Rgb(img) => img.height(),
            AtlasImage::Rgba(img) => img.height(),
        }
    }

    /// Reads the pixel at `(x, y)`, returned as RGBA (alpha forced to 255
    /// for RGB images).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        match self {
            AtlasImage::Rgb(img) => {
                let p = img.get_pixel(x, y);
                [p[0], p[1], p[2], 255]
            }
            AtlasImage::Rgba(img) => img.get_pixel(x, y).0,
        }
    }

    /// Writes `pixel` at `(x, y)`. Extra/missing channels are handled per
    /// format (alpha dropped for RGB, forced to 255 for RGBA-from-RGB
    /// sources).
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        match self {
            AtlasImage::Rgb(img) => img.put_pixel(x, y, Rgb([pixel[0], pixel[1], pixel[2]])),
            AtlasImage::Rgba(img) => img.put_pixel(x, y, Rgba(pixel)),
        }
    }

    /// Saves as a PNG at `path`.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        match self {
            AtlasImage::Rgb(img) => img.save(path)?,
            AtlasImage::Rgba(img) => img.save(path)?,
        }
        Ok(())
    }
}
