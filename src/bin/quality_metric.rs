//! Standalone CIE-Lab image-quality comparison tool.
//!
//! Compares an extracted (RGBA) texture atlas against a ground-truth
//! photograph of the same region, reporting per-pixel color distance in
//! CIE-Lab space and writing a `visual_quality.png` heat map of the worst
//! offenders. Not part of the extraction pipeline itself.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use image::{ImageBuffer, Rgba, RgbaImage};
use palette::{IntoColor, Lab, Srgb};

use texture_extract::config::Config;

/// Compares an extracted texture atlas against a ground-truth image.
#[derive(Parser)]
#[command(name = "quality_metric")]
struct Cli {
    /// Path to the ground-truth photograph.
    ground_truth: PathBuf,
    /// Path to the extracted texture atlas (must be RGBA).
    texture: PathBuf,
}

/// Maximum possible color distance used to normalize ratios and the
/// bad-pixel threshold. Mirrors the original tool's constant exactly: an L
/// channel spanning 100 and a/b channels spanning 255, even though Lab's a/b
/// range is not actually 0..255 — changing it would silently shift every
/// reported ratio and the 5% bad-pixel cutoff.
const MAX_DISTANCE: f64 = 374.23289072653884; // sqrt(100^2 + 255^2 + 255^2)

const BAD_PIXEL_RATIO: f64 = 0.05;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::default();

    let ground_truth = image::open(&cli.ground_truth)
        .with_context(|| format!("failed to open {}", cli.ground_truth.display()))?
        .to_rgba8();
    let texture = image::open(&cli.texture)
        .with_context(|| format!("failed to open {}", cli.texture.display()))?
        .to_rgba8();

    if texture.dimensions() != ground_truth.dimensions() {
        bail!("images can't be compared: dimensions differ");
    }

    let alpha_reference = texture.clone();

    let (texture, ground_truth) = if config.quality_blur {
        let composited = alpha_composite(&ground_truth, &texture);
        (
            image::imageops::blur(&composited, config.quality_blur_rate),
            image::imageops::blur(&ground_truth, config.quality_blur_rate),
        )
    } else {
        (texture, ground_truth)
    };

    let (width, height) = texture.dimensions();
    let mut heat_map: RgbaImage = ImageBuffer::new(width, height);

    let mut total_distance = 0.0f64;
    let mut total_ratio = 0.0f64;
    let mut total_pixels = 0u64;
    let mut bad_pixels = 0u64;

    for y in 0..height {
        for x in 0..width {
            if alpha_reference.get_pixel(x, y)[3] == 0 {
                continue;
            }

            let distance = lab_distance(texture.get_pixel(x, y), ground_truth.get_pixel(x, y));
            let ratio = distance / MAX_DISTANCE;

            let value = if config.quality_show_fault_intensity {
                (ratio.max(0.0).sqrt() * 255.0).floor() as u8
            } else if distance > BAD_PIXEL_RATIO * MAX_DISTANCE {
                bad_pixels += 1;
                255
            } else {
                0
            };
            heat_map.put_pixel(x, y, Rgba([value, 0, 0, 255]));

            total_distance += distance;
            total_ratio += ratio;
            total_pixels += 1;
        }
    }

    if total_pixels == 0 {
        bail!("no non-transparent pixels to compare");
    }

    println!("Total Distance: {total_distance}");
    println!("Total Pixels: {total_pixels}");
    println!("Average Distance: {}", total_distance / total_pixels as f64);
    println!("Average Ratio: {}%", 100.0 * total_ratio / total_pixels as f64);
    println!(
        "Bad Pixels Ratio: {}%",
        100.0 * bad_pixels as f64 / total_pixels as f64
    );

    heat_map
        .save("visual_quality.png")
        .context("failed to write visual_quality.png")?;

    Ok(())
}

/// Alpha-composites `over` on top of `under`, producing an opaque image the
/// same size as both.
fn alpha_composite(under: &RgbaImage, over: &RgbaImage) -> RgbaImage {
    ImageBuffer::from_fn(under.width(), under.height(), |x, y| {
        let u = under.get_pixel(x, y).0;
        let o = over.get_pixel(x, y).0;
        let alpha = o[3] as f64 / 255.0;
        let blend = |u: u8, o: u8| -> u8 {
            ((o as f64 * alpha) + (u as f64 * (1.0 - alpha))).round() as u8
        };
        Rgba([blend(u[0], o[0]), blend(u[1], o[1]), blend(u[2], o[2]), 255])
    })
}

/// CIE76 (plain Euclidean) distance between two sRGB pixels, converted to
/// CIE-Lab. Each pixel is alpha-blended against a white background first
/// (mirroring `rgba2rgb`, which the original always runs before `rgb2lab`
/// regardless of `quality_blur`), so callers don't need to pre-composite.
fn lab_distance(a: &Rgba<u8>, b: &Rgba<u8>) -> f64 {
    let lab_a = to_lab(a);
    let lab_b = to_lab(b);
    (((lab_a.l - lab_b.l) as f64).powi(2)
        + ((lab_a.a - lab_b.a) as f64).powi(2)
        + ((lab_a.b - lab_b.b) as f64).powi(2))
    .sqrt()
}

/// Alpha-blends a pixel's RGB channels against a white background, then
/// converts to CIE-Lab. A no-op for already-opaque pixels.
fn to_lab(pixel: &Rgba<u8>) -> Lab {
    let alpha = pixel[3] as f32 / 255.0;
    let blend = |channel: u8| -> f32 {
        (channel as f32 / 255.0) * alpha + (1.0 - alpha)
    };
    let srgb: Srgb<f32> = Srgb::new(blend(pixel[0]), blend(pixel[1]), blend(pixel[2]));
    srgb.into_color()
}
