//! Per-face rasterization: depth-buffer construction and UV-to-image pixel
//! copy, both built on the shared [`algorithm::rasterize_triangle`] walk.

use glam::DVec2;
use rayon::prelude::*;

use crate::algorithm::rasterize_triangle;
use crate::config::Config;
use crate::resources::image_io::AtlasImage;
use crate::scene::Scene;

/// One triangle's screen-space positions and view-space depths, ready to be
/// rasterized into a depth buffer.
#[derive(Clone, Copy)]
pub struct DepthTriangle {
    /// Screen/buffer-space `(x, y)` per vertex.
    pub screen: [DVec2; 3],
    /// `|z_view|` per vertex.
    pub depth: [f64; 3],
}

/// A 2D grid of minimum view-space depths, initialized to `+∞`.
#[derive(Clone)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl DepthBuffer {
    fn new(width: usize, height: usize) -> DepthBuffer {
        DepthBuffer {
            width,
            height,
            values: vec![f64::INFINITY; width * height],
        }
    }

    /// Depth recorded at `(row, column)`, or `+∞` if nothing was rasterized
    /// there, or out of bounds.
    pub fn get(&self, row: i64, column: i64) -> f64 {
        if row < 0 || column < 0 || row as usize >= self.height || column as usize >= self.width {
            return f64::INFINITY;
        }
        self.values[row as usize * self.width + column as usize]
    }

    fn set_min(&mut self, row: i64, column: i64, z: f64) {
        if row < 0 || column < 0 || row as usize >= self.height || column as usize >= self.width {
            return;
        }
        let index = row as usize * self.width + column as usize;
        if z < self.values[index] {
            self.values[index] = z;
        }
    }

    fn rasterize_into(&mut self, triangle: &DepthTriangle) {
        let [a, b, c] = triangle.screen;
        let [za, zb, zc] = triangle.depth;
        rasterize_triangle(a, b, c, |x, y, alpha, beta, gamma| {
            let z = alpha * za + beta * zb + gamma * zc;
            self.set_min(y, x, z);
        });
    }

    fn merge_min(mut self, other: DepthBuffer) -> DepthBuffer {
        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            if *b < *a {
                *a = *b;
            }
        }
        self
    }
}

/// Builds a depth buffer from a list of screen-space triangles by
/// rasterizing each and keeping, per pixel, the minimum interpolated depth.
///
/// Depth writes are a commutative/associative min-reduction, so triangles
/// are processed in parallel via `rayon`'s fold/reduce: each worker
/// accumulates its own buffer, and buffers are merged pairwise with an
/// elementwise minimum. The result does not depend on processing order.
pub fn build_depth_buffer(triangles: &[DepthTriangle], width: u32, height: u32) -> DepthBuffer {
    let (width, height) = (width as usize, height as usize);
    triangles
        .par_iter()
        .fold(
            || DepthBuffer::new(width, height),
            |mut buffer, triangle| {
                buffer.rasterize_into(triangle);
                buffer
            },
        )
        .reduce(|| DepthBuffer::new(width, height), DepthBuffer::merge_min)
}

/// Copies pixels from the source image into the UV atlas for every
/// surviving face.
///
/// Runs after the screen transform: `scene.vertices` are already in image
/// pixel coordinates. Faces are processed strictly in scene face-list
/// order (not parallelized) so that when multiple faces project to the
/// same atlas pixel, the last face processed wins, as spec'd — a guarantee
/// that would be lost under face-level parallelism without per-pixel
/// arbitration.
pub fn copy_pixels(scene: &Scene, source: &AtlasImage, atlas: &mut AtlasImage, config: &Config) {
    let atlas_width = atlas.width();
    let atlas_height = atlas.height();

    for face in &scene.faces {
        let mut uv_pos = [DVec2::ZERO; 3];
        let mut image_pos = [DVec2::ZERO; 3];
        for i in 0..3 {
            let vt = scene.tex_coords[face.tex_indices[i] as usize];
            // UV origin is bottom-left; image/atlas origin is top-left.
            uv_pos[i] = DVec2::new(
                atlas_width as f64 * vt.x,
                atlas_height as f64 * (1.0 - vt.y),
            );
            let pos = scene.vertices[face.vertex_indices[i] as usize].position;
            image_pos[i] = DVec2::new(pos.x, pos.y);
        }

        rasterize_triangle(uv_pos[0], uv_pos[1], uv_pos[2], |x, y, alpha, beta, gamma| {
            let tex_x = wrap(x, atlas_width as i64);
            let tex_y = wrap(y, atlas_height as i64);

            let src_x = (alpha * image_pos[0].x + beta * image_pos[1].x + gamma * image_pos[2].x)
                .floor();
            let src_y = (alpha * image_pos[0].y + beta * image_pos[1].y + gamma * image_pos[2].y)
                .floor();
            if src_x < 0.0 || src_y < 0.0 {
                return;
            }
            let (src_x, src_y) = (src_x as u32, src_y as u32);
            if src_x >= source.width() || src_y >= source.height() {
                return;
            }

            let pixel = source.get_pixel(src_x, src_y);
            atlas.put_pixel(tex_x, tex_y, pixel);
        });
    }
}

/// Wraps a rasterized coordinate into `[0, dimension)`, treating the atlas
/// as a torus (UV values `>= 1` wrap back to the start).
fn wrap(value: i64, dimension: i64) -> u32 {
    let wrapped = value.rem_euclid(dimension);
    wrapped as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_buffer_keeps_the_closer_surface() {
        let near = DepthTriangle {
            screen: [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0), DVec2::new(0.0, 10.0)],
            depth: [1.0, 1.0, 1.0],
        };
        let far = DepthTriangle {
            screen: [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0), DVec2::new(0.0, 10.0)],
            depth: [5.0, 5.0, 5.0],
        };
        let buffer = build_depth_buffer(&[far, near], 16, 16);
        assert!((buffer.get(2, 2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn wrap_handles_values_past_one_dimension() {
        assert_eq!(wrap(10, 100), 10);
        assert_eq!(wrap(110, 100), 10);
        assert_eq!(wrap(-1, 100), 99);
    }
}
