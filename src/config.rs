//! Compile-time default configuration, mirroring the original `config.py`.

/// Tunable knobs for a single extraction run.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Width (in pixels) of the output UV atlas.
    pub texture_width: u32,
    /// Height (in pixels) of the output UV atlas.
    pub texture_height: u32,
    /// When true, the atlas (and input image) carry an alpha channel.
    pub quality_mode: bool,
    /// Width (in pixels) of the occlusion-culling depth buffer.
    pub depth_buffer_width: u32,
    /// Height (in pixels) of the occlusion-culling depth buffer.
    pub depth_buffer_height: u32,
    /// Depth tolerance (view-space units) used by occlusion culling to
    /// absorb depth-buffer discretization error.
    pub occlusion_culling_threshold: f64,
    /// Whether the quality metric tool should alpha-composite and
    /// Gaussian-blur both images before comparing, to tolerate small
    /// misalignment between the extracted atlas and the ground truth.
    pub quality_blur: bool,
    /// Gaussian blur sigma used when `quality_blur` is set.
    pub quality_blur_rate: f32,
    /// When true, the quality metric's heat map encodes each pixel's
    /// difference ratio as intensity instead of a flat bad/good threshold.
    pub quality_show_fault_intensity: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            texture_width: 1024,
            texture_height: 1024,
            quality_mode: false,
            depth_buffer_width: 256,
            depth_buffer_height: 256,
            occlusion_culling_threshold: 0.1,
            quality_blur: true,
            quality_blur_rate: 2.0,
            quality_show_fault_intensity: false,
        }
    }
}
