//! Camera description, loaded from JSON and validated.

use glam::DVec3;
use serde::Deserialize;

use crate::error::{ExtractError, Result};

/// Raw camera fields as they appear in the input JSON.
///
/// Additional fields in the JSON document are permitted and ignored.
#[derive(Debug, Deserialize)]
struct CameraSpec {
    position: [f64; 3],
    look_direction: [f64; 3],
    up_direction: [f64; 3],
    fov_horizontal: f64,
}

/// A validated camera, plus the fields derived once the target image's
/// dimensions are known.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Position of the camera (center of projection) in world space.
    pub position: DVec3,
    /// Direction the camera looks, non-zero.
    pub look_direction: DVec3,
    /// "Up" direction, not parallel to `look_direction`.
    pub up_direction: DVec3,
    /// Horizontal field of view, in degrees.
    pub fov_horizontal: f64,
    /// `image_width / image_height`. `None` until an image is attached.
    pub aspect_ratio: Option<f64>,
    /// Derived vertical field of view, in degrees. `None` until an image is
    /// attached.
    pub fov_vertical: Option<f64>,
}

/// cross(look, up) is treated as zero below this length — the vectors are
/// floats loaded from JSON, not the small exact integers the original
/// Python test data used, so an exact-equality check would be too strict.
const PARALLEL_EPSILON: f64 = 1e-9;

impl Camera {
    /// Parses and validates a camera description from a JSON file.
    pub fn load(path: &std::path::Path) -> Result<Camera> {
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            return Err(ExtractError::InputFormat(
                "camera file should be a json file".into(),
            ));
        }
        let text = std::fs::read_to_string(path)?;
        let spec: CameraSpec = serde_json::from_str(&text)?;
        Camera::from_spec(spec)
    }

    fn from_spec(spec: CameraSpec) -> Result<Camera> {
        let look_direction = DVec3::from(spec.look_direction);
        let up_direction = DVec3::from(spec.up_direction);
        if look_direction.cross(up_direction).length() < PARALLEL_EPSILON {
            return Err(ExtractError::InputFormat(
                "look_direction and up_direction must not be parallel".into(),
            ));
        }
        Ok(Camera {
            position: DVec3::from(spec.position),
            look_direction,
            up_direction,
            fov_horizontal: spec.fov_horizontal,
            aspect_ratio: None,
            fov_vertical: None,
        })
    }

    /// Derives `aspect_ratio` and `fov_vertical` from the target image's
    /// dimensions.
    pub fn attach_image_dimensions(&mut self, image_width: u32, image_height: u32) {
        let aspect_ratio = image_width as f64 / image_height as f64;
        let fov_h_rad = self.fov_horizontal.to_radians();
        let fov_v_rad = 2.0 * ((1.0 / aspect_ratio) * (fov_h_rad / 2.0).tan()).atan();
        self.aspect_ratio = Some(aspect_ratio);
        self.fov_vertical = Some(fov_v_rad.to_degrees());
    }
}
