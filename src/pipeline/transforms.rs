//! Construction of the linear transformation matrices used by the pipeline.

use glam::{DMat3, DMat4, DVec3};

/// The camera's local coordinate basis: `u` (right), `v` (up), `w` (back,
/// i.e. opposite the look direction).
///
/// Returns `None` if `look_direction` and `up_direction` are parallel (the
/// cross product used to build `u` would be zero).
pub fn camera_basis(look_direction: DVec3, up_direction: DVec3) -> Option<(DVec3, DVec3, DVec3)> {
    let w = -look_direction.normalize();
    let cross = up_direction.cross(w);
    if cross.length() == 0.0 {
        return None;
    }
    let u = cross.normalize();
    let v = w.cross(u);
    Some((u, v, w))
}

/// The view transform: translate the world so the camera sits at the
/// origin, then rotate so the camera's basis vectors become the coordinate
/// axes. Rows of the rotation block are `u`, `v`, `w`.
pub fn view_matrix(camera_position: DVec3, u: DVec3, v: DVec3, w: DVec3) -> DMat4 {
    let translation = DMat4::from_translation(-camera_position);
    let rotation = DMat4::from_mat3(DMat3::from_cols(
        DVec3::new(u.x, v.x, w.x),
        DVec3::new(u.y, v.y, w.y),
        DVec3::new(u.z, v.z, w.z),
    ));
    rotation * translation
}

/// Just the rotation block of [`view_matrix`], for transforming normals
/// (directions should not be translated).
pub fn view_rotation(u: DVec3, v: DVec3, w: DVec3) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(u.x, v.x, w.x),
        DVec3::new(u.y, v.y, w.y),
        DVec3::new(u.z, v.z, w.z),
    )
}

/// Maps normalized device coordinates `(x, y) ∈ [-1, 1]` to pixel
/// coordinates `width × height`. The negative `y` scale flips `y` since
/// image pixel-y grows downward.
pub fn screen_matrix(width: f64, height: f64) -> DMat4 {
    DMat4 {
        x_axis: glam::DVec4::new(width / 2.0, 0.0, 0.0, 0.0),
        y_axis: glam::DVec4::new(0.0, -height / 2.0, 0.0, 0.0),
        z_axis: glam::DVec4::new(0.0, 0.0, 1.0, 0.0),
        w_axis: glam::DVec4::new(width / 2.0, height / 2.0, 0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_is_orthonormal_for_axis_aligned_camera() {
        let (u, v, w) = camera_basis(DVec3::NEG_Z, DVec3::Y).unwrap();
        assert!((u - DVec3::X).length() < 1e-9);
        assert!((v - DVec3::Y).length() < 1e-9);
        assert!((w - DVec3::Z).length() < 1e-9);
    }

    #[test]
    fn basis_fails_for_parallel_look_and_up() {
        assert!(camera_basis(DVec3::NEG_Z, DVec3::Z).is_none());
    }

    #[test]
    fn view_transform_is_invertible() {
        let (u, v, w) = camera_basis(DVec3::NEG_Z, DVec3::Y).unwrap();
        let camera_pos = DVec3::new(1.0, 2.0, 3.0);
        let view = view_matrix(camera_pos, u, v, w);
        let inverse = view.inverse();
        let world_point = glam::DVec4::new(5.0, -1.0, 7.0, 1.0);
        let round_tripped = inverse * (view * world_point);
        assert!((round_tripped - world_point).length() < 1e-9);
    }
}
