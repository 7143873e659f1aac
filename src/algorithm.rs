//! Small geometric helpers shared by the culler and rasterizer: signed
//! triangle area, barycentric coordinates, and bounding boxes.

use glam::DVec2;

/// Signed area of the triangle `(a, b, c)`, scaled by one half.
///
/// Positive for a counter-clockwise winding in screen coordinates (y down).
/// Zero for degenerate (collinear) triangles.
#[inline(always)]
pub fn triangle_area(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    0.5 * ((a.x - c.x) * (b.y - c.y) - (a.y - c.y) * (b.x - c.x))
}

/// Barycentric coordinates `(alpha, beta, gamma)` of point `p` with respect
/// to triangle `(v1, v2, v3)`, given the triangle's total signed area.
///
/// Returns `None` when `total_area == 0.0` (degenerate triangle, no
/// barycentric coordinates are defined).
#[inline(always)]
pub fn barycentric(v1: DVec2, v2: DVec2, v3: DVec2, p: DVec2, total_area: f64) -> Option<(f64, f64, f64)> {
    if total_area == 0.0 {
        return None;
    }
    let w12 = triangle_area(v1, v2, p);
    let w23 = triangle_area(v2, v3, p);
    let w31 = triangle_area(v3, v1, p);
    let alpha = w23 / total_area;
    let beta = w31 / total_area;
    let gamma = w12 / total_area;
    Some((alpha, beta, gamma))
}

/// Axis-aligned bounding box of a triangle, as integer pixel coordinates
/// `(min_x, max_x, min_y, max_y)` — floor of the minimum, ceil of the
/// maximum, per the rasterization algorithm in §4.2 of the spec.
pub fn triangle_aabb(a: DVec2, b: DVec2, c: DVec2) -> (i64, i64, i64, i64) {
    let min_x = a.x.min(b.x).min(c.x).floor() as i64;
    let max_x = a.x.max(b.x).max(c.x).ceil() as i64;
    let min_y = a.y.min(b.y).min(c.y).floor() as i64;
    let max_y = a.y.max(b.y).max(c.y).ceil() as i64;
    (min_x, max_x, min_y, max_y)
}

/// Walks every pixel (by center) covered by triangle `(a, b, c)`, calling
/// `visit(x, y, alpha, beta, gamma)` for each.
///
/// This is the rasterization algorithm shared by depth-buffer construction
/// and UV-to-image pixel copy: bounding-box traversal plus a
/// consistent-sign barycentric coverage test. Degenerate (zero-area)
/// triangles are silently skipped.
pub fn rasterize_triangle(a: DVec2, b: DVec2, c: DVec2, mut visit: impl FnMut(i64, i64, f64, f64, f64)) {
    let total_area = triangle_area(a, b, c);
    if total_area == 0.0 {
        return;
    }
    let (min_x, max_x, min_y, max_y) = triangle_aabb(a, b, c);
    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
            if let Some((alpha, beta, gamma)) = barycentric(a, b, c, p, total_area) {
                if alpha >= 0.0 && beta >= 0.0 && gamma >= 0.0 {
                    visit(x, y, alpha, beta, gamma);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_vertices_have_unit_barycentric_coordinates() {
        let (a, b, c) = (
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(0.0, 4.0),
        );
        let total_area = triangle_area(a, b, c);
        let (alpha, beta, gamma) = barycentric(a, b, c, a, total_area).unwrap();
        assert!((alpha - 1.0).abs() < 1e-9 && beta.abs() < 1e-9 && gamma.abs() < 1e-9);
        let (alpha, beta, gamma) = barycentric(a, b, c, b, total_area).unwrap();
        assert!(alpha.abs() < 1e-9 && (beta - 1.0).abs() < 1e-9 && gamma.abs() < 1e-9);
        let (alpha, beta, gamma) = barycentric(a, b, c, c, total_area).unwrap();
        assert!(alpha.abs() < 1e-9 && beta.abs() < 1e-9 && (gamma - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_triangle_has_zero_area() {
        let (a, b, c) = (
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 2.0),
        );
        assert_eq!(triangle_area(a, b, c), 0.0);
        assert!(barycentric(a, b, c, DVec2::new(0.5, 0.5), 0.0).is_none());
    }

    #[test]
    fn rasterize_triangle_covers_the_same_pixels_under_any_winding() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(5.0, 0.0);
        let c = DVec2::new(0.0, 5.0);

        let mut ccw_pixels = Vec::new();
        rasterize_triangle(a, b, c, |x, y, _, _, _| ccw_pixels.push((x, y)));

        let mut cw_pixels = Vec::new();
        rasterize_triangle(a, c, b, |x, y, _, _, _| cw_pixels.push((x, y)));

        ccw_pixels.sort();
        cw_pixels.sort();
        assert_eq!(ccw_pixels, cw_pixels);
        assert!(!ccw_pixels.is_empty());
    }

    #[test]
    fn area_sign_depends_on_winding() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(1.0, 0.0);
        let c = DVec2::new(0.0, 1.0);
        let ccw = triangle_area(a, b, c);
        let cw = triangle_area(a, c, b);
        assert_eq!(ccw, -cw);
    }
}
