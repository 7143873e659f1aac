//! The three culling stages: backface, frustum, and z-buffer occlusion.

use glam::{DVec2, DVec3};

use crate::config::Config;
use crate::pipeline::rasterizer::{self, DepthTriangle};
use crate::pipeline::transforms;
use crate::scene::mesh::{Face, Vertex};
use crate::scene::Scene;

/// Discards every face whose normal points away from the camera.
///
/// A face is back-facing (and discarded) when
/// `dot(face_normal, vertex0.position - camera_position) >= 0`.
///
/// Run pre-transform, in world space.
pub fn cull_backfaces(scene: &mut Scene, camera_position: DVec3) {
    scene.prune_faces(|face: &Face, vertices: &[Vertex], normals: &[DVec3]| {
        let p = vertices[face.vertex_indices[0] as usize].position;
        let pcop = p - camera_position;
        let normal = normals[face.normal_index as usize];
        normal.dot(pcop) >= 0.0
    });
}

/// Discards every face with at least one vertex outside the clip volume
/// `x ∈ [-1, 1] ∧ y ∈ [-1, 1] ∧ z < 0`.
///
/// This is conservative: straddling faces are dropped whole rather than
/// clipped, trading a small amount of coverage at the frustum boundary for
/// simplicity. Run post-perspective.
pub fn cull_frustum(scene: &mut Scene) {
    scene.prune_faces(|face: &Face, vertices: &[Vertex], _normals: &[DVec3]| {
        face.vertex_indices.iter().any(|&vi| {
            let p = vertices[vi as usize].position;
            p.x < -1.0 || p.x > 1.0 || p.y < -1.0 || p.y > 1.0 || p.z >= 0.0
        })
    });
}

/// Discards every face with at least one vertex occluded by closer
/// geometry, per a depth buffer built at `config.depth_buffer_width ×
/// config.depth_buffer_height`.
///
/// Run post-perspective, pre-screen-transform: vertices at this point carry
/// normalized `(x, y) ∈ [-1, 1]` and view-space `z`.
pub fn cull_occluded(scene: &mut Scene, config: &Config) {
    let buffer_screen = transforms::screen_matrix(
        config.depth_buffer_width as f64,
        config.depth_buffer_height as f64,
    );

    let buffer_pos = |p: DVec3| -> (DVec2, f64) {
        let homogeneous = glam::DVec4::new(p.x, p.y, p.z, 1.0);
        let mapped = buffer_screen * homogeneous;
        (DVec2::new(mapped.x, mapped.y), p.z.abs())
    };

    let triangles: Vec<DepthTriangle> = scene
        .faces
        .iter()
        .map(|face| {
            let mut screen = [DVec2::ZERO; 3];
            let mut depth = [0.0f64; 3];
            for i in 0..3 {
                let p = scene.vertices[face.vertex_indices[i] as usize].position;
                let (s, z) = buffer_pos(p);
                screen[i] = s;
                depth[i] = z;
            }
            DepthTriangle { screen, depth }
        })
        .collect();

    let buffer = rasterizer::build_depth_buffer(
        &triangles,
        config.depth_buffer_width,
        config.depth_buffer_height,
    );
    let threshold = config.occlusion_culling_threshold;

    scene.prune_faces(|face: &Face, vertices: &[Vertex], _normals: &[DVec3]| {
        face.vertex_indices.iter().any(|&vi| {
            let p = vertices[vi as usize].position;
            let (screen, depth) = buffer_pos(p);
            let column = screen.x.floor() as i64;
            let row = screen.y.floor() as i64;
            buffer.get(row, column) < depth - threshold
        })
    });
}
