//! The geometric transform stack: view → perspective → screen.

pub mod culler;
pub mod rasterizer;
pub mod transforms;

use glam::{DVec3, DVec4};

use crate::scene::{Camera, Scene};

/// Homogeneous vertex/normal state plus the camera parameters needed to
/// carry a scene from world space through to screen space.
///
/// Vertices are re-homogenized to `(x, y, z, 1)` whenever the pipeline is
/// (re)seeded from a scene, and written back with [`Pipeline::apply_to_scene`].
pub struct Pipeline {
    vertices: Vec<DVec4>,
    normals: Vec<DVec4>,
    camera_position: DVec3,
    u: DVec3,
    v: DVec3,
    w: DVec3,
    fov_horizontal: f64,
    fov_vertical: f64,
}

impl Pipeline {
    /// Builds a pipeline from a camera and the scene's current vertex and
    /// normal positions.
    ///
    /// Returns `None` if the camera's look and up directions are parallel
    /// (this should already have been rejected at camera-load time, but the
    /// pipeline re-derives the basis itself rather than trusting a
    /// precomputed one).
    pub fn new(camera: &Camera, scene: &Scene) -> Option<Pipeline> {
        let (u, v, w) = transforms::camera_basis(camera.look_direction, camera.up_direction)?;
        Some(Pipeline {
            vertices: Self::homogenize(scene.vertices.iter().map(|vx| vx.position)),
            normals: Self::homogenize(scene.normals.iter().copied()),
            camera_position: camera.position,
            u,
            v,
            w,
            fov_horizontal: camera.fov_horizontal,
            fov_vertical: camera.fov_vertical.expect(
                "camera must have image dimensions attached before entering the pipeline",
            ),
        })
    }

    fn homogenize(positions: impl Iterator<Item = DVec3>) -> Vec<DVec4> {
        positions.map(|p| DVec4::new(p.x, p.y, p.z, 1.0)).collect()
    }

    /// Re-homogenizes the pipeline's vertex state from the scene's current
    /// vertices.
    ///
    /// Culling prunes and remaps `scene.vertices` (see
    /// [`crate::scene::Scene::prune_faces`]), so the pipeline's own vertex
    /// list — built once in [`Pipeline::new`] and indexed by the
    /// pre-culling vertex order — goes stale the moment a face is
    /// discarded. Call this after the frustum/occlusion culling passes and
    /// before resuming the transform stack (the screen transform), so the
    /// two index spaces line back up.
    pub fn reseed_vertices(&mut self, scene: &Scene) {
        self.vertices = Self::homogenize(scene.vertices.iter().map(|vx| vx.position));
    }

    /// Translates all vertices by `-camera_position`, then rotates by the
    /// camera's basis. Only the rotation is applied to normals.
    pub fn apply_view_transformation(&mut self) {
        let view = transforms::view_matrix(self.camera_position, self.u, self.v, self.w);
        for vertex in &mut self.vertices {
            *vertex = view * *vertex;
        }
        let rotation = transforms::view_rotation(self.u, self.v, self.w);
        for normal in &mut self.normals {
            let rotated = rotation * normal.truncate();
            *normal = DVec4::new(rotated.x, rotated.y, rotated.z, normal.w);
        }
    }

    /// Normalizes `x`/`y` into `[-1, 1]` for in-frustum points while
    /// deliberately preserving `z` in view-space units, so occlusion
    /// culling can later compare absolute depth directly.
    pub fn apply_perspective_transformation(&mut self) {
        let tan_h = (self.fov_horizontal.to_radians() / 2.0).tan();
        let tan_v = (self.fov_vertical.to_radians() / 2.0).tan();
        for vertex in &mut self.vertices {
            let z = vertex.z;
            let (x, y) = if z == 0.0 {
                (0.0, 0.0)
            } else {
                (vertex.x / (tan_h * z.abs()), vertex.y / (tan_v * z.abs()))
            };
            *vertex = DVec4::new(x, y, z, vertex.w);
        }
    }

    /// Maps normalized `(x, y) ∈ [-1, 1]` to pixel coordinates.
    pub fn apply_screen_transformation(&mut self, width: u32, height: u32) {
        let screen = transforms::screen_matrix(width as f64, height as f64);
        for vertex in &mut self.vertices {
            *vertex = screen * *vertex;
        }
    }

    /// Current vertex positions, each divided by its homogeneous `w` and
    /// truncated back to 3D.
    pub fn vertices(&self) -> Vec<DVec3> {
        self.vertices.iter().map(|v| (v.truncate() / v.w)).collect()
    }

    /// Current normal directions, each divided by homogeneous `w`.
    pub fn normals(&self) -> Vec<DVec3> {
        self.normals.iter().map(|n| (n.truncate() / n.w)).collect()
    }

    /// Writes the current vertex/normal state back into the scene, paired
    /// by index.
    pub fn apply_to_scene(&self, scene: &mut Scene) {
        for (vertex, pos) in scene.vertices.iter_mut().zip(self.vertices()) {
            vertex.position = pos;
        }
        scene.normals = self.normals();
    }
}
