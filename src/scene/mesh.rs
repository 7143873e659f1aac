//! The mesh data model: vertices, faces, and the scene that owns them.

use std::io::Write;

use glam::{DVec2, DVec3};

use crate::error::{ExtractError, Result};

/// A single vertex position in whatever space the scene currently lives in
/// (world space at load, then mutated in place by the pipeline).
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// 3D position.
    pub position: DVec3,
}

/// A triangle: three vertex indices, three per-corner texture-coordinate
/// indices, and one normal index shared across the whole face.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    /// Indices into [`Scene::vertices`].
    pub vertex_indices: [u32; 3],
    /// Indices into [`Scene::tex_coords`], one per face corner.
    pub tex_indices: [u32; 3],
    /// Index into [`Scene::normals`]; constant across the triangle.
    pub normal_index: u32,
}

/// An ordered collection of vertices, texture coordinates, normals, and
/// faces, pruned in place as the extraction pipeline runs.
///
/// Texture coordinates and normals are never removed by culling — only
/// vertices and faces are. See [`Scene::prune_faces`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Vertex positions, mutated in place by the pipeline.
    pub vertices: Vec<Vertex>,
    /// (u, v) texture coordinates, stable indices for the whole run.
    pub tex_coords: Vec<DVec2>,
    /// Per-face normals, stable indices for the whole run.
    pub normals: Vec<DVec3>,
    /// Surviving faces, in original parse order.
    pub faces: Vec<Face>,
}

impl Scene {
    /// Removes every face for which `discard` returns `true`, then removes
    /// any vertex that is no longer referenced by a surviving face and
    /// remaps the remaining faces' vertex indices accordingly.
    ///
    /// `discard` is given the face together with the vertex and normal
    /// slices so it can evaluate geometric predicates (backface, frustum,
    /// occlusion) without needing a `&Scene` borrow that would conflict with
    /// mutating `self.faces`.
    pub fn prune_faces(&mut self, mut discard: impl FnMut(&Face, &[Vertex], &[DVec3]) -> bool) {
        let mut face_count = vec![0u32; self.vertices.len()];
        for face in &self.faces {
            for &vi in &face.vertex_indices {
                face_count[vi as usize] += 1;
            }
        }

        let vertices = &self.vertices;
        let normals = &self.normals;
        let mut kept_faces = Vec::with_capacity(self.faces.len());
        for face in self.faces.drain(..) {
            if discard(&face, vertices, normals) {
                for &vi in &face.vertex_indices {
                    face_count[vi as usize] -= 1;
                }
            } else {
                kept_faces.push(face);
            }
        }
        self.faces = kept_faces;

        let mut remap = vec![u32::MAX; self.vertices.len()];
        let mut new_vertices = Vec::with_capacity(self.vertices.len());
        for (old_idx, vertex) in self.vertices.drain(..).enumerate() {
            if face_count[old_idx] > 0 {
                remap[old_idx] = new_vertices.len() as u32;
                new_vertices.push(vertex);
            }
        }
        self.vertices = new_vertices;

        for face in &mut self.faces {
            for vi in &mut face.vertex_indices {
                *vi = remap[*vi as usize];
            }
        }
    }

    /// Writes the scene back out as an OBJ file. Supplemental convenience
    /// for inspecting a pruned scene; not used on the extraction hot path.
    pub fn save_to_obj(&self, path: &std::path::Path) -> Result<()> {
        if path.extension().and_then(|e| e.to_str()) != Some("obj") {
            return Err(ExtractError::InputFormat(
                "scene should be saved as an obj file".into(),
            ));
        }
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        for v in &self.vertices {
            writeln!(file, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
        }
        for vt in &self.tex_coords {
            writeln!(file, "vt {} {}", vt.x, vt.y)?;
        }
        for vn in &self.normals {
            writeln!(file, "vn {} {} {}", vn.x, vn.y, vn.z)?;
        }
        for face in &self.faces {
            write!(file, "f")?;
            for i in 0..3 {
                write!(
                    file,
                    " {}/{}/{}",
                    face.vertex_indices[i] + 1,
                    face.tex_indices[i] + 1,
                    face.normal_index + 1
                )?;
            }
            writeln!(file)?;
        }
        Ok(())
    }
}
