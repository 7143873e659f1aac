//! A line-based Wavefront OBJ parser, producing a [`Scene`].
//!
//! Only `v`, `vt`, `vn`, and `f` lines are recognized; everything else
//! (comments, `usemtl`, `g`, `s`, ...) is ignored. Faces with more than
//! three vertices are triangulated as a fan around their first vertex.

use std::io::BufRead;
use std::path::Path;

use glam::{DVec2, DVec3};

use crate::error::{ExtractError, Result};
use crate::scene::mesh::{Face, Scene, Vertex};

/// Parses the OBJ file at `path` into a [`Scene`].
///
/// Returns [`ExtractError::InputFormat`] if `path` does not have a `.obj`
/// extension, or if a recognized line does not match the expected token
/// count/format.
pub fn parse(path: &Path) -> Result<Scene> {
    if path.extension().and_then(|e| e.to_str()) != Some("obj") {
        return Err(ExtractError::InputFormat(
            "model file should be an obj file".into(),
        ));
    }

    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);

    let mut vertices = Vec::new();
    let mut tex_coords = Vec::new();
    let mut normals = Vec::new();
    let mut faces = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }
        match parts[0] {
            "v" => vertices.push(parse_vertex(&parts)?),
            "vt" => tex_coords.push(parse_tex_coord(&parts)?),
            "vn" => normals.push(parse_normal(&parts)?),
            "f" => parse_face(&parts, &mut faces)?,
            _ => {}
        }
    }

    Ok(Scene {
        vertices,
        tex_coords,
        normals,
        faces,
    })
}

fn parse_vertex(parts: &[&str]) -> Result<Vertex> {
    if parts.len() != 4 {
        return Err(ExtractError::InputFormat(
            "vertex should have three dimensions".into(),
        ));
    }
    Ok(Vertex {
        position: DVec3::new(
            parse_f64(parts[1])?,
            parse_f64(parts[2])?,
            parse_f64(parts[3])?,
        ),
    })
}

fn parse_tex_coord(parts: &[&str]) -> Result<DVec2> {
    if parts.len() != 3 {
        return Err(ExtractError::InputFormat(
            "texture coordinate should have two dimensions".into(),
        ));
    }
    Ok(DVec2::new(parse_f64(parts[1])?, parse_f64(parts[2])?))
}

fn parse_normal(parts: &[&str]) -> Result<DVec3> {
    if parts.len() != 4 {
        return Err(ExtractError::InputFormat(
            "normal should have three dimensions".into(),
        ));
    }
    Ok(DVec3::new(
        parse_f64(parts[1])?,
        parse_f64(parts[2])?,
        parse_f64(parts[3])?,
    ))
}

/// One `v/vt/vn` token, 0-based.
struct FaceVertex {
    v: u32,
    vt: u32,
    vn: u32,
}

fn parse_face_vertex(token: &str) -> Result<FaceVertex> {
    let parts: Vec<&str> = token.split('/').collect();
    if parts.len() != 3 || parts[1].is_empty() {
        return Err(ExtractError::InputFormat(
            "vertices of faces should have texture coords and normals".into(),
        ));
    }
    let index = |s: &str| -> Result<u32> {
        s.parse::<i64>()
            .ok()
            .and_then(|i| (i - 1).try_into().ok())
            .ok_or_else(|| ExtractError::InputFormat(format!("invalid face index: {s}")))
    };
    Ok(FaceVertex {
        v: index(parts[0])?,
        vt: index(parts[1])?,
        vn: index(parts[2])?,
    })
}

/// Triangulates a (possibly n-gon) face line as a fan around its first
/// vertex, pushing one [`Face`] per triangle. The face's normal index is
/// taken from the fan's first corner, matching the rest of the corners'
/// shared normal in practice (OBJ faces are flat).
fn parse_face(parts: &[&str], faces: &mut Vec<Face>) -> Result<()> {
    let corners: Vec<FaceVertex> = parts[1..]
        .iter()
        .map(|token| parse_face_vertex(token))
        .collect::<Result<_>>()?;
    if corners.len() < 3 {
        return Err(ExtractError::InputFormat(
            "face should have at least three vertices".into(),
        ));
    }
    let first = &corners[0];
    for i in 2..corners.len() {
        let prev = &corners[i - 1];
        let current = &corners[i];
        faces.push(Face {
            vertex_indices: [first.v, prev.v, current.v],
            tex_indices: [first.vt, prev.vt, current.vt],
            normal_index: first.vn,
        });
    }
    Ok(())
}

fn parse_f64(s: &str) -> Result<f64> {
    s.parse()
        .map_err(|_| ExtractError::InputFormat(format!("invalid number: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_obj(contents: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn parses_a_single_triangle() {
        let path = write_obj(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             vt 0 0\nvt 1 0\nvt 0 1\n\
             vn 0 0 1\n\
             f 1/1/1 2/2/1 3/3/1\n",
        );
        let scene = parse(&path).unwrap();
        assert_eq!(scene.vertices.len(), 3);
        assert_eq!(scene.tex_coords.len(), 3);
        assert_eq!(scene.normals.len(), 1);
        assert_eq!(scene.faces.len(), 1);
        assert_eq!(scene.faces[0].vertex_indices, [0, 1, 2]);
    }

    #[test]
    fn triangulates_a_quad_as_a_fan() {
        let path = write_obj(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
             vt 0 0\nvn 0 0 1\n\
             f 1/1/1 2/1/1 3/1/1 4/1/1\n",
        );
        let scene = parse(&path).unwrap();
        assert_eq!(scene.faces.len(), 2);
        assert_eq!(scene.faces[0].vertex_indices, [0, 1, 2]);
        assert_eq!(scene.faces[1].vertex_indices, [0, 2, 3]);
    }

    #[test]
    fn rejects_non_obj_extension() {
        assert!(parse(Path::new("mesh.txt")).is_err());
    }

    #[test]
    fn rejects_face_token_missing_texture_coordinate() {
        let path = write_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert!(parse(&path).is_err());
    }

    #[test]
    fn ignores_unrecognized_lines() {
        let path = write_obj(
            "# a comment\nmtllib foo.mtl\no MyObject\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\n\
             f 1/1/1 2/1/1 3/1/1\n",
        );
        let scene = parse(&path).unwrap();
        assert_eq!(scene.faces.len(), 1);
    }
}
