//! Core mesh types.
//!
//! These are CPU-side representations used throughout hush. Interleaved,
//! GPU-ready layouts are built from them in `hush-app`.

use crate::error::{MeshError, MeshResult};
use crate::normals::{compute_normals, Normals};
use glam::Vec3;

/// A triangle referencing three vertices by 0-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    indices: [usize; 3],
}

impl Face {
    /// Create a face from three 0-based vertex indices.
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c] }
    }

    /// The three vertex indices in winding order.
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// Whether the face touches vertex `index`.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}

impl From<[usize; 3]> for Face {
    fn from(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// A triangle mesh with derived normals.
///
/// Topology is fixed at construction. Vertex positions may be edited in place
/// through [`Mesh::vertices_mut`], which hands out a slice so the vertex count
/// can never change. Normals are not refreshed automatically after edits; call
/// [`Mesh::recompute_normals`] when up-to-date shading is wanted.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    face_normals: Vec<Vec3>,
    vertex_normals: Vec<Vec3>,
}

impl Mesh {
    /// Build a mesh and derive its normals.
    ///
    /// Fails if any face references a vertex that does not exist.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> MeshResult<Self> {
        let vertex_count = vertices.len();
        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(MeshError::InvalidFace {
                    face: face_index,
                    index,
                    vertex_count,
                });
            }
        }

        let Normals { face, vertex } = compute_normals(&vertices, &faces);
        Ok(Self {
            vertices,
            faces,
            face_normals: face,
            vertex_normals: vertex,
        })
    }

    /// Parse OBJ text held in memory. See [`crate::load_obj_from_reader`].
    pub fn from_obj_str(text: &str) -> MeshResult<Self> {
        crate::obj::load_obj_from_reader(text.as_bytes())
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [Vec3] {
        &mut self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    /// Positions (mutable) and vertex normals borrowed together.
    pub fn vertices_and_normals_mut(&mut self) -> (&mut [Vec3], &[Vec3]) {
        (&mut self.vertices, &self.vertex_normals)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Re-derive face and vertex normals from the current positions.
    pub fn recompute_normals(&mut self) {
        let Normals { face, vertex } = compute_normals(&self.vertices, &self.faces);
        self.face_normals = face;
        self.vertex_normals = vertex;
    }

    /// Axis-aligned bounds of the current positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for pos in &self.vertices {
            min = min.min(*pos);
            max = max.max(*pos);
        }
        Some((min, max))
    }
}
