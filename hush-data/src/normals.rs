//! Face and vertex normal derivation.
//!
//! Face normals come from the cross product of the two edges leaving the
//! first corner, so the sign follows the face winding. Vertex normals are the
//! unweighted average of the incident face normals, renormalized.
//! Degenerate input never produces NaN: collinear faces and isolated
//! vertices get the zero vector.

use crate::types::Face;
use glam::Vec3;
use tracing::debug;

/// Face and vertex normals for one mesh, parallel to its faces and vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normals {
    pub face: Vec<Vec3>,
    pub vertex: Vec<Vec3>,
}

/// Unit normal of the triangle `(a, b, c)`, or zero if the triangle has no area.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Compute one normal per face.
pub fn compute_face_normals(vertices: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    faces
        .iter()
        .map(|face| {
            let [a, b, c] = face.indices();
            face_normal(vertices[a], vertices[b], vertices[c])
        })
        .collect()
}

/// Average the normals of the faces touching each vertex.
///
/// The sum is divided by the incident face count before normalizing. A vertex
/// with no incident faces, or whose incident normals cancel out, keeps the zero
/// vector.
pub fn compute_vertex_normals(vertex_count: usize, faces: &[Face], face_normals: &[Vec3]) -> Vec<Vec3> {
    let mut sums = vec![Vec3::ZERO; vertex_count];
    let mut counts = vec![0u32; vertex_count];

    for (face, normal) in faces.iter().zip(face_normals) {
        for index in face.indices() {
            sums[index] += *normal;
            counts[index] += 1;
        }
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| {
            if count == 0 {
                Vec3::ZERO
            } else {
                (sum / count as f32).normalize_or_zero()
            }
        })
        .collect()
}

/// Derive face normals and then vertex normals for a mesh.
pub fn compute_normals(vertices: &[Vec3], faces: &[Face]) -> Normals {
    let face = compute_face_normals(vertices, faces);
    let vertex = compute_vertex_normals(vertices.len(), faces, &face);

    let degenerate = face.iter().filter(|n| **n == Vec3::ZERO).count();
    debug!(
        "Computed {} face normals ({} degenerate) and {} vertex normals",
        face.len(),
        degenerate,
        vertex.len()
    );

    Normals { face, vertex }
}
