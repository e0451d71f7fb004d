//! Interleaved vertex buffer handed to the display layer.

use hush_data::Mesh;

/// Floats emitted per face corner: position xyz, then normal xyz.
pub const FLOATS_PER_VERTEX: usize = 6;
/// Floats emitted per triangle.
pub const FLOATS_PER_FACE: usize = 3 * FLOATS_PER_VERTEX;

/// One face corner as laid out in the display buffer.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct ShadedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Unindexed corners: three per face, in face order then winding order.
pub fn build_shaded_vertices(mesh: &Mesh) -> Vec<ShadedVertex> {
    let positions = mesh.vertices();
    let normals = mesh.vertex_normals();

    let mut out = Vec::with_capacity(mesh.face_count() * 3);
    for face in mesh.faces() {
        for index in face.indices() {
            out.push(ShadedVertex {
                position: positions[index].to_array(),
                normal: normals[index].to_array(),
            });
        }
    }
    out
}

/// Flat `f32` buffer of `faces * 18` values.
pub fn interleave(mesh: &Mesh) -> Vec<f32> {
    let vertices = build_shaded_vertices(mesh);
    bytemuck::cast_slice::<ShadedVertex, f32>(&vertices).to_vec()
}
