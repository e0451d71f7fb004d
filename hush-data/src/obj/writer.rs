//! OBJ export of the current mesh geometry.
//!
//! Positions are written as stored, which means they already carry the load
//! scale. Loading an exported file scales it a second time.

use crate::error::{MeshError, MeshResult};
use crate::types::Mesh;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write `v` and `f` records (1-based indices) for the mesh.
pub fn write_obj<W: Write>(mesh: &Mesh, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "# hush export: {} vertices, {} faces", mesh.vertex_count(), mesh.face_count())?;
    for v in mesh.vertices() {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for face in mesh.faces() {
        let [a, b, c] = face.indices();
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    writer.flush()
}

/// Write the mesh to `path`, replacing any existing file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_obj(mesh: &Mesh, path: impl AsRef<Path>) -> MeshResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(MeshError::Io)?;
    write_obj(mesh, BufWriter::new(file))?;
    info!("Saved {} vertices and {} faces", mesh.vertex_count(), mesh.face_count());
    Ok(())
}
