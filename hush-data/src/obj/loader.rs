//! OBJ file loading functions
//!
//! Only two record kinds are understood: `v x y z` positions and `f a b c`
//! triangles with 1-based indices. Every other line (normals, texture
//! coordinates, groups, comments) is skipped.

use crate::error::{MeshError, MeshResult};
use crate::types::{Face, Mesh};
use glam::Vec3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::IntErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Uniform scale applied to every position as it is read.
pub const LOAD_SCALE: f32 = 2.2;

/// A face whose indices have been parsed but not yet range-checked.
struct PendingFace {
    line: usize,
    raw: [i64; 3],
}

/// Load a mesh from an OBJ file and derive its normals.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_obj(path: impl AsRef<Path>) -> MeshResult<Mesh> {
    let path = path.as_ref();
    debug!("Loading OBJ mesh from: {}", path.display());
    let file = File::open(path).map_err(|source| MeshError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    load_obj_from_reader(BufReader::new(file))
}

/// Load a mesh from any buffered reader holding OBJ text.
pub fn load_obj_from_reader<R: BufRead>(mut reader: R) -> MeshResult<Mesh> {
    let mut vertices = Vec::new();
    let mut pending = Vec::new();

    let mut bytes = Vec::new();
    let mut line_number = 0;
    loop {
        bytes.clear();
        if reader.read_until(b'\n', &mut bytes)? == 0 {
            break;
        }
        line_number += 1;
        // Lines we skip may carry any encoding; only `v` and `f` need to be text.
        let line = String::from_utf8_lossy(&bytes);
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let position = parse_position(&mut tokens, line_number)?;
                vertices.push(position);
            }
            Some("f") => {
                let raw = parse_face(&mut tokens, line_number)?;
                pending.push(PendingFace {
                    line: line_number,
                    raw,
                });
            }
            _ => {}
        }
    }

    let vertex_count = vertices.len();
    let mut faces = Vec::with_capacity(pending.len());
    for face in pending {
        let mut indices = [0usize; 3];
        for (slot, &raw) in indices.iter_mut().zip(&face.raw) {
            *slot = to_zero_based(raw, vertex_count).ok_or_else(|| MeshError::FaceIndexOutOfRange {
                line: face.line,
                index: raw,
                vertex_count,
            })?;
        }
        faces.push(Face::from(indices));
    }

    info!("Loaded {} vertices and {} faces", vertices.len(), faces.len());

    let mesh = Mesh::new(vertices, faces)?;
    info!(
        "Calculated {} face normals and {} vertex normals",
        mesh.face_normals().len(),
        mesh.vertex_normals().len()
    );
    Ok(mesh)
}

fn parse_position<'a>(tokens: &mut impl Iterator<Item = &'a str>, line: usize) -> MeshResult<Vec3> {
    let mut coords = [0.0f32; 3];
    for (axis, slot) in coords.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| MeshError::MalformedRecord {
            line,
            reason: format!("vertex record has {axis} coordinates, expected 3"),
        })?;
        let value: f32 = token.parse().map_err(|_| MeshError::MalformedRecord {
            line,
            reason: format!("'{token}' is not a number"),
        })?;
        let scaled = value * LOAD_SCALE;
        if !scaled.is_finite() {
            return Err(MeshError::MalformedRecord {
                line,
                reason: format!("'{token}' is not a finite coordinate after scaling"),
            });
        }
        *slot = scaled;
    }
    Ok(Vec3::from_array(coords))
}

fn parse_face<'a>(tokens: &mut impl Iterator<Item = &'a str>, line: usize) -> MeshResult<[i64; 3]> {
    let mut raw = [0i64; 3];
    for (corner, slot) in raw.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| MeshError::MalformedRecord {
            line,
            reason: format!("face record has {corner} indices, expected 3"),
        })?;
        // `7/3/2`, `7//2` and `7/3` all name vertex 7.
        let index = token.split('/').next().unwrap_or(token);
        // Overflowing integers saturate so the range check reports them.
        *slot = match index.parse::<i64>() {
            Ok(value) => value,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => {
                    return Err(MeshError::MalformedRecord {
                        line,
                        reason: format!("'{token}' is not a vertex index"),
                    });
                }
            },
        };
    }

    let extra = tokens.count();
    if extra > 0 {
        debug!("Line {}: ignoring {} face corners beyond the first three", line, extra);
    }
    Ok(raw)
}

fn to_zero_based(raw: i64, vertex_count: usize) -> Option<usize> {
    let index = usize::try_from(raw.checked_sub(1)?).ok()?;
    (index < vertex_count).then_some(index)
}
