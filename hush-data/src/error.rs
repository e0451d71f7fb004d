//! Error types for mesh loading and construction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or assembling a mesh.
///
/// All of these are terminal for the operation that raised them: no partially
/// populated mesh is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("Mesh file not found or unreadable: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Face index {index} on line {line} is out of range (mesh has {vertex_count} vertices)")]
    FaceIndexOutOfRange {
        line: usize,
        index: i64,
        vertex_count: usize,
    },

    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidFace {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Source line the error refers to, if it came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            MeshError::MalformedRecord { line, .. } | MeshError::FaceIndexOutOfRange { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }
}

pub type MeshResult<T> = Result<T, MeshError>;
