//! Hush Data Crate
//!
//! Mesh model, OBJ reading/writing and normal derivation.
//! This crate is GPU-agnostic and only deals with the scalar mesh model;
//! editing operations live in `hush-edit`.

pub mod error;
pub mod normals;
pub mod obj;
pub mod types;

pub use error::{MeshError, MeshResult};
pub use normals::{compute_face_normals, compute_normals, compute_vertex_normals, face_normal, Normals};
pub use obj::{load_obj, load_obj_from_reader, save_obj, write_obj, LOAD_SCALE};
pub use types::{Face, Mesh};
