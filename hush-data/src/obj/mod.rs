//! OBJ-style mesh reading and writing

mod loader;
mod writer;

pub use loader::{load_obj, load_obj_from_reader, LOAD_SCALE};
pub use writer::{save_obj, write_obj};
