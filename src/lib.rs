//! Hush
//!
//! Mesh noise injection and Laplacian denoising. Re-exports the data and
//! editing crates so demos and downstream tools need a single dependency.

pub use hush_data as data;
pub use hush_edit as edit;

pub use hush_data::{load_obj, save_obj, Face, Mesh, MeshError, MeshResult};
pub use hush_edit::{DenoiseController, DenoiseLevel, LaplacianSmoother, NoiseInjector, SeededNoise};
