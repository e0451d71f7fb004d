//! Hush Editing Crate
//!
//! Destructive edits on the vertex positions of a [`hush_data::Mesh`]:
//!
//! - [`noise`]: displacement along vertex normals from an injected random source
//! - [`smoothing`]: Laplacian relaxation over a precomputed adjacency arena
//! - [`denoise`]: the four-state cycle of cumulative smoothing passes and revert

pub mod denoise;
pub mod noise;
pub mod smoothing;

pub use denoise::{DenoiseController, DenoiseLevel};
pub use noise::{inject, ConstantNoise, NoiseInjector, NoiseSource, SeededNoise};
pub use smoothing::{smooth, Adjacency, LaplacianSmoother};
