//! Laplacian smoothing

mod adjacency;
mod laplacian;

pub use adjacency::Adjacency;
pub use laplacian::{smooth, LaplacianSmoother};
