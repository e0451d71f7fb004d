//! Laplacian relaxation of vertex positions.

use super::adjacency::Adjacency;
use glam::Vec3;
use hush_data::{Face, Mesh};
use tracing::{debug, warn};

/// Moves vertices toward the average of their neighbors.
///
/// The averaging is multiplicity-weighted: see [`Adjacency`]. Each pass reads
/// only the positions from before the pass (Jacobi update), so the result
/// does not depend on vertex order.
#[derive(Debug, Clone)]
pub struct LaplacianSmoother {
    adjacency: Adjacency,
}

impl LaplacianSmoother {
    /// Precompute adjacency for a mesh. Topology never changes afterwards, so
    /// the smoother stays valid for the mesh's lifetime.
    pub fn new(mesh: &Mesh) -> Self {
        Self::from_faces(mesh.vertex_count(), mesh.faces())
    }

    pub fn from_faces(vertex_count: usize, faces: &[Face]) -> Self {
        let adjacency = Adjacency::build(vertex_count, faces);
        debug!(
            "Built adjacency for {} vertices ({} neighbor entries)",
            adjacency.vertex_count(),
            adjacency.len()
        );
        Self { adjacency }
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// One smoothing pass: `p <- p + (avg - p) * factor`.
    ///
    /// Vertices without neighbors stay where they are.
    pub fn smooth(&self, vertices: &mut [Vec3], factor: f32) {
        if vertices.len() != self.adjacency.vertex_count() {
            warn!(
                "Skipping smoothing: {} vertices given, adjacency built for {}",
                vertices.len(),
                self.adjacency.vertex_count()
            );
            return;
        }

        let snapshot = vertices.to_vec();
        for (i, position) in vertices.iter_mut().enumerate() {
            let neighbors = self.adjacency.neighbors(i);
            if neighbors.is_empty() {
                continue;
            }

            let sum: Vec3 = neighbors.iter().map(|&n| snapshot[n]).sum();
            let average = sum / neighbors.len() as f32;
            let old = snapshot[i];
            *position = old + (average - old) * factor;
        }
    }

    /// Run `iterations` passes back to back.
    pub fn smooth_iterations(&self, vertices: &mut [Vec3], factor: f32, iterations: usize) {
        for _ in 0..iterations {
            self.smooth(vertices, factor);
        }
    }
}

/// Single smoothing pass that builds its own adjacency.
///
/// Prefer [`LaplacianSmoother`] when smoothing the same mesh repeatedly.
pub fn smooth(vertices: &mut [Vec3], faces: &[Face], factor: f32) {
    LaplacianSmoother::from_faces(vertices.len(), faces).smooth(vertices, factor);
}
