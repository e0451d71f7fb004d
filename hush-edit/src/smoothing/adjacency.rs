//! Vertex adjacency arena.
//!
//! Neighbor lists for every vertex are stored back to back in one flat vector,
//! with an offset table marking where each vertex's list starts.

use hush_data::Face;

/// Per-vertex neighbor lists, counted once per shared face.
///
/// For every face touching vertex `i`, each corner slot holding a vertex other
/// than `i` is appended to `i`'s list. A neighbor that shares two faces with
/// `i` therefore appears twice, and weighs twice in the smoothing average.
/// Lists keep face order, then corner order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    offsets: Vec<usize>,
    neighbors: Vec<usize>,
}

impl Adjacency {
    /// Build the arena for `vertex_count` vertices.
    ///
    /// Face indices must already be validated against `vertex_count`.
    pub fn build(vertex_count: usize, faces: &[Face]) -> Self {
        let mut counts = vec![0usize; vertex_count];
        for face in faces {
            for_each_pair(face, |center, _| counts[center] += 1);
        }

        let mut offsets = Vec::with_capacity(vertex_count + 1);
        let mut total = 0;
        offsets.push(0);
        for count in &counts {
            total += count;
            offsets.push(total);
        }

        let mut cursor = offsets[..vertex_count].to_vec();
        let mut neighbors = vec![0usize; total];
        for face in faces {
            for_each_pair(face, |center, neighbor| {
                neighbors[cursor[center]] = neighbor;
                cursor[center] += 1;
            });
        }

        Self { offsets, neighbors }
    }

    /// Neighbors of `vertex`, with repeats for each shared face.
    ///
    /// Out-of-range vertices have no neighbors.
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        match (self.offsets.get(vertex), self.offsets.get(vertex + 1)) {
            (Some(&start), Some(&end)) => &self.neighbors[start..end],
            _ => &[],
        }
    }

    /// Distinct neighbors of `vertex`, sorted by index.
    pub fn unique_neighbors(&self, vertex: usize) -> Vec<usize> {
        let mut unique = self.neighbors(vertex).to_vec();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    pub fn vertex_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Total number of stored neighbor entries.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

/// Call `f(center, neighbor)` for every distinct vertex of the face and every
/// corner slot holding a different vertex.
fn for_each_pair(face: &Face, mut f: impl FnMut(usize, usize)) {
    let corners = face.indices();
    for (slot, &center) in corners.iter().enumerate() {
        if corners[..slot].contains(&center) {
            continue;
        }
        for &neighbor in &corners {
            if neighbor != center {
                f(center, neighbor);
            }
        }
    }
}
