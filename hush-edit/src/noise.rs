//! Noise injection along vertex normals.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Source of scalar noise samples.
///
/// Implementations must return values in `[-1, 1)`. The source is owned by
/// whoever drives the edits, so tests can swap in a seeded or constant one.
pub trait NoiseSource {
    fn sample(&mut self) -> f32;
}

impl<S: NoiseSource + ?Sized> NoiseSource for Box<S> {
    fn sample(&mut self) -> f32 {
        (**self).sample()
    }
}

impl<S: NoiseSource + ?Sized> NoiseSource for &mut S {
    fn sample(&mut self) -> f32 {
        (**self).sample()
    }
}

/// Uniform samples from a persistent `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    /// Reproducible source: the same seed yields the same sample sequence.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded once from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn sample(&mut self) -> f32 {
        self.rng.random_range(-1.0f32..1.0)
    }
}

/// Returns the same sample every time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    fn sample(&mut self) -> f32 {
        self.0
    }
}

/// Displace every vertex along its own normal by `strength * sample`.
///
/// One sample is drawn per vertex. Calls compound; nothing is reset toward a
/// baseline. A strength of zero leaves every position unchanged.
pub fn inject<S: NoiseSource + ?Sized>(vertices: &mut [Vec3], normals: &[Vec3], strength: f32, source: &mut S) {
    debug_assert_eq!(vertices.len(), normals.len());
    for (position, normal) in vertices.iter_mut().zip(normals) {
        let offset = strength * source.sample();
        *position += *normal * offset;
    }
}

/// Pairs a noise source with [`inject`].
#[derive(Debug, Clone)]
pub struct NoiseInjector<S> {
    source: S,
}

impl<S: NoiseSource> NoiseInjector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn inject(&mut self, vertices: &mut [Vec3], normals: &[Vec3], strength: f32) {
        inject(vertices, normals, strength, &mut self.source);
        debug!("Injected noise into {} vertices (strength {})", vertices.len(), strength);
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
