//! The denoise cycle: up to three cumulative smoothing passes, then revert.

use crate::smoothing::LaplacianSmoother;
use glam::Vec3;
use std::fmt;
use tracing::{info, warn};

/// How many smoothing passes have been applied since the last revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DenoiseLevel {
    /// Pristine geometry (plus any noise injected since).
    #[default]
    Original,
    OnePass,
    TwoPasses,
    ThreePasses,
}

impl fmt::Display for DenoiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenoiseLevel::Original => write!(f, "Original"),
            DenoiseLevel::OnePass => write!(f, "Denoised x1"),
            DenoiseLevel::TwoPasses => write!(f, "Denoised x2"),
            DenoiseLevel::ThreePasses => write!(f, "Denoised x3"),
        }
    }
}

impl DenoiseLevel {
    /// All levels in cycle order.
    pub fn all() -> &'static [DenoiseLevel] {
        &[
            DenoiseLevel::Original,
            DenoiseLevel::OnePass,
            DenoiseLevel::TwoPasses,
            DenoiseLevel::ThreePasses,
        ]
    }

    /// Numeric level, 0 through 3.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The level reached by one more trigger.
    pub fn next(self) -> Self {
        match self {
            DenoiseLevel::Original => DenoiseLevel::OnePass,
            DenoiseLevel::OnePass => DenoiseLevel::TwoPasses,
            DenoiseLevel::TwoPasses => DenoiseLevel::ThreePasses,
            DenoiseLevel::ThreePasses => DenoiseLevel::Original,
        }
    }
}

/// Steps through the denoise cycle for one mesh.
///
/// Holds the pristine positions captured right after load. Each trigger either
/// applies one more smoothing pass on top of the current positions or, after
/// the third pass, overwrites the positions with the pristine copy.
#[derive(Debug, Clone)]
pub struct DenoiseController {
    level: DenoiseLevel,
    pristine: Vec<Vec3>,
    smoothing_factor: f32,
}

impl DenoiseController {
    pub fn new(pristine: Vec<Vec3>, smoothing_factor: f32) -> Self {
        Self {
            level: DenoiseLevel::Original,
            pristine,
            smoothing_factor,
        }
    }

    pub fn level(&self) -> DenoiseLevel {
        self.level
    }

    pub fn pristine(&self) -> &[Vec3] {
        &self.pristine
    }

    pub fn smoothing_factor(&self) -> f32 {
        self.smoothing_factor
    }

    pub fn set_smoothing_factor(&mut self, factor: f32) {
        self.smoothing_factor = factor;
    }

    /// Handle one trigger and return the new level.
    pub fn advance(&mut self, vertices: &mut [Vec3], smoother: &LaplacianSmoother) -> DenoiseLevel {
        self.level = self.level.next();

        if self.level == DenoiseLevel::Original {
            self.revert(vertices);
            info!("Denoise level: {} (reverted {} vertices)", self.level, vertices.len());
        } else {
            smoother.smooth(vertices, self.smoothing_factor);
            info!(
                "Denoise level: {} (smoothing factor {})",
                self.level, self.smoothing_factor
            );
        }

        self.level
    }

    /// Overwrite `vertices` with the pristine positions.
    fn revert(&self, vertices: &mut [Vec3]) {
        if vertices.len() == self.pristine.len() {
            vertices.copy_from_slice(&self.pristine);
        } else {
            warn!(
                "Cannot revert: {} vertices given, pristine snapshot has {}",
                vertices.len(),
                self.pristine.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{inject, ConstantNoise};
    use hush_data::Face;

    fn setup() -> (Vec<Vec3>, LaplacianSmoother, DenoiseController) {
        let vertices = vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.1, 0.0),
            Vec3::new(0.2, 1.0, 0.3),
            Vec3::new(0.1, 0.4, 1.0),
            Vec3::new(1.5, 1.5, 0.2),
        ];
        let faces = vec![
            Face::new(0, 1, 2),
            Face::new(0, 1, 3),
            Face::new(0, 2, 3),
            Face::new(1, 2, 3),
            Face::new(1, 4, 2),
        ];
        let smoother = LaplacianSmoother::from_faces(vertices.len(), &faces);
        let controller = DenoiseController::new(vertices.clone(), 0.5);
        (vertices, smoother, controller)
    }

    #[test]
    fn test_level_cycle() {
        let mut level = DenoiseLevel::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(level.index());
            level = level.next();
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(level, DenoiseLevel::Original);
        assert_eq!(DenoiseLevel::all().len(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(DenoiseLevel::Original.to_string(), "Original");
        assert_eq!(DenoiseLevel::TwoPasses.to_string(), "Denoised x2");
    }

    #[test]
    fn test_passes_are_cumulative() {
        let (mut vertices, smoother, mut controller) = setup();
        let pristine = vertices.clone();

        assert_eq!(controller.advance(&mut vertices, &smoother), DenoiseLevel::OnePass);
        assert_eq!(controller.advance(&mut vertices, &smoother), DenoiseLevel::TwoPasses);

        let mut expected = pristine.clone();
        smoother.smooth_iterations(&mut expected, 0.5, 2);
        assert_eq!(vertices, expected);
    }

    #[test]
    fn test_four_triggers_restore_pristine() {
        let (mut vertices, smoother, mut controller) = setup();
        let pristine = vertices.clone();

        for _ in 0..3 {
            controller.advance(&mut vertices, &smoother);
            assert_ne!(vertices, pristine);
        }
        assert_eq!(controller.advance(&mut vertices, &smoother), DenoiseLevel::Original);
        assert_eq!(vertices, pristine);
        assert_eq!(controller.pristine(), pristine.as_slice());
    }

    #[test]
    fn test_fifth_trigger_matches_first() {
        let (mut vertices, smoother, mut controller) = setup();

        controller.advance(&mut vertices, &smoother);
        let first = vertices.clone();
        for _ in 0..3 {
            controller.advance(&mut vertices, &smoother);
        }
        assert_eq!(controller.advance(&mut vertices, &smoother), DenoiseLevel::OnePass);
        assert_eq!(vertices, first);
    }

    #[test]
    fn test_revert_discards_noise() {
        let (mut vertices, smoother, mut controller) = setup();
        let pristine = vertices.clone();
        let normals = vec![Vec3::Y; vertices.len()];

        controller.advance(&mut vertices, &smoother);
        inject(&mut vertices, &normals, 0.3, &mut ConstantNoise(0.9));
        controller.advance(&mut vertices, &smoother);
        inject(&mut vertices, &normals, 0.3, &mut ConstantNoise(-0.4));
        controller.advance(&mut vertices, &smoother);
        controller.advance(&mut vertices, &smoother);

        assert_eq!(controller.level(), DenoiseLevel::Original);
        assert_eq!(vertices, pristine);
    }

    #[test]
    fn test_smoothing_factor_is_adjustable() {
        let (mut vertices, smoother, mut controller) = setup();
        let pristine = vertices.clone();
        controller.set_smoothing_factor(0.0);
        assert_eq!(controller.smoothing_factor(), 0.0);

        controller.advance(&mut vertices, &smoother);
        assert_eq!(vertices, pristine);
        assert_eq!(controller.level(), DenoiseLevel::OnePass);
    }
}
