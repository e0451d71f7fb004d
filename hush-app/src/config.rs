//! Session tunables, loadable from JSON.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for a session.
///
/// Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum displacement per noise tick, in mesh units.
    pub noise_strength: f32,
    /// Blend toward the neighbor average per smoothing pass (0 = none, 1 = full).
    pub smoothing_factor: f32,
    /// Seed for the noise generator. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Re-derive normals after every geometry change instead of keeping the
    /// load-time normals.
    pub recompute_normals: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            noise_strength: 0.01,
            smoothing_factor: 0.5,
            seed: None,
            recompute_normals: false,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(text: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn with_noise_strength(mut self, strength: f32) -> Self {
        self.noise_strength = strength;
        self
    }

    pub fn with_smoothing_factor(mut self, factor: f32) -> Self {
        self.smoothing_factor = factor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_recompute_normals(mut self, enabled: bool) -> Self {
        self.recompute_normals = enabled;
        self
    }

    /// Reject values that would put NaN or infinity into the geometry.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.noise_strength.is_finite() {
            return Err(AppError::InvalidConfig(format!(
                "noise_strength must be finite, got {}",
                self.noise_strength
            )));
        }
        if !self.smoothing_factor.is_finite() {
            return Err(AppError::InvalidConfig(format!(
                "smoothing_factor must be finite, got {}",
                self.smoothing_factor
            )));
        }
        Ok(())
    }
}
