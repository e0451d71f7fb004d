//! Display toggles: shading model, wireframe and mesh color.
//!
//! Only the state lives here; turning it into uniforms is the renderer's job.

use glam::Vec3;
use std::fmt;

/// Color used until the palette is first cycled.
pub const DEFAULT_COLOR: Vec3 = Vec3::splat(0.5);

/// Colors reachable with [`DisplayState::cycle_color`].
pub const PALETTE: [Vec3; 6] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingModel {
    /// Ambient, diffuse and specular terms.
    #[default]
    Phong,
    /// Ambient and diffuse only.
    Diffuse,
}

impl fmt::Display for ShadingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadingModel::Phong => write!(f, "Phong"),
            ShadingModel::Diffuse => write!(f, "Diffuse"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    shading: ShadingModel,
    wireframe: bool,
    palette_index: usize,
    color: Vec3,
}

impl DisplayState {
    pub fn shading(&self) -> ShadingModel {
        self.shading
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn toggle_shading(&mut self) {
        self.shading = match self.shading {
            ShadingModel::Phong => ShadingModel::Diffuse,
            ShadingModel::Diffuse => ShadingModel::Phong,
        };
    }

    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
    }

    /// Advance to the next palette entry. The first call lands on the second
    /// entry because the cursor starts on the first one while showing grey.
    pub fn cycle_color(&mut self) {
        self.palette_index = (self.palette_index + 1) % PALETTE.len();
        self.color = PALETTE[self.palette_index];
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            shading: ShadingModel::Phong,
            wireframe: false,
            palette_index: 0,
            color: DEFAULT_COLOR,
        }
    }
}
