//! Session context: owns the mesh and everything that edits it.
//!
//! One session is driven by one update loop. Each tick records the incoming
//! action events, applies every action that fires, and clears the per-tick
//! edges. Nothing here is shared across threads.

use crate::buffer::interleave;
use crate::config::SessionConfig;
use crate::display::DisplayState;
use crate::errors::AppError;
use crate::input::{Action, ActionEvent, InputState};
use hush_data::{load_obj, Mesh};
use hush_edit::{DenoiseController, DenoiseLevel, LaplacianSmoother, NoiseInjector, NoiseSource, SeededNoise};
use std::path::Path;
use tracing::{debug, info};

/// What a single tick changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub noise_injected: bool,
    pub denoise_level: Option<DenoiseLevel>,
    pub display_changed: bool,
}

impl TickReport {
    pub fn geometry_changed(&self) -> bool {
        self.noise_injected || self.denoise_level.is_some()
    }
}

/// Running totals over the life of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u64,
    pub noise_injections: u64,
    pub denoise_triggers: u64,
}

pub struct Session {
    mesh: Mesh,
    smoother: LaplacianSmoother,
    controller: DenoiseController,
    noise: NoiseInjector<Box<dyn NoiseSource>>,
    config: SessionConfig,
    display: DisplayState,
    input: InputState,
    stats: SessionStats,
    needs_regeneration: bool,
}

impl Session {
    /// Start a session on a loaded mesh, seeding noise from the config.
    pub fn new(mesh: Mesh, config: SessionConfig) -> Self {
        let source: Box<dyn NoiseSource> = match config.seed {
            Some(seed) => Box::new(SeededNoise::new(seed)),
            None => Box::new(SeededNoise::from_entropy()),
        };
        Self::with_noise_source(mesh, config, source)
    }

    /// Start a session with an explicit noise source.
    pub fn with_noise_source(mesh: Mesh, config: SessionConfig, source: Box<dyn NoiseSource>) -> Self {
        let smoother = LaplacianSmoother::new(&mesh);
        let controller = DenoiseController::new(mesh.vertices().to_vec(), config.smoothing_factor);
        Self {
            mesh,
            smoother,
            controller,
            noise: NoiseInjector::new(source),
            config,
            display: DisplayState::default(),
            input: InputState::default(),
            stats: SessionStats::default(),
            needs_regeneration: true,
        }
    }

    /// Load an OBJ file and start a session on it.
    pub fn load(path: &Path, config: SessionConfig) -> Result<Self, AppError> {
        config.validate()?;
        let mesh = load_obj(path)?;
        Ok(Self::new(mesh, config))
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn denoise_level(&self) -> DenoiseLevel {
        self.controller.level()
    }

    pub fn pristine(&self) -> &[glam::Vec3] {
        self.controller.pristine()
    }

    pub fn set_noise_strength(&mut self, strength: f32) {
        self.config.noise_strength = strength;
    }

    pub fn set_smoothing_factor(&mut self, factor: f32) {
        self.config.smoothing_factor = factor;
        self.controller.set_smoothing_factor(factor);
    }

    /// Whether positions changed since the display buffer was last produced.
    pub fn needs_regeneration(&self) -> bool {
        self.needs_regeneration
    }

    /// Produce the interleaved display buffer and clear the regeneration flag.
    pub fn vertex_buffer(&mut self) -> Vec<f32> {
        self.needs_regeneration = false;
        interleave(&self.mesh)
    }

    /// Displace vertices along their normals once.
    pub fn inject_noise(&mut self) {
        let strength = self.config.noise_strength;
        let (vertices, normals) = self.mesh.vertices_and_normals_mut();
        self.noise.inject(vertices, normals, strength);
        self.stats.noise_injections += 1;
        self.geometry_changed();
    }

    /// Step the denoise cycle once.
    pub fn advance_denoise(&mut self) -> DenoiseLevel {
        let level = self
            .controller
            .advance(self.mesh.vertices_mut(), &self.smoother);
        self.stats.denoise_triggers += 1;
        self.geometry_changed();
        level
    }

    /// Record one event for the current tick.
    pub fn handle_event(&mut self, event: ActionEvent) {
        self.input.record(event);
    }

    /// Mutable access to the input state, for polled readings via
    /// [`InputState::sample`].
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Apply everything that fires this tick, then clear per-tick edges.
    pub fn update(&mut self) -> TickReport {
        let mut report = TickReport::default();

        if self.input.fires(Action::InjectNoise) {
            self.inject_noise();
            report.noise_injected = true;
        }
        if self.input.fires(Action::AdvanceDenoise) {
            report.denoise_level = Some(self.advance_denoise());
        }
        if self.input.fires(Action::ToggleShading) {
            self.display.toggle_shading();
            info!("Shading: {}", self.display.shading());
            report.display_changed = true;
        }
        if self.input.fires(Action::ToggleWireframe) {
            self.display.toggle_wireframe();
            info!("Wireframe: {}", self.display.wireframe());
            report.display_changed = true;
        }
        if self.input.fires(Action::CycleColor) {
            self.display.cycle_color();
            info!("Mesh color: {:?}", self.display.color());
            report.display_changed = true;
        }

        self.stats.ticks += 1;
        self.input.end_frame();
        report
    }

    /// Record a batch of events and run one update.
    pub fn tick<I>(&mut self, events: I) -> TickReport
    where
        I: IntoIterator<Item = ActionEvent>,
    {
        for event in events {
            self.handle_event(event);
        }
        self.update()
    }

    fn geometry_changed(&mut self) {
        if self.config.recompute_normals {
            self.mesh.recompute_normals();
            debug!("Recomputed normals after geometry change");
        }
        self.needs_regeneration = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::FLOATS_PER_FACE;
    use glam::Vec3;
    use hush_data::load_obj_from_reader;
    use hush_edit::ConstantNoise;
    use std::io::Cursor;

    const TETRA: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 3 2\nf 1 2 4\nf 1 4 3\nf 2 3 4\n";

    fn session_with(sample: f32, config: SessionConfig) -> Session {
        let mesh = load_obj_from_reader(Cursor::new(TETRA)).unwrap();
        Session::with_noise_source(mesh, config, Box::new(ConstantNoise(sample)))
    }

    fn session() -> Session {
        session_with(0.5, SessionConfig::default().with_noise_strength(0.1))
    }

    #[test]
    fn test_noise_is_level_triggered() {
        let mut session = session();
        let start = session.mesh().vertices().to_vec();

        session.tick([ActionEvent::pressed(Action::InjectNoise)]);
        session.tick([ActionEvent::held(Action::InjectNoise)]);
        session.tick([ActionEvent::held(Action::InjectNoise)]);
        let report = session.tick([ActionEvent::released(Action::InjectNoise)]);

        assert!(!report.noise_injected);
        assert_eq!(session.stats().noise_injections, 3);
        assert_eq!(session.denoise_level(), DenoiseLevel::Original);

        let normals = session.mesh().vertex_normals();
        for ((now, before), normal) in session.mesh().vertices().iter().zip(&start).zip(normals) {
            let expected = *before + *normal * 0.05 * 3.0;
            assert!((*now - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_denoise_is_edge_triggered() {
        let mut session = session();
        let report = session.tick([ActionEvent::pressed(Action::AdvanceDenoise)]);
        assert_eq!(report.denoise_level, Some(DenoiseLevel::OnePass));

        for _ in 0..10 {
            let report = session.tick([ActionEvent::held(Action::AdvanceDenoise)]);
            assert_eq!(report.denoise_level, None);
        }
        session.tick([ActionEvent::released(Action::AdvanceDenoise)]);
        assert_eq!(session.denoise_level(), DenoiseLevel::OnePass);
        assert_eq!(session.stats().denoise_triggers, 1);
    }

    #[test]
    fn test_four_presses_restore_pristine() {
        let mut session = session();
        session.tick([ActionEvent::pressed(Action::InjectNoise)]);
        session.tick([ActionEvent::released(Action::InjectNoise)]);
        let pristine = session.pristine().to_vec();
        assert_ne!(session.mesh().vertices(), pristine.as_slice());

        let mut first = Vec::new();
        for press in 0..5 {
            session.tick([ActionEvent::pressed(Action::AdvanceDenoise)]);
            session.tick([ActionEvent::released(Action::AdvanceDenoise)]);
            if press == 0 {
                first = session.mesh().vertices().to_vec();
            }
            if press == 3 {
                assert_eq!(session.denoise_level(), DenoiseLevel::Original);
                assert_eq!(session.mesh().vertices(), pristine.as_slice());
            }
        }

        // The first press smoothed noisy geometry; the fifth smooths pristine geometry.
        let mut expected = pristine.clone();
        session.smoother.smooth(&mut expected, 0.5);
        assert_eq!(session.mesh().vertices(), expected.as_slice());
        assert_ne!(first, expected);
    }

    #[test]
    fn test_regeneration_flag() {
        let mut session = session();
        assert!(session.needs_regeneration());

        let buffer = session.vertex_buffer();
        assert_eq!(buffer.len(), session.mesh().face_count() * FLOATS_PER_FACE);
        assert!(!session.needs_regeneration());

        session.tick([ActionEvent::pressed(Action::CycleColor)]);
        assert!(!session.needs_regeneration());

        session.tick([ActionEvent::pressed(Action::AdvanceDenoise)]);
        assert!(session.needs_regeneration());
        session.vertex_buffer();

        session.tick([ActionEvent::pressed(Action::InjectNoise)]);
        assert!(session.needs_regeneration());
    }

    #[test]
    fn test_normals_stay_stale_by_default() {
        let mut session = session();
        let normals = session.mesh().vertex_normals().to_vec();
        session.advance_denoise();
        session.inject_noise();
        assert_eq!(session.mesh().vertex_normals(), normals.as_slice());
    }

    #[test]
    fn test_recompute_normals_option() {
        let config = SessionConfig::default().with_recompute_normals(true);
        let mut session = session_with(0.5, config);
        session.advance_denoise();

        let mut fresh = session.mesh().clone();
        fresh.recompute_normals();
        assert_eq!(session.mesh().vertex_normals(), fresh.vertex_normals());
        assert_eq!(session.mesh().face_normals(), fresh.face_normals());
    }

    #[test]
    fn test_display_actions() {
        let mut session = session();
        let report = session.tick([
            ActionEvent::pressed(Action::ToggleWireframe),
            ActionEvent::pressed(Action::ToggleShading),
        ]);
        assert!(report.display_changed);
        assert!(!report.geometry_changed());
        assert!(session.display().wireframe());

        // Holding does not toggle again.
        session.tick([ActionEvent::held(Action::ToggleWireframe)]);
        assert!(session.display().wireframe());
    }

    #[test]
    fn test_noise_and_denoise_same_tick() {
        let mut session = session();
        let report = session.tick([
            ActionEvent::pressed(Action::InjectNoise),
            ActionEvent::pressed(Action::AdvanceDenoise),
        ]);
        assert!(report.noise_injected);
        assert_eq!(report.denoise_level, Some(DenoiseLevel::OnePass));
        assert!(report.geometry_changed());
    }

    #[test]
    fn test_smoothing_factor_setter_reaches_controller() {
        let mut session = session();
        session.set_smoothing_factor(0.0);
        let before = session.mesh().vertices().to_vec();
        session.advance_denoise();
        assert_eq!(session.mesh().vertices(), before.as_slice());
        assert_eq!(session.config().smoothing_factor, 0.0);
    }

    #[test]
    fn test_zero_strength_noise_is_identity() {
        let mut session = session();
        session.set_noise_strength(0.0);
        let before = session.mesh().vertices().to_vec();
        for _ in 0..5 {
            session.tick([ActionEvent::held(Action::InjectNoise)]);
        }
        assert_eq!(session.mesh().vertices(), before.as_slice());
    }

    #[test]
    fn test_polled_input() {
        let mut session = session();
        for down in [true, true, true, false, true] {
            session.input_mut().sample(Action::AdvanceDenoise, down);
            session.update();
        }
        assert_eq!(session.denoise_level(), DenoiseLevel::TwoPasses);
        assert!(session.input().is_down(Action::AdvanceDenoise));
    }

    #[test]
    fn test_seeded_sessions_match() {
        let mesh = load_obj_from_reader(Cursor::new(TETRA)).unwrap();
        let config = SessionConfig::default().with_seed(11).with_noise_strength(0.3);
        let mut a = Session::new(mesh.clone(), config.clone());
        let mut b = Session::new(mesh, config);
        for _ in 0..4 {
            a.inject_noise();
            b.inject_noise();
        }
        assert_eq!(a.mesh().vertices(), b.mesh().vertices());
        assert_ne!(a.mesh().vertices(), a.pristine());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("hush-session-missing-04c1.obj");
        let err = Session::load(&path, SessionConfig::default()).err().unwrap();
        assert!(matches!(err, AppError::Mesh(hush_data::MeshError::FileNotFound { .. })));
    }

    #[test]
    fn test_vertex_normals_point_outward() {
        // Faces wind counter-clockwise seen from outside, so corner normals
        // point away from the centroid.
        let session = session();
        let centroid = session.mesh().vertices().iter().copied().sum::<Vec3>() / 4.0;
        for (v, n) in session.mesh().vertices().iter().zip(session.mesh().vertex_normals()) {
            assert!((*v - centroid).dot(*n) > 0.0);
        }
    }
}
