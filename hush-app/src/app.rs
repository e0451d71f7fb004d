//! Application setup and the headless run loop with builder pattern.

use crate::buffer::FLOATS_PER_FACE;
use crate::config::SessionConfig;
use crate::errors::AppError;
use crate::script::{feed_tick, parse_script};
use crate::session::Session;
use hush_data::save_obj;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Logging configuration.
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Command-line values that override the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub seed: Option<u64>,
    pub noise_strength: Option<f32>,
    pub smoothing_factor: Option<f32>,
    pub recompute_normals: bool,
}

impl ConfigOverrides {
    fn apply(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(strength) = self.noise_strength {
            config = config.with_noise_strength(strength);
        }
        if let Some(factor) = self.smoothing_factor {
            config = config.with_smoothing_factor(factor);
        }
        if self.recompute_normals {
            config = config.with_recompute_normals(true);
        }
        config
    }
}

/// Summary printed as JSON when a run finishes.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub vertices: usize,
    pub faces: usize,
    pub ticks: u64,
    pub noise_injections: u64,
    pub denoise_triggers: u64,
    pub denoise_level: u8,
    pub denoise_level_name: String,
    pub buffer_floats: usize,
    pub bounds_min: Option<[f32; 3]>,
    pub bounds_max: Option<[f32; 3]>,
}

impl RunSummary {
    fn from_session(session: &Session) -> Self {
        let mesh = session.mesh();
        let stats = session.stats();
        let bounds = mesh.bounds();
        Self {
            vertices: mesh.vertex_count(),
            faces: mesh.face_count(),
            ticks: stats.ticks,
            noise_injections: stats.noise_injections,
            denoise_triggers: stats.denoise_triggers,
            denoise_level: session.denoise_level().index(),
            denoise_level_name: session.denoise_level().to_string(),
            buffer_floats: mesh.face_count() * FLOATS_PER_FACE,
            bounds_min: bounds.map(|(min, _)| min.to_array()),
            bounds_max: bounds.map(|(_, max)| max.to_array()),
        }
    }
}

/// Builder for configuring and running a headless session.
pub struct AppBuilder {
    mesh_path: PathBuf,
    config_path: Option<PathBuf>,
    overrides: ConfigOverrides,
    script: String,
    output: Option<PathBuf>,
    buffer_out: Option<PathBuf>,
    logging: LoggingConfig,
}

impl AppBuilder {
    /// Create a new AppBuilder for the mesh at `mesh_path`.
    pub fn new(mesh_path: impl Into<PathBuf>) -> Self {
        Self {
            mesh_path: mesh_path.into(),
            config_path: None,
            overrides: ConfigOverrides::default(),
            script: String::new(),
            output: None,
            buffer_out: None,
            logging: LoggingConfig::default(),
        }
    }

    /// Read tunables from a JSON file.
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set the tick script to run.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    /// Write the final geometry as OBJ.
    pub fn with_output(mut self, path: Option<PathBuf>) -> Self {
        self.output = path;
        self
    }

    /// Write the final interleaved display buffer as a JSON array.
    pub fn with_buffer_out(mut self, path: Option<PathBuf>) -> Self {
        self.buffer_out = path;
        self
    }

    /// Configure logging.
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging = config;
        self
    }

    /// Resolve the session config: defaults, then file, then overrides.
    pub fn session_config(&self) -> Result<SessionConfig, AppError> {
        let base = match &self.config_path {
            Some(path) => SessionConfig::from_json_file(path)?,
            None => SessionConfig::default(),
        };
        let config = self.overrides.apply(base);
        config.validate()?;
        Ok(config)
    }

    /// Run the application.
    pub fn run(self) -> Result<RunSummary, AppError> {
        self.init_logging();

        let config = self.session_config()?;
        debug!("Session config: {:?}", config);
        let ticks = parse_script(&self.script)?;

        let mut session = Session::load(&self.mesh_path, config)?;
        info!(
            "Session ready: {} vertices, {} faces, {} scripted ticks",
            session.mesh().vertex_count(),
            session.mesh().face_count(),
            ticks.len()
        );

        let mut buffer = session.vertex_buffer();
        for (index, tick) in ticks.iter().enumerate() {
            feed_tick(session.input_mut(), tick);
            let report = session.update();
            if report.geometry_changed() {
                debug!("Tick {}: {:?}", index, report);
            }
            if session.needs_regeneration() {
                buffer = session.vertex_buffer();
            }
        }

        if let Some(path) = &self.output {
            save_obj(session.mesh(), path)?;
        }
        if let Some(path) = &self.buffer_out {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer(std::io::BufWriter::new(file), &buffer)
                .map_err(std::io::Error::from)?;
            info!("Wrote {} buffer floats to {}", buffer.len(), path.display());
        }

        let summary = RunSummary::from_session(&session);
        info!(
            "Finished at level {} after {} ticks",
            summary.denoise_level_name, summary.ticks
        );
        Ok(summary)
    }

    fn init_logging(&self) {
        // Several runs may share a process (tests), keep the first subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&self.logging.level)),
            )
            .with_target(false)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hush-app-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_overrides_beat_file() {
        let config_path = temp_path("config.json");
        std::fs::write(&config_path, r#"{ "noise_strength": 0.5, "smoothing_factor": 0.25 }"#).unwrap();

        let builder = AppBuilder::new("unused.obj")
            .with_config_file(Some(config_path.clone()))
            .with_overrides(ConfigOverrides {
                smoothing_factor: Some(0.75),
                seed: Some(3),
                ..Default::default()
            });
        let config = builder.session_config().unwrap();
        std::fs::remove_file(&config_path).ok();

        assert_eq!(config.noise_strength, 0.5);
        assert_eq!(config.smoothing_factor, 0.75);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let builder = AppBuilder::new("unused.obj").with_overrides(ConfigOverrides {
            noise_strength: Some(f32::NAN),
            ..Default::default()
        });
        assert!(matches!(builder.session_config(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_script_end_to_end() {
        let mesh_path = temp_path("tetra.obj");
        let out_path = temp_path("tetra-out.obj");
        let buffer_path = temp_path("tetra-buffer.json");
        std::fs::write(
            &mesh_path,
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 3 2\nf 1 2 4\nf 1 4 3\nf 2 3 4\n",
        )
        .unwrap();

        let summary = AppBuilder::new(&mesh_path)
            .with_overrides(ConfigOverrides {
                seed: Some(1),
                ..Default::default()
            })
            .with_script("noise*3 idle denoise denoise idle denoise")
            .with_output(Some(out_path.clone()))
            .with_buffer_out(Some(buffer_path.clone()))
            .run()
            .unwrap();

        assert_eq!(summary.vertices, 4);
        assert_eq!(summary.faces, 4);
        assert_eq!(summary.ticks, 8);
        assert_eq!(summary.noise_injections, 3);
        assert_eq!(summary.denoise_triggers, 2);
        assert_eq!(summary.denoise_level, 2);
        assert_eq!(summary.buffer_floats, 72);

        let reloaded = hush_data::load_obj(&out_path).unwrap();
        assert_eq!(reloaded.face_count(), 4);
        let buffer: Vec<f32> =
            serde_json::from_str(&std::fs::read_to_string(&buffer_path).unwrap()).unwrap();
        assert_eq!(buffer.len(), 72);

        for path in [&mesh_path, &out_path, &buffer_path] {
            std::fs::remove_file(path).ok();
        }
    }

    #[test]
    fn test_run_bad_script_fails_before_loading() {
        let result = AppBuilder::new("definitely-missing.obj")
            .with_script("noise teleport")
            .run();
        assert!(matches!(result, Err(AppError::Script { .. })));
    }
}
