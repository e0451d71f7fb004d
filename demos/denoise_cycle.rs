//! Denoise cycle example
//!
//! Loads an OBJ mesh, roughens it with seeded noise, then walks the full
//! denoise cycle and reports how far each level sits from the loaded shape.
//!
//! Usage:
//!   cargo run --example denoise_cycle -- <path_to_obj> [noise_ticks]

use glam::Vec3;
use hush::{load_obj, DenoiseController, DenoiseLevel, LaplacianSmoother, NoiseInjector, SeededNoise};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;

fn mean_offset(current: &[Vec3], reference: &[Vec3]) -> f32 {
    if current.is_empty() {
        return 0.0;
    }
    let total: f32 = current
        .iter()
        .zip(reference)
        .map(|(a, b)| a.distance(*b))
        .sum();
    total / current.len() as f32
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let obj_path = args
        .next()
        .map(PathBuf::from)
        .ok_or("Please provide an OBJ file path")?;
    let noise_ticks: usize = match args.next() {
        Some(text) => text.parse()?,
        None => 30,
    };

    let mut mesh = load_obj(&obj_path)?;
    let smoother = LaplacianSmoother::new(&mesh);
    let mut controller = DenoiseController::new(mesh.vertices().to_vec(), 0.5);
    let mut noise = NoiseInjector::new(SeededNoise::new(7));

    for _ in 0..noise_ticks {
        let (vertices, normals) = mesh.vertices_and_normals_mut();
        noise.inject(vertices, normals, 0.01);
    }
    info!(
        "Noisy mesh: mean offset {:.5} after {} ticks",
        mean_offset(mesh.vertices(), controller.pristine()),
        noise_ticks
    );

    for _ in 0..DenoiseLevel::all().len() {
        let level = controller.advance(mesh.vertices_mut(), &smoother);
        info!(
            "{}: mean offset {:.5}",
            level,
            mean_offset(mesh.vertices(), controller.pristine())
        );
    }

    Ok(())
}
