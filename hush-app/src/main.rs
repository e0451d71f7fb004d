//! Hush
//!
//! Headless driver for mesh noise injection and Laplacian denoising.
//!
//! Features:
//! - OBJ loading with automatic face and vertex normals
//! - Level-triggered noise along vertex normals
//! - Four-state denoise cycle with exact restore of the loaded geometry
//! - Scripted key ticks for reproducible runs
//! - OBJ and display buffer export

mod app;
mod buffer;
mod config;
mod display;
mod errors;
mod input;
mod script;
mod session;

use app::{AppBuilder, ConfigOverrides, LoggingConfig};
use clap::Parser;
use std::path::PathBuf;

/// Hush - Mesh Noise and Denoise
#[derive(Parser, Debug)]
#[command(name = "hush")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to OBJ file to load
    #[arg(short, long)]
    file: PathBuf,

    /// JSON file with session tunables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the noise generator
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum displacement per noise tick
    #[arg(long)]
    noise_strength: Option<f32>,

    /// Blend toward the neighbor average per smoothing pass
    #[arg(long)]
    smoothing_factor: Option<f32>,

    /// Recompute normals after every geometry change
    #[arg(long)]
    recompute_normals: bool,

    /// Tick script, e.g. "noise*20 idle denoise idle denoise"
    #[arg(short, long, default_value = "")]
    script: String,

    /// Write the final geometry to this OBJ file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the final display buffer to this JSON file
    #[arg(long)]
    buffer_out: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let overrides = ConfigOverrides {
        seed: args.seed,
        noise_strength: args.noise_strength,
        smoothing_factor: args.smoothing_factor,
        recompute_normals: args.recompute_normals,
    };

    let result = AppBuilder::new(args.file)
        .with_config_file(args.config)
        .with_overrides(overrides)
        .with_script(args.script)
        .with_output(args.output)
        .with_buffer_out(args.buffer_out)
        .with_logging(LoggingConfig {
            level: args.log_level,
        })
        .run();

    match result {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Application error: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Application error: {}", e);
            std::process::exit(1);
        }
    }
}
