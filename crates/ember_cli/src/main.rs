//! Ember command line renderer.
//!
//! Renders the built-in scene or a JSON scene file to PPM (stdout or file)
//! or PNG, depending on the output extension.

mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use ember_renderer::{save_png, write_ppm, Camera};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene::{default_scene, SceneDesc};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ember", version, about = "Path trace a scene of spheres")]
struct Args {
    /// JSON scene file; renders the built-in two-sphere scene when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image; PPM to stdout when omitted, PNG when the extension is .png
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Override the samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut scene = match &args.scene {
        Some(path) => SceneDesc::load(path)
            .and_then(|desc| desc.build())
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the built-in scene");
            default_scene()
        }
    };

    if let Some(width) = args.width {
        scene.camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        scene.camera.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        scene.camera.max_depth = max_depth;
    }
    let seed = args.seed.unwrap_or(scene.seed);
    log::debug!("Seed: {}", seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let image = Camera::new(scene.camera)
        .render(&scene.world, &mut rng)
        .context("Render failed")?;

    match &args.output {
        Some(path) if is_png(path) => {
            save_png(&image, path).with_context(|| format!("Failed to write {}", path.display()))?
        }
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_ppm(&image, BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => write_ppm(&image, BufWriter::new(io::stdout().lock()))
            .context("Failed to write to stdout")?,
    }

    if let Some(path) = &args.output {
        log::info!("Saved to {}", path.display());
    }
    Ok(())
}

fn is_png(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}
