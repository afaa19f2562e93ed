//! Prism command line renderer.
//!
//! Loads a scene, then renders it either progressively, pumping the
//! scheduler one frame budget at a time the way an interactive viewer
//! would, or across all cores at once.

mod cli;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use prism_core::{load_scene, SceneDescription};
use prism_renderer::{
    render_parallel, ImagePlane, ProgressiveRender, RenderConfig, RenderImage, RenderState, Tracer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::Args;

/// Time given to the scheduler per simulated frame
const FRAME_BUDGET: Duration = Duration::from_millis(16);

fn load_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };
    args.apply_overrides(&mut config);
    Ok(config)
}

fn render_progressive(tracer: Tracer, scene: &SceneDescription, args: &Args) -> Result<RenderImage> {
    let mut render = ProgressiveRender::new(tracer, args.seed);
    render.restart(&scene.eye, args.width, args.height);

    if let Some(dir) = &args.snapshots {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create snapshot directory {}", dir.display()))?;
    }

    let total = (args.width as usize * args.height as usize).max(1);
    let mut refreshes = 0usize;
    let mut snapshot_error = None;

    while render.state() == RenderState::Rendering {
        render.run_for(FRAME_BUDGET, |image| {
            refreshes += 1;
            let done = image.rendered_count();
            log::info!("{:5.1}% ({} of {} pixels)", 100.0 * done as f32 / total as f32, done, total);

            if let Some(dir) = &args.snapshots {
                let path = dir.join(format!("snapshot_{refreshes:03}.png"));
                if let Err(e) = image.save(&path) {
                    if snapshot_error.is_none() {
                        snapshot_error = Some(e);
                    }
                }
            }
        });

        if let Some(e) = snapshot_error.take() {
            return Err(e).context("Failed to write snapshot");
        }
    }

    Ok(render.image().clone())
}

fn inspect(tracer: &Tracer, scene: &SceneDescription, args: &Args, x: u32, y: u32) {
    let plane = ImagePlane::new(&scene.eye, args.width, args.height);
    let mut rng = StdRng::seed_from_u64(args.seed);

    let (colour, rays) = tracer.inspect_pixel(&plane, x, y, &mut rng);

    log::info!("Pixel ({}, {}) = {}", x, y, colour);
    for ray in &rays {
        log::info!("  {:?} {} -> {}", ray.class, ray.start, ray.end);
    }
    log::info!("{} rays recorded", rays.len());
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.clone().into())
        .init();

    log::info!("Starting Prism");

    let scene = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    if args.dump_scene {
        print!("{scene}");
    }

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    let tracer = Tracer::new(&scene, config)?;

    let preview_triangles: usize = tracer
        .world()
        .objects()
        .iter()
        .map(|object| object.preview().triangle_count())
        .sum();
    log::debug!("Preview tessellation: {} triangles", preview_triangles);

    if let Some(pixel) = args.inspect_pixel() {
        inspect(&tracer, &scene, &args, pixel.x, pixel.y);
        return Ok(());
    }

    log::info!(
        "Rendering {}x{} ({}, {} rays per pixel)",
        args.width,
        args.height,
        tracer.config(),
        tracer.config().rays_per_pixel()
    );

    let image = if args.parallel {
        render_parallel(&tracer, &scene.eye, args.width, args.height, args.seed)
    } else {
        render_progressive(tracer, &scene, &args)?
    };

    save(&image, &args.output)
}

fn save(image: &RenderImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
