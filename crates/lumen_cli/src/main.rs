//! Command line front end: pick a scene, render it, write a PNG.

mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use lumen_renderer::render_parallel;
use scenes::SceneKind;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "A Monte Carlo path tracer")]
struct Args {
    /// Scene to render
    #[arg(value_enum, default_value_t = SceneKind::Spheres)]
    scene: SceneKind,

    /// Image width in pixels (scene default if omitted)
    #[arg(long)]
    width: Option<u32>,

    /// Samples per pixel
    #[arg(short, long, default_value_t = 100)]
    samples: u32,

    /// Maximum ray bounce depth
    #[arg(short, long, default_value_t = 50)]
    depth: u32,

    /// Base seed for the per-tile sample streams
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file path
    #[arg(short, long, default_value = "render.png")]
    output: String,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let (world, mut camera) = scenes::build(args.scene, args.seed);
    if let Some(width) = args.width {
        camera.image_width = width;
    }
    camera = camera.with_quality(args.samples, args.depth);
    camera.initialize().context("invalid camera configuration")?;

    let start = std::time::Instant::now();
    let image = render_parallel(&camera, world.as_ref(), args.seed);
    log::info!("render finished in {:.1}s", start.elapsed().as_secs_f32());

    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("pixel buffer has unexpected size")?;
    rgb.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output))?;
    log::info!("wrote {}", args.output);

    Ok(())
}
