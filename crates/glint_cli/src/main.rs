use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use glint_core::{load_scene, SceneDescription};
use glint_renderer::{render, Camera, RenderConfig, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

/// Command line options
#[derive(Debug, StructOpt)]
#[structopt(name = "glint", about = "Render a scene of spheres with a CPU path tracer")]
struct Opt {
    /// Scene file (JSON); the built-in demo scene is used when omitted
    #[structopt(short, long, parse(from_os_str))]
    scene: Option<PathBuf>,

    /// Output image, format chosen by extension (.png, .ppm, ...)
    #[structopt(short, long, parse(from_os_str), default_value = "output.png")]
    output: PathBuf,

    /// Override the image width in pixels
    #[structopt(short, long)]
    width: Option<u32>,

    /// Override the samples per pixel
    #[structopt(long)]
    samples: Option<u32>,

    /// Override the maximum bounce depth
    #[structopt(long)]
    max_depth: Option<u32>,

    /// Random seed
    #[structopt(long, default_value = "0")]
    seed: u64,
}

impl Opt {
    /// Load the requested scene and apply command line overrides.
    fn scene_description(&self) -> Result<SceneDescription> {
        let mut scene = match &self.scene {
            Some(path) => load_scene(path)
                .with_context(|| format!("Failed to load scene {:?}", path))?,
            None => {
                log::info!("No scene given, using the demo scene");
                SceneDescription::demo()
            }
        };

        if let Some(width) = self.width {
            scene.render.image_width = width;
        }
        if let Some(samples) = self.samples {
            scene.render.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            scene.render.max_depth = max_depth;
        }

        scene.validate().context("Invalid render settings")?;
        Ok(scene)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::from_args();
    log::info!("Starting Glint");

    let start = Instant::now();
    let desc = opt.scene_description()?;
    let world = Scene::from_description(&desc);
    let camera = Camera::new(&desc.camera);
    let config = RenderConfig::from(&desc.render);
    log::info!("Scene built in {:?} ({} spheres)", start.elapsed(), world.len());

    let mut rng = StdRng::seed_from_u64(opt.seed);
    let image = render(
        &camera,
        &world,
        desc.render.image_width,
        desc.image_height(),
        &config,
        &mut rng,
    );

    image
        .save(&opt.output)
        .with_context(|| format!("Failed to save image to {:?}", opt.output))?;
    log::info!("Saved to {:?}", opt.output);

    Ok(())
}
