#[macro_use]
extern crate serde_derive;

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use log::{debug, error, info, log_enabled, Level};

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::scene::SceneSource;
use crate::world::World;

mod camera;
mod collection;
mod config;
mod error;
mod geometry;
mod intersection;
mod material;
mod model;
mod output;
mod ray;
mod render;
mod scene;
mod vec3;
mod world;

/// Casts one ray per pixel into a scene and writes the result to `output.png`.
#[derive(Parser, Debug)]
#[command(name = "bray")]
struct Args {
    /// OBJ mesh or `.json` scene descriptor; renders the built-in scene if omitted.
    input: Option<PathBuf>,
}

fn run(config: &RenderConfig) -> Result<()> {
    let scene = config.scene.populate()?;
    let camera = Camera::new(scene.camera.unwrap_or(config.camera), config.width, config.height)?;
    debug!("camera at {:?}", camera.position());
    log_center_hit(&scene.world, &camera);

    info!("Start drawing {}x{} ...", config.width, config.height);
    let now = Instant::now();

    let framebuffer = render::render(&scene.world, &camera);
    drop(scene);

    info!("Finished, elapsed: {:.3} ms", now.elapsed().as_secs_f64() * 1000.0);

    output::save(&framebuffer, &config.output)
}

fn log_center_hit(world: &World, camera: &Camera) {
    let (width, height) = camera.dimensions();
    let ray = camera.ray(width / 2, height / 2);

    match render::closest_intersection(world, &ray) {
        Some(hit) => debug!(
            "center ray hits material {} at {:?}, barycentric {:?}",
            hit.material,
            ray.offset(hit.t),
            hit.barycentric.map(|b| (b.u, b.v))
        ),
        None => debug!("center ray hits the sky"),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = RenderConfig::with_scene(SceneSource::from(args.input));

    if let Err(err) = run(&config) {
        error!("{}", err);
        if !log_enabled!(Level::Error) {
            eprintln!("error: {}", err);
        }
        process::exit(1);
    }
}
