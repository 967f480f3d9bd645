mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use thiserror::Error;

use stereo_config::{config_to_toml, load_or_default, SceneConfig};
use stereo_render::{run_frame_loop, RecordingBackend, RenderPipeline, Scene, ScriptedScheduler};

use crate::cli::Args;

/// Startup failure: no frame can be drawn.
#[derive(Debug, Error)]
#[error("Sorry, could not initialize the graphics context: {0}")]
struct InitError(String);

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        if err.downcast_ref::<InitError>().is_some() {
            eprintln!("{err}");
        } else {
            eprintln!("Error: {err:#}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut config = load_or_default(args.config.as_deref())
        .with_context(|| match &args.config {
            Some(path) => format!("failed to load config {}", path.display()),
            None => "failed to load default config".to_string(),
        })
        .map_err(init_error)?;
    args.apply_overrides(&mut config);

    if args.dump_config {
        print!("{}", config_to_toml(&config));
        return Ok(());
    }

    let inputs = args.initial_inputs()?;
    let (mut scene, mut backend, pipeline) = initialize(&config).map_err(init_error)?;

    let mut scheduler = ScriptedScheduler::new(args.frames, args.interval()).with_inputs(0, inputs);
    let frames = run_frame_loop(&pipeline, &mut backend, &mut scene, &mut scheduler);
    info!("rendered {frames} frames");

    if args.trace {
        print!("{}", report::trace(backend.commands()));
    }
    print!("{}", report::summary(&config, &scene, &backend, frames));
    Ok(())
}

fn initialize(config: &SceneConfig) -> Result<(Scene, RecordingBackend, RenderPipeline)> {
    let scene = Scene::from_config(config).context("failed to build scene")?;
    let mut backend = RecordingBackend::new();
    let pipeline =
        RenderPipeline::initialize(&mut backend, &scene).context("failed to upload geometry")?;
    Ok((scene, backend, pipeline))
}

fn init_error(err: anyhow::Error) -> anyhow::Error {
    InitError(format!("{err:#}")).into()
}
