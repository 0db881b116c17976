//! Build a star and ring scene, plot it, and optionally export it for the simulator

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use pandisk::shared_args::SharedSceneArgs;
use pandisk::{
    plot_disk_scene, to_pandeia_json, AsciiBackend, PlottersBackend, RenderArtifact,
    RenderBackend, Scene,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// PNG or SVG image chosen by the output extension
    Image,
    /// Text preview printed to stdout
    Ascii,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Plot a star and disk scene")]
struct Args {
    #[command(flatten)]
    shared: SharedSceneArgs,

    /// Rendering backend
    #[arg(long, value_enum, default_value = "image")]
    backend: Backend,

    /// Output image path (.png or .svg)
    #[arg(short, long, default_value = "plots/disk_scene.png")]
    output: PathBuf,

    /// Load the scene from a JSON file instead of the star and ring arguments
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Save the scene as JSON
    #[arg(long)]
    save_scene: Option<PathBuf>,

    /// Write the simulator source list as JSON
    #[arg(long)]
    pandeia_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.shared.load_config().context("loading scene config")?;
    let scene = match &args.scene {
        Some(path) => Scene::load_from_file(path)
            .with_context(|| format!("loading scene from {}", path.display()))?,
        None => args.shared.build_scene(&config)?,
    };
    info!("Scene holds {} objects", scene.len());

    if let Some(path) = &args.save_scene {
        scene
            .save_to_file(path)
            .with_context(|| format!("saving scene to {}", path.display()))?;
        info!("Scene saved to {}", path.display());
    }

    if let Some(path) = &args.pandeia_json {
        let json = to_pandeia_json(&scene, &config.export)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing simulator scene to {}", path.display()))?;
        info!("Simulator scene saved to {}", path.display());
    }

    let backend: Box<dyn RenderBackend> = match args.backend {
        Backend::Image => Box::new(PlottersBackend::new(&args.output).with_size(config.plot.size_px)),
        Backend::Ascii => Box::new(AsciiBackend::new(
            config.plot.ascii_width,
            config.plot.ascii_height,
        )),
    };

    let handle = plot_disk_scene(&scene, backend.as_ref())?;
    match &handle.artifact {
        RenderArtifact::Text(text) => println!("{text}"),
        RenderArtifact::File(path) => println!(
            "Plotted {} components to {}",
            handle.components,
            path.display()
        ),
    }

    Ok(())
}
