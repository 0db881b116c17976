//! Print the summed blackbody spectrum of a disk scene

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ndarray::Array1;
use pandisk::shared_args::SharedSceneArgs;
use pandisk::{normalise_scene, scene_spectrum, Scene};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tabulate the blackbody spectrum of a disk scene")]
struct Args {
    #[command(flatten)]
    shared: SharedSceneArgs,

    /// Load the scene from a JSON file instead of the star and ring arguments
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Index of the first scene object included
    #[arg(long, default_value_t = 0)]
    first: usize,

    /// Shortest wavelength in microns
    #[arg(long, default_value_t = 5.0)]
    min_wave: f64,

    /// Longest wavelength in microns
    #[arg(long, default_value_t = 30.0)]
    max_wave: f64,

    /// Number of wavelength samples
    #[arg(long, default_value_t = 100)]
    samples: usize,

    /// Scale the components to this total flux in mJy before tabulating
    #[arg(long)]
    norm_flux: Option<f64>,

    /// Wavelength in microns for --norm-flux, defaults to the first component's
    #[arg(long)]
    norm_flux_wave: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.samples < 2 || args.min_wave <= 0.0 || args.max_wave <= args.min_wave {
        anyhow::bail!(
            "need at least 2 samples over a positive increasing range, got {} over {}-{} um",
            args.samples,
            args.min_wave,
            args.max_wave
        );
    }

    let config = args.shared.load_config().context("loading scene config")?;
    let mut scene = match &args.scene {
        Some(path) => Scene::load_from_file(path)
            .with_context(|| format!("loading scene from {}", path.display()))?,
        None => args.shared.build_scene(&config)?,
    };

    if let Some(norm_flux) = args.norm_flux {
        scene = normalise_scene(&scene, norm_flux, args.norm_flux_wave, args.first)?;
    }

    let grid = Array1::linspace(args.min_wave, args.max_wave, args.samples);
    let spectrum = scene_spectrum(&scene, args.first, Some(grid));

    println!("{:>12} {:>14}", "wave_um", "flux_mjy");
    for (wave, flux) in spectrum.wavelengths_um.iter().zip(spectrum.flux_mjy.iter()) {
        println!("{wave:>12.4} {flux:>14.6e}");
    }

    Ok(())
}
