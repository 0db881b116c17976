use std::path::PathBuf;

use clap::Parser;

use crate::config::SceneConfig;
use crate::error::SceneResult;
use crate::objects::{BlackbodySed, Ring, RingGeometry, Star};
use crate::scene::Scene;
use crate::transform::rotate_scene;

/// Parse ring radii in format "inner,outer"
fn parse_radii(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err("Radii must be in format 'inner,outer'".to_string());
    }

    let inner = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid inner radius".to_string())?;
    let outer = parts[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid outer radius".to_string())?;

    Ok((inner, outer))
}

/// Star and ring arguments shared by the scene binaries
#[derive(Parser, Debug, Clone)]
pub struct SharedSceneArgs {
    /// Spectral type of the star, e.g. a5v
    #[arg(long, default_value = "a5v")]
    pub sptype: String,

    /// Stellar magnitude in the configured bandpass
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    pub mag: f64,

    /// Ring inner and outer radius in arcsec (format: "inner,outer")
    #[arg(long, default_value = "5.0,20.0", value_parser = parse_radii)]
    pub radii: (f64, f64),

    /// Total ring flux in mJy at the normalisation wavelength
    #[arg(long, default_value_t = 10.0)]
    pub flux: f64,

    /// Ring position angle in degrees east of north
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pa: f64,

    /// Ring inclination in degrees (0 face-on, 90 edge-on)
    #[arg(long, default_value_t = 30.0)]
    pub inc: f64,

    /// Size of the flat chunks the ring is split into, arcsec (0 uses outer - inner)
    #[arg(long, default_value_t = 0.0)]
    pub width: f64,

    /// Shift of the ring centre along its major axis, arcsec
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub offset: f64,

    /// Ring blackbody temperature in Kelvin, overrides the config file
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Wavelength in microns the ring flux refers to, overrides the config file
    #[arg(long)]
    pub norm_wave: Option<f64>,

    /// Build a star-only scene
    #[arg(long, default_value_t = false)]
    pub no_ring: bool,

    /// Rotate the finished scene by this many degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rotate: f64,

    /// JSON file with scene defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SharedSceneArgs {
    pub fn load_config(&self) -> SceneResult<SceneConfig> {
        SceneConfig::load_or_default(self.config.as_deref())
    }

    /// Build the star and ring scene described by the arguments, rotated if asked
    pub fn build_scene(&self, config: &SceneConfig) -> SceneResult<Scene> {
        let star = Star::new(&self.sptype, self.mag)?
            .with_band(config.star_band.clone())
            .with_name(config.star_name.clone());
        let mut scene = Scene::new().with_star(star);

        if !self.no_ring {
            let sed = BlackbodySed::new(
                self.temperature.unwrap_or(config.ring_sed.temperature_k),
                self.norm_wave.unwrap_or(config.ring_sed.norm_wave_um),
            )?;
            let (inner_radius, outer_radius) = self.radii;
            let geometry = RingGeometry {
                inner_radius,
                outer_radius,
                flux_mjy: self.flux,
                position_angle: self.pa,
                inclination: self.inc,
                width: self.width,
                offset: self.offset,
            };
            scene = scene.with_ring(Ring::new(0, geometry, sed)?)?;
        }

        if self.rotate != 0.0 {
            scene = rotate_scene(&scene, self.rotate)?;
        }
        Ok(scene)
    }
}
