//! Scene defaults stored as JSON.
//!
//! Everything the scene builders and exporters would otherwise hard code lives
//! in [`SceneConfig`]. A missing file means defaults; a file only needs the keys
//! it wants to override.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SceneResult;
use crate::objects::{BlackbodySed, DEFAULT_BAND, DEFAULT_STAR_NAME};

/// Sampling of the blackbody SEDs written into simulator scenes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Shortest wavelength of the blackbody SED, microns
    pub sed_wmin_um: f64,
    /// Longest wavelength of the blackbody SED, microns
    pub sed_wmax_um: f64,
    /// Samples per micron of the blackbody SED
    pub sed_sampling: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sed_wmin_um: 0.5,
            sed_wmax_um: 30.0,
            sed_sampling: 200.0,
        }
    }
}

/// Size of rendered figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Image width and height in pixels (figures are square)
    pub size_px: u32,
    /// ASCII preview width in characters
    pub ascii_width: usize,
    /// ASCII preview height in characters
    pub ascii_height: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            size_px: 500,
            ascii_width: 60,
            ascii_height: 30,
        }
    }
}

/// Defaults applied when building, exporting and plotting scenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Bandpass star magnitudes refer to
    pub star_band: String,
    /// Source name given to stars
    pub star_name: String,
    /// SED of rings built from the command line
    pub ring_sed: BlackbodySed,
    pub export: ExportConfig,
    pub plot: PlotConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_band: DEFAULT_BAND.to_string(),
            star_name: DEFAULT_STAR_NAME.to_string(),
            ring_sed: BlackbodySed::default(),
            export: ExportConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Save to a pretty-printed JSON file
    pub fn save_to_file(&self, path: &Path) -> SceneResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file; keys absent from the file keep their defaults
    pub fn load_from_file(path: &Path) -> SceneResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: SceneConfig = serde_json::from_str(&json)?;
        // Re-validate since the SED is not checked by serde
        BlackbodySed::new(config.ring_sed.temperature_k, config.ring_sed.norm_wave_um)?;
        Ok(config)
    }

    /// Load `path` if given, otherwise return defaults
    pub fn load_or_default(path: Option<&Path>) -> SceneResult<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}
