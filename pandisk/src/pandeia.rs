//! Export of scenes to the pandeia scene format.
//!
//! Stars become point sources with PHOENIX spectra normalised to their
//! magnitude. Rings have no counterpart in the simulator and are split into
//! `npt` flat elliptical chunks evenly spaced around the ring centre line, each
//! carrying `1/npt` of the ring flux. Dots map to a single flat source.

use log::info;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::config::ExportConfig;
use crate::error::{SceneError, SceneResult};
use crate::objects::{BlackbodySed, Dot, Ring, SceneObject, Star, MAX_RING_POINTS};
use crate::scene::Scene;
use crate::transform::sky_rotation;
use crate::units::{wrap_degrees, Angle, AngleExt};

/// Name given to every chunk of a discretised ring
pub const RING_CHUNK_NAME: &str = "disk chunk";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub orientation: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// "point" or "flat"
    pub geometry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    /// "photsys" for magnitudes in a bandpass, "at_lambda" for a flux at one wavelength
    #[serde(rename = "type")]
    pub norm_type: String,
    pub norm_flux: f64,
    pub norm_fluxunit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandpass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm_wave: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm_waveunit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sed {
    /// "phoenix" or "blackbody"
    pub sed_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wmin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wmax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumSpec {
    /// Emission lines, always empty
    pub lines: Vec<serde_json::Value>,
    pub name: String,
    pub normalization: Normalization,
    pub redshift: f64,
    pub sed: Sed,
}

/// One source of a pandeia scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PandeiaSource {
    pub id: usize,
    pub position: Position,
    pub shape: Shape,
    pub spectrum: SpectrumSpec,
}

impl PandeiaSource {
    pub fn is_point(&self) -> bool {
        self.shape.geometry == "point"
    }
}

fn star_source(id: usize, star: &Star) -> PandeiaSource {
    PandeiaSource {
        id,
        position: Position {
            orientation: 0.0,
            x_offset: 0.0,
            y_offset: 0.0,
        },
        shape: Shape {
            geometry: "point".to_string(),
            major: None,
            minor: None,
            orientation: None,
        },
        spectrum: SpectrumSpec {
            lines: Vec::new(),
            name: star.name.clone(),
            normalization: Normalization {
                norm_type: "photsys".to_string(),
                norm_flux: star.magnitude,
                norm_fluxunit: "vegamag".to_string(),
                bandpass: Some(star.band.clone()),
                norm_wave: None,
                norm_waveunit: None,
            },
            redshift: 0.0,
            sed: Sed {
                sed_type: "phoenix".to_string(),
                key: Some(star.spectral_type.key()),
                temp: None,
                wmin: None,
                wmax: None,
                sampling: None,
            },
        },
    }
}

fn at_lambda(flux_mjy: f64, sed: &BlackbodySed) -> Normalization {
    Normalization {
        norm_type: "at_lambda".to_string(),
        norm_flux: flux_mjy,
        norm_fluxunit: "mjy".to_string(),
        bandpass: None,
        norm_wave: Some(sed.norm_wave_um),
        norm_waveunit: Some("micron".to_string()),
    }
}

fn blackbody(sed: &BlackbodySed, config: Option<&ExportConfig>) -> Sed {
    Sed {
        sed_type: "blackbody".to_string(),
        key: None,
        temp: Some(sed.temperature_k),
        wmin: config.map(|c| c.sed_wmin_um),
        wmax: config.map(|c| c.sed_wmax_um),
        sampling: config.map(|c| c.sed_sampling),
    }
}

/// Number of chunks a ring is split into
///
/// # Errors
/// `InvalidGeometry` if the chunk size is zero, which happens for a ring with
/// equal radii and no explicit width, or if the count falls outside
/// `1..=MAX_RING_POINTS`
pub fn ring_points(ring: &Ring) -> SceneResult<usize> {
    let size = ring.geometry.chunk_size();
    if size <= 0.0 {
        return Err(SceneError::InvalidGeometry(format!(
            "ring at r={}\" has zero chunk size",
            ring.geometry.mid_radius()
        )));
    }

    if let Some(points) = ring.points {
        if points == 0 || points > MAX_RING_POINTS {
            return Err(SceneError::InvalidGeometry(format!(
                "ring must be split into 1 to {MAX_RING_POINTS} chunks, got {points}"
            )));
        }
        return Ok(points);
    }

    let around = 2.0 * std::f64::consts::PI * ring.geometry.mid_radius() / size;
    if !(around.is_finite() && around <= MAX_RING_POINTS as f64) {
        return Err(SceneError::InvalidGeometry(format!(
            "ring at r={}\" with {size}\" chunks needs more than {MAX_RING_POINTS} chunks",
            ring.geometry.mid_radius()
        )));
    }
    Ok((around.floor() as usize).max(1))
}

fn ring_sources(
    first_id: usize,
    ring: &Ring,
    config: &ExportConfig,
) -> SceneResult<Vec<PandeiaSource>> {
    let g = &ring.geometry;
    let npt = ring_points(ring)?;
    let size = g.chunk_size();
    let radius = g.mid_radius();
    let cos_inc = Angle::from_degrees(g.inclination).as_radians().cos();
    let rotation = sky_rotation(g.position_angle);
    let chunk_flux = g.flux_mjy / npt as f64;

    info!(
        "adding {npt}pt disk with r:{radius}\", dr:{size}\", tot flux:{}mJy @ {}um, temp:{}K, incl:{}deg, pa:{}deg",
        g.flux_mjy, ring.sed.norm_wave_um, ring.sed.temperature_k, g.inclination, g.position_angle
    );

    let sources = (0..npt)
        .map(|k| {
            let a = Angle::from_degrees(360.0 * k as f64 / npt as f64).as_radians();
            let local = Point2::new(radius * a.sin() * cos_inc, radius * a.cos() + g.offset);
            let sky = rotation * local;
            PandeiaSource {
                id: first_id + k,
                position: Position {
                    orientation: 0.0,
                    x_offset: sky.x,
                    y_offset: sky.y,
                },
                shape: Shape {
                    geometry: "flat".to_string(),
                    major: Some(size),
                    minor: Some(size * cos_inc),
                    orientation: Some(wrap_degrees(90.0 + g.position_angle)),
                },
                spectrum: SpectrumSpec {
                    lines: Vec::new(),
                    name: RING_CHUNK_NAME.to_string(),
                    normalization: at_lambda(chunk_flux, &ring.sed),
                    redshift: 0.0,
                    sed: blackbody(&ring.sed, Some(config)),
                },
            }
        })
        .collect();
    Ok(sources)
}

fn dot_source(id: usize, dot: &Dot) -> PandeiaSource {
    PandeiaSource {
        id,
        position: Position {
            orientation: 0.0,
            x_offset: dot.x,
            y_offset: dot.y,
        },
        shape: Shape {
            geometry: "flat".to_string(),
            major: Some(dot.size),
            minor: Some(dot.size),
            orientation: Some(0.0),
        },
        spectrum: SpectrumSpec {
            lines: Vec::new(),
            name: dot.name.clone(),
            normalization: at_lambda(dot.flux_mjy, &dot.sed),
            redshift: 0.0,
            sed: blackbody(&dot.sed, None),
        },
    }
}

/// Convert a scene to pandeia sources with ids counting from 1 in scene order.
///
/// # Errors
/// * `EmptyScene` if the scene has no objects
/// * `InvalidGeometry` if a ring cannot be discretised
pub fn to_pandeia_sources(scene: &Scene, config: &ExportConfig) -> SceneResult<Vec<PandeiaSource>> {
    if scene.is_empty() {
        return Err(SceneError::EmptyScene);
    }

    let mut sources: Vec<PandeiaSource> = Vec::new();
    for obj in scene {
        let next_id = sources.len() + 1;
        match obj {
            SceneObject::Star(star) => sources.push(star_source(next_id, star)),
            SceneObject::Ring(ring) => sources.extend(ring_sources(next_id, ring, config)?),
            SceneObject::Dot(dot) => sources.push(dot_source(next_id, dot)),
        }
    }

    info!(
        "Exported {} scene objects as {} pandeia sources",
        scene.len(),
        sources.len()
    );
    Ok(sources)
}

/// Pretty-printed JSON array of the scene's pandeia sources
pub fn to_pandeia_json(scene: &Scene, config: &ExportConfig) -> SceneResult<String> {
    let sources = to_pandeia_sources(scene, config)?;
    Ok(serde_json::to_string_pretty(&sources)?)
}
