//! Scene object descriptors: stars, circumstellar rings and blackbody dots.
//!
//! Every descriptor validates its parameters on construction, so a value that
//! exists is always well formed. Geometry is stored in arcseconds and degrees,
//! fluxes in mJy, wavelengths in microns and temperatures in Kelvin.

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::spectral::SpectralType;
use crate::units::wrap_degrees;

/// Bandpass a star magnitude refers to unless set otherwise
pub const DEFAULT_BAND: &str = "johnson,v";

/// Source name given to stars unless set otherwise
pub const DEFAULT_STAR_NAME: &str = "generic source";

/// Most chunks a single ring may be split into
pub const MAX_RING_POINTS: usize = 100_000;

fn require_finite(name: &str, value: f64) -> SceneResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SceneError::InvalidGeometry(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> SceneResult<f64> {
    let value = require_finite(name, value)?;
    if value < 0.0 {
        return Err(SceneError::InvalidGeometry(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(value)
}

/// A star at the scene origin, described by its spectral type and brightness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub spectral_type: SpectralType,
    /// Apparent magnitude in `band` (Vega system)
    pub magnitude: f64,
    /// Bandpass the magnitude is normalised in
    pub band: String,
    pub name: String,
}

impl Star {
    /// Create a star from a spectral type token and magnitude
    ///
    /// # Errors
    /// * `InvalidSpectralType` if the token has no stellar model
    /// * `InvalidMagnitude` if the magnitude is NaN or infinite
    pub fn new(spectral_type: &str, magnitude: f64) -> SceneResult<Self> {
        let spectral_type = spectral_type.parse::<SpectralType>()?;
        if !magnitude.is_finite() {
            return Err(SceneError::InvalidMagnitude(magnitude));
        }
        Ok(Self {
            spectral_type,
            magnitude,
            band: DEFAULT_BAND.to_string(),
            name: DEFAULT_STAR_NAME.to_string(),
        })
    }

    pub fn with_band(mut self, band: impl Into<String>) -> Self {
        self.band = band.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Blackbody spectral energy distribution normalised at one wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackbodySed {
    /// Blackbody temperature in Kelvin
    pub temperature_k: f64,
    /// Wavelength in microns at which the component flux applies
    pub norm_wave_um: f64,
}

impl BlackbodySed {
    /// Create a blackbody SED
    ///
    /// # Errors
    /// `InvalidSpectrum` unless both temperature and wavelength are finite and positive
    pub fn new(temperature_k: f64, norm_wave_um: f64) -> SceneResult<Self> {
        if !(temperature_k.is_finite() && temperature_k > 0.0) {
            return Err(SceneError::InvalidSpectrum(format!(
                "temperature must be positive, got {temperature_k}"
            )));
        }
        if !(norm_wave_um.is_finite() && norm_wave_um > 0.0) {
            return Err(SceneError::InvalidSpectrum(format!(
                "normalisation wavelength must be positive, got {norm_wave_um}"
            )));
        }
        Ok(Self {
            temperature_k,
            norm_wave_um,
        })
    }
}

impl Default for BlackbodySed {
    /// Cold dust observed in the mid-infrared
    fn default() -> Self {
        Self {
            temperature_k: 70.0,
            norm_wave_um: 24.0,
        }
    }
}

/// Geometry and brightness of a ring, in the order `add_ring` takes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingGeometry {
    /// Inner radius in arcsec
    pub inner_radius: f64,
    /// Outer radius in arcsec
    pub outer_radius: f64,
    /// Total ring flux in mJy at the SED normalisation wavelength
    pub flux_mjy: f64,
    /// Major axis position angle, degrees east of north in [0, 360)
    pub position_angle: f64,
    /// Inclination in degrees, 0 face-on to 90 edge-on
    pub inclination: f64,
    /// Size in arcsec of the flat chunks the ring is split into; 0 uses the radial width
    pub width: f64,
    /// Shift of the ring centre along its major axis, arcsec
    pub offset: f64,
}

impl RingGeometry {
    /// Check ranges and wrap the position angle into [0, 360)
    pub fn validated(self) -> SceneResult<Self> {
        let inner_radius = require_non_negative("inner radius", self.inner_radius)?;
        let outer_radius = require_non_negative("outer radius", self.outer_radius)?;
        if inner_radius > outer_radius {
            return Err(SceneError::InvalidGeometry(format!(
                "inner radius {inner_radius} exceeds outer radius {outer_radius}"
            )));
        }
        let flux_mjy = require_non_negative("flux scale", self.flux_mjy)?;
        let position_angle = wrap_degrees(require_finite("position angle", self.position_angle)?);
        let inclination = require_finite("inclination", self.inclination)?;
        if !(0.0..=90.0).contains(&inclination) {
            return Err(SceneError::InvalidGeometry(format!(
                "inclination must lie in [0, 90] degrees, got {inclination}"
            )));
        }
        let width = require_non_negative("width", self.width)?;
        let offset = require_finite("offset", self.offset)?;

        Ok(Self {
            inner_radius,
            outer_radius,
            flux_mjy,
            position_angle,
            inclination,
            width,
            offset,
        })
    }

    /// Radius of the ring centre line in arcsec
    pub fn mid_radius(&self) -> f64 {
        0.5 * (self.inner_radius + self.outer_radius)
    }

    /// Size of each flat chunk used when the ring is discretised
    pub fn chunk_size(&self) -> f64 {
        if self.width > 0.0 {
            self.width
        } else {
            self.outer_radius - self.inner_radius
        }
    }
}

/// A circumstellar ring attached to a star in the same scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    /// Scene index of the host star
    pub host: usize,
    pub geometry: RingGeometry,
    pub sed: BlackbodySed,
    /// Number of chunks to split the ring into, derived from the geometry if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<usize>,
}

impl Ring {
    pub fn new(host: usize, geometry: RingGeometry, sed: BlackbodySed) -> SceneResult<Self> {
        Ok(Self {
            host,
            geometry: geometry.validated()?,
            sed,
            points: None,
        })
    }

    /// Fix the number of chunks instead of deriving it from the ring circumference
    pub fn with_points(mut self, points: usize) -> SceneResult<Self> {
        if points == 0 || points > MAX_RING_POINTS {
            return Err(SceneError::InvalidGeometry(format!(
                "ring must be split into 1 to {MAX_RING_POINTS} chunks, got {points}"
            )));
        }
        self.points = Some(points);
        Ok(self)
    }
}

/// A flat circular blackbody source at an arbitrary offset, e.g. a background galaxy
/// or a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    /// X offset in arcsec
    pub x: f64,
    /// Y offset in arcsec
    pub y: f64,
    /// Diameter in arcsec
    pub size: f64,
    /// Flux in mJy at the SED normalisation wavelength
    pub flux_mjy: f64,
    pub sed: BlackbodySed,
    pub name: String,
}

impl Dot {
    pub fn new(x: f64, y: f64, size: f64, flux_mjy: f64, sed: BlackbodySed) -> SceneResult<Self> {
        Ok(Self {
            x: require_finite("x offset", x)?,
            y: require_finite("y offset", y)?,
            size: require_non_negative("size", size)?,
            flux_mjy: require_non_negative("flux", flux_mjy)?,
            sed,
            name: "dot".to_string(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// One element of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneObject {
    Star(Star),
    Ring(Ring),
    Dot(Dot),
}

impl SceneObject {
    pub fn as_star(&self) -> Option<&Star> {
        match self {
            SceneObject::Star(star) => Some(star),
            _ => None,
        }
    }

    pub fn as_ring(&self) -> Option<&Ring> {
        match self {
            SceneObject::Ring(ring) => Some(ring),
            _ => None,
        }
    }

    /// Blackbody SED and flux of components whose spectrum this crate can evaluate
    pub fn blackbody(&self) -> Option<(BlackbodySed, f64)> {
        match self {
            SceneObject::Star(_) => None,
            SceneObject::Ring(ring) => Some((ring.sed, ring.geometry.flux_mjy)),
            SceneObject::Dot(dot) => Some((dot.sed, dot.flux_mjy)),
        }
    }

    /// Scale the flux of a blackbody component; stars are left unchanged
    pub fn scale_flux(&mut self, factor: f64) {
        match self {
            SceneObject::Star(_) => {}
            SceneObject::Ring(ring) => ring.geometry.flux_mjy *= factor,
            SceneObject::Dot(dot) => dot.flux_mjy *= factor,
        }
    }
}
