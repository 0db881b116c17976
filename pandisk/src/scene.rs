//! Scene composition: ordered collections of stars, rings and dots.
//!
//! A [`Scene`] is the input handed to the external exposure simulator. Scenes
//! follow value semantics: the factory functions consume a scene and return the
//! extended one, so a pipeline reads as a chain of reassignments:
//!
//! ```
//! use pandisk::{add_ring, create_star, rotate_scene};
//!
//! let targ = create_star("a5v", 5.0)?;
//! let targ = add_ring(targ, 5.0, 20.0, 10.0, 0.0, 30.0, 0.0, 0.0)?;
//! let targ = rotate_scene(&targ, -30.0)?;
//! assert_eq!(targ.len(), 2);
//! # Ok::<(), pandisk::SceneError>(())
//! ```

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::objects::{BlackbodySed, Dot, Ring, RingGeometry, SceneObject, Star};

/// Ordered sequence of scene objects; insertion order is significant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SceneObject> {
        self.objects.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    /// Index of the first star, the default host for rings
    pub fn first_star(&self) -> Option<usize> {
        self.objects.iter().position(|obj| obj.as_star().is_some())
    }

    pub fn stars(&self) -> impl Iterator<Item = &Star> {
        self.objects.iter().filter_map(SceneObject::as_star)
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.objects.iter().filter_map(SceneObject::as_ring)
    }

    /// Append a star
    pub fn with_star(mut self, star: Star) -> Self {
        self.objects.push(SceneObject::Star(star));
        self
    }

    /// Append a ring, checking that its host index holds a star
    ///
    /// # Errors
    /// * `EmptyScene` if the scene has no star at all
    /// * `UnknownHost` if `ring.host` is not the index of a star
    pub fn with_ring(mut self, ring: Ring) -> SceneResult<Self> {
        if self.first_star().is_none() {
            return Err(SceneError::EmptyScene);
        }
        if self.get(ring.host).and_then(SceneObject::as_star).is_none() {
            return Err(SceneError::UnknownHost(ring.host));
        }
        self.objects.push(SceneObject::Ring(ring));
        Ok(self)
    }

    /// Append a blackbody dot
    pub fn with_dot(mut self, dot: Dot) -> Self {
        self.objects.push(SceneObject::Dot(dot));
        self
    }

    pub(crate) fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    /// Save the scene as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> SceneResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a scene saved with [`Scene::save_to_file`]
    ///
    /// Every object is rebuilt through its validating constructor, so a file
    /// edited by hand is held to the same rules as a scene built in code.
    pub fn load_from_file(path: &Path) -> SceneResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let loaded: Scene = serde_json::from_str(&json)?;

        let mut scene = Scene::new();
        for obj in loaded.objects {
            scene = match obj {
                SceneObject::Star(star) => scene.with_star(star),
                SceneObject::Ring(ring) => {
                    let sed = BlackbodySed::new(ring.sed.temperature_k, ring.sed.norm_wave_um)?;
                    let mut checked = Ring::new(ring.host, ring.geometry, sed)?;
                    if let Some(points) = ring.points {
                        checked = checked.with_points(points)?;
                    }
                    scene.with_ring(checked)?
                }
                SceneObject::Dot(dot) => {
                    let sed = BlackbodySed::new(dot.sed.temperature_k, dot.sed.norm_wave_um)?;
                    let checked =
                        Dot::new(dot.x, dot.y, dot.size, dot.flux_mjy, sed)?.with_name(dot.name);
                    scene.with_dot(checked)
                }
            };
        }
        Ok(scene)
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a SceneObject;
    type IntoIter = std::slice::Iter<'a, SceneObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

/// Create a scene holding a single star.
///
/// # Arguments
/// * `spectral_type` - Stellar model key such as `"a5v"` (case-insensitive)
/// * `magnitude` - Apparent Vega magnitude in the Johnson V band
///
/// # Errors
/// * `InvalidSpectralType` if the token is not in the stellar model vocabulary
/// * `InvalidMagnitude` if the magnitude is not finite
pub fn create_star(spectral_type: &str, magnitude: f64) -> SceneResult<Scene> {
    let star = Star::new(spectral_type, magnitude)?;
    Ok(Scene::new().with_star(star))
}

/// Append a ring around the first star of a scene.
///
/// The ring gets the default blackbody SED; build a [`Ring`] and use
/// [`Scene::with_ring`] to choose another one.
///
/// # Arguments
/// * `inner_radius`, `outer_radius` - Ring edges in arcsec
/// * `flux_scale` - Total ring flux in mJy
/// * `position_angle` - Degrees east of north, any sign
/// * `inclination` - Degrees, 0 face-on to 90 edge-on
/// * `width_param` - Chunk size in arcsec used when exporting, 0 for the radial width
/// * `offset_param` - Stellocentric offset of the ring centre along the major axis, arcsec
///
/// # Errors
/// * `EmptyScene` if the scene holds no star
/// * `InvalidGeometry` if `inner_radius > outer_radius`, a radius is negative, or
///   another parameter is out of range
#[allow(clippy::too_many_arguments)]
pub fn add_ring(
    scene: Scene,
    inner_radius: f64,
    outer_radius: f64,
    flux_scale: f64,
    position_angle: f64,
    inclination: f64,
    width_param: f64,
    offset_param: f64,
) -> SceneResult<Scene> {
    let host = scene.first_star().ok_or(SceneError::EmptyScene)?;
    let geometry = RingGeometry {
        inner_radius,
        outer_radius,
        flux_mjy: flux_scale,
        position_angle,
        inclination,
        width: width_param,
        offset: offset_param,
    };
    let ring = Ring::new(host, geometry, BlackbodySed::default())?;
    debug!(
        "Adding ring r={}..{}\" around scene object {}",
        inner_radius, outer_radius, host
    );
    scene.with_ring(ring)
}

/// Append a blackbody dot.
pub fn add_dot(scene: Scene, dot: Dot) -> Scene {
    scene.with_dot(dot)
}

/// One annulus of a radial brightness profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annulus {
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Total annulus flux in mJy
    pub flux_mjy: f64,
    pub temperature_k: f64,
}

/// Append a radial profile as a set of concentric rings sharing one orientation.
///
/// Each annulus becomes a ring around the first star, normalised at
/// `norm_wave_um`. `points` fixes the chunk count of every ring; `None` derives
/// it from each ring's circumference. Nothing is appended unless every annulus
/// is valid.
pub fn add_radial_profile(
    scene: Scene,
    annuli: &[Annulus],
    norm_wave_um: f64,
    position_angle: f64,
    inclination: f64,
    points: Option<usize>,
) -> SceneResult<Scene> {
    let host = scene.first_star().ok_or(SceneError::EmptyScene)?;

    let rings = annuli
        .iter()
        .map(|annulus| {
            let geometry = RingGeometry {
                inner_radius: annulus.inner_radius,
                outer_radius: annulus.outer_radius,
                flux_mjy: annulus.flux_mjy,
                position_angle,
                inclination,
                width: 0.0,
                offset: 0.0,
            };
            let ring = Ring::new(
                host,
                geometry,
                BlackbodySed::new(annulus.temperature_k, norm_wave_um)?,
            )?;
            match points {
                Some(n) => ring.with_points(n),
                None => Ok(ring),
            }
        })
        .collect::<SceneResult<Vec<_>>>()?;

    rings.into_iter().try_fold(scene, Scene::with_ring)
}
