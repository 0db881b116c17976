//! Summed spectra and flux normalisation of blackbody scene components.
//!
//! Rings and dots carry a blackbody SED normalised to a flux at one
//! wavelength, so their spectrum anywhere is `F · B_ν(λ,T) / B_ν(λ_norm,T)`.
//! Stars use PHOENIX model atmospheres held by the external simulator and are
//! skipped here.

use log::debug;
use ndarray::Array1;

use super::planck::planck_ratio;
use crate::error::{SceneError, SceneResult};
use crate::objects::BlackbodySed;
use crate::scene::Scene;

/// Lower edge of the default wavelength grid, microns
pub const DEFAULT_MIN_WAVE_UM: f64 = 5.0;

/// Upper edge of the default wavelength grid, microns
pub const DEFAULT_MAX_WAVE_UM: f64 = 30.0;

/// Number of samples in the default wavelength grid
pub const DEFAULT_WAVE_SAMPLES: usize = 100;

/// Flux of the blackbody components of a scene on a wavelength grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpectrum {
    /// Wavelengths in microns
    pub wavelengths_um: Array1<f64>,
    /// Summed flux in mJy at each wavelength
    pub flux_mjy: Array1<f64>,
}

/// Default mid-infrared wavelength grid, 5-30 µm
pub fn default_wavelengths() -> Array1<f64> {
    Array1::linspace(DEFAULT_MIN_WAVE_UM, DEFAULT_MAX_WAVE_UM, DEFAULT_WAVE_SAMPLES)
}

fn component_flux(sed: &BlackbodySed, flux_mjy: f64, wavelength_um: f64) -> f64 {
    flux_mjy * planck_ratio(wavelength_um, sed.norm_wave_um, sed.temperature_k)
}

fn blackbody_components(scene: &Scene, first: usize) -> Vec<(BlackbodySed, f64)> {
    scene
        .iter()
        .enumerate()
        .skip(first)
        .filter_map(|(i, obj)| {
            let component = obj.blackbody();
            if component.is_none() {
                debug!("Skipping scene object {i} without a blackbody SED");
            }
            component
        })
        .collect()
}

/// Sum the spectra of the blackbody components from scene index `first` on.
///
/// # Arguments
/// * `scene` - Scene to evaluate
/// * `first` - Index of the first scene object included
/// * `wavelengths_um` - Wavelength grid in microns, [`default_wavelengths`] if `None`
pub fn scene_spectrum(
    scene: &Scene,
    first: usize,
    wavelengths_um: Option<Array1<f64>>,
) -> SceneSpectrum {
    let wavelengths_um = wavelengths_um.unwrap_or_else(default_wavelengths);
    let components = blackbody_components(scene, first);

    let flux_mjy = wavelengths_um.mapv(|w| {
        components
            .iter()
            .map(|(sed, flux)| component_flux(sed, *flux, w))
            .sum::<f64>()
    });

    SceneSpectrum {
        wavelengths_um,
        flux_mjy,
    }
}

/// Scale the blackbody components from index `first` so that their summed
/// flux at `norm_wave_um` equals `norm_flux_mjy`.
///
/// The normalisation wavelength defaults to that of the first blackbody
/// component at or after `first`. Stars and objects before `first` are left
/// untouched. Returns a new scene.
///
/// # Errors
/// `Normalization` if there is nothing to scale, the target is invalid, or the
/// current total flux is zero
pub fn normalise_scene(
    scene: &Scene,
    norm_flux_mjy: f64,
    norm_wave_um: Option<f64>,
    first: usize,
) -> SceneResult<Scene> {
    if !(norm_flux_mjy.is_finite() && norm_flux_mjy >= 0.0) {
        return Err(SceneError::Normalization(format!(
            "target flux must be finite and non-negative, got {norm_flux_mjy}"
        )));
    }

    let components = blackbody_components(scene, first);
    let Some((first_sed, _)) = components.first() else {
        return Err(SceneError::Normalization(format!(
            "no blackbody components at or after index {first}"
        )));
    };
    let norm_wave_um = norm_wave_um.unwrap_or(first_sed.norm_wave_um);
    if !(norm_wave_um.is_finite() && norm_wave_um > 0.0) {
        return Err(SceneError::Normalization(format!(
            "normalisation wavelength must be positive, got {norm_wave_um}"
        )));
    }

    let total: f64 = components
        .iter()
        .map(|(sed, flux)| component_flux(sed, *flux, norm_wave_um))
        .sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(SceneError::Normalization(format!(
            "scene flux at {norm_wave_um} um is {total} mJy"
        )));
    }

    let factor = norm_flux_mjy / total;
    debug!("Scaling blackbody components by {factor:.4e} to {norm_flux_mjy} mJy at {norm_wave_um} um");

    let mut scaled = scene.clone();
    for obj in scaled.objects_mut().iter_mut().skip(first) {
        obj.scale_flux(factor);
    }
    Ok(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Dot, Ring, RingGeometry};
    use crate::scene::{add_dot, add_ring, create_star};
    use approx::assert_relative_eq;

    fn disk_scene() -> Scene {
        let scene = create_star("a5v", 5.0).unwrap();
        let scene = add_ring(scene, 5.0, 20.0, 10.0, 0.0, 30.0, 0.0, 0.0).unwrap();
        let dot = Dot::new(3.0, 4.0, 0.5, 2.0, BlackbodySed::new(200.0, 15.0).unwrap()).unwrap();
        add_dot(scene, dot)
    }

    #[test]
    fn test_default_grid() {
        let grid = default_wavelengths();
        assert_eq!(grid.len(), 100);
        assert_relative_eq!(grid[0], 5.0);
        assert_relative_eq!(grid[99], 30.0);
    }

    #[test]
    fn test_spectrum_matches_flux_at_normalisation_wavelength() {
        let scene = create_star("a5v", 5.0).unwrap();
        let scene = add_ring(scene, 5.0, 20.0, 10.0, 0.0, 30.0, 0.0, 0.0).unwrap();
        let norm_wave = BlackbodySed::default().norm_wave_um;

        let spectrum = scene_spectrum(&scene, 0, Some(Array1::from(vec![norm_wave])));
        assert_relative_eq!(spectrum.flux_mjy[0], 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spectrum_sums_components_and_honours_first() {
        let scene = disk_scene();
        let grid = Array1::from(vec![10.0, 15.0, 24.0]);

        let all = scene_spectrum(&scene, 0, Some(grid.clone()));
        let from_ring = scene_spectrum(&scene, 1, Some(grid.clone()));
        let dot_only = scene_spectrum(&scene, 2, Some(grid.clone()));

        // The star contributes nothing, the dot is normalised at 15 um
        assert_eq!(all, from_ring);
        assert_relative_eq!(dot_only.flux_mjy[1], 2.0, epsilon = 1e-9);
        for i in 0..grid.len() {
            assert!(all.flux_mjy[i] > dot_only.flux_mjy[i]);
        }
    }

    #[test]
    fn test_star_only_scene_has_zero_spectrum() {
        let scene = create_star("g2v", 4.0).unwrap();
        let spectrum = scene_spectrum(&scene, 0, None);
        assert!(spectrum.flux_mjy.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_normalise_scene() {
        let scene = disk_scene();
        let normalised = normalise_scene(&scene, 50.0, Some(24.0), 1).unwrap();

        let spectrum = scene_spectrum(&normalised, 1, Some(Array1::from(vec![24.0])));
        assert_relative_eq!(spectrum.flux_mjy[0], 50.0, epsilon = 1e-9);

        // Star untouched, input untouched
        assert_eq!(normalised.get(0), scene.get(0));
        assert_eq!(scene.rings().next().unwrap().geometry.flux_mjy, 10.0);
    }

    #[test]
    fn test_normalise_defaults_to_first_component_wavelength() {
        let scene = disk_scene();
        let normalised = normalise_scene(&scene, 5.0, None, 0).unwrap();
        let spectrum = scene_spectrum(&normalised, 0, Some(Array1::from(vec![24.0])));
        assert_relative_eq!(spectrum.flux_mjy[0], 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_normalise_skips_objects_before_first() {
        let scene = disk_scene();
        let normalised = normalise_scene(&scene, 1.0, Some(15.0), 2).unwrap();
        assert_eq!(
            normalised.rings().next().unwrap().geometry.flux_mjy,
            scene.rings().next().unwrap().geometry.flux_mjy
        );
    }

    #[test]
    fn test_normalise_errors() {
        let star_only = create_star("g2v", 4.0).unwrap();
        assert!(matches!(
            normalise_scene(&star_only, 1.0, None, 0),
            Err(SceneError::Normalization(_))
        ));

        let geometry = RingGeometry {
            inner_radius: 1.0,
            outer_radius: 2.0,
            flux_mjy: 0.0,
            position_angle: 0.0,
            inclination: 0.0,
            width: 0.0,
            offset: 0.0,
        };
        let dark = create_star("g2v", 4.0)
            .unwrap()
            .with_ring(Ring::new(0, geometry, BlackbodySed::default()).unwrap())
            .unwrap();
        assert!(matches!(
            normalise_scene(&dark, 1.0, None, 0),
            Err(SceneError::Normalization(_))
        ));

        assert!(normalise_scene(&disk_scene(), f64::NAN, None, 0).is_err());
    }
}
