//! Planck function in CGS units.

use crate::units::{Temperature, TemperatureExt, Wavelength, WavelengthExt};

/// Physical constants in CGS units.
pub struct CGS {}

impl CGS {
    /// Planck's constant, erg s
    pub const PLANCK_CONSTANT: f64 = 6.62607015e-27;

    /// Speed of light in vacuum, cm/s
    pub const SPEED_OF_LIGHT: f64 = 2.99792458e10;

    /// Boltzmann constant, erg/K
    pub const BOLTZMANN_CONSTANT: f64 = 1.380649e-16;

    /// 1 Jansky in erg s⁻¹ cm⁻² Hz⁻¹
    pub const JANSKY_IN_CGS: f64 = 1e-23;
}

/// Blackbody spectral radiance per unit frequency.
///
/// B_ν(T) = (2hν³/c²) / (exp(hν/kT) − 1), in erg s⁻¹ cm⁻² Hz⁻¹ sr⁻¹.
/// Returns 0 for non-positive wavelengths or temperatures, and where the
/// exponential underflows the result to zero.
pub fn planck_bnu(wavelength: Wavelength, temperature: Temperature) -> f64 {
    let wavelength_cm = wavelength.as_centimeters();
    let temperature_k = temperature.as_kelvin();
    if wavelength_cm <= 0.0 || temperature_k <= 0.0 {
        return 0.0;
    }

    let nu = CGS::SPEED_OF_LIGHT / wavelength_cm;
    let exponent = CGS::PLANCK_CONSTANT * nu / (CGS::BOLTZMANN_CONSTANT * temperature_k);
    let numerator = 2.0 * CGS::PLANCK_CONSTANT * nu.powi(3) / CGS::SPEED_OF_LIGHT.powi(2);

    // exp_m1 keeps precision in the Rayleigh-Jeans limit
    numerator / exponent.exp_m1()
}

/// Ratio B_ν(λ, T) / B_ν(λ_norm, T), used to carry a flux given at one
/// wavelength to another.
pub fn planck_ratio(wavelength_um: f64, norm_wave_um: f64, temperature_k: f64) -> f64 {
    let t = Temperature::from_kelvin(temperature_k);
    let reference = planck_bnu(Wavelength::from_micrometers(norm_wave_um), t);
    if reference <= 0.0 || !reference.is_finite() {
        return 0.0;
    }
    planck_bnu(Wavelength::from_micrometers(wavelength_um), t) / reference
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ratio_is_one_at_normalisation_wavelength() {
        assert_relative_eq!(planck_ratio(24.0, 24.0, 70.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wien_peak_in_frequency() {
        // B_nu peaks where h nu / k T ~ 2.821, i.e. lambda_peak ~ 5100 um K / T
        let t = 100.0;
        let peak_um = 5099.6 / t;
        let at_peak = planck_ratio(peak_um, 24.0, t);
        assert!(at_peak > planck_ratio(peak_um * 0.8, 24.0, t));
        assert!(at_peak > planck_ratio(peak_um * 1.2, 24.0, t));
    }

    #[test]
    fn test_rayleigh_jeans_tail() {
        // B_nu ∝ nu² at long wavelengths
        let ratio = planck_ratio(2000.0, 1000.0, 5000.0);
        assert_relative_eq!(ratio, 0.25, epsilon = 1e-3);
    }

    #[test]
    fn test_solar_value() {
        // Sun-like 5778 K blackbody at 500 nm
        let b = planck_bnu(
            Wavelength::from_micrometers(0.5),
            Temperature::from_kelvin(5778.0),
        );
        assert_relative_eq!(b, 2.195e-5, max_relative = 0.01);
    }

    #[test]
    fn test_degenerate_inputs() {
        let t = Temperature::from_kelvin(100.0);
        assert_eq!(planck_bnu(Wavelength::from_micrometers(0.0), t), 0.0);
        assert_eq!(planck_ratio(10.0, 24.0, 0.0), 0.0);
    }
}
