//! Type-safe physical units for scene geometry and spectra
//!
//! Uses the `uom` crate so that on-sky angles, wavelengths and temperatures
//! cannot be mixed up at the function boundaries of the photometry and
//! discretisation code. Scene descriptors themselves store plain `f64`
//! fields in documented units so their JSON stays readable.

use uom::si::angle::{degree, radian, second};
use uom::si::f64::*;
use uom::si::length::micrometer;
use uom::si::thermodynamic_temperature::kelvin;

/// Type alias for temperature with convenient methods
pub type Temperature = ThermodynamicTemperature;

/// Type alias for wavelengths
pub type Wavelength = Length;

/// Plane angle (position angles, inclinations, on-sky separations)
pub type Angle = uom::si::f64::Angle;

/// Extension trait for angle conversions used on the sky
pub trait AngleExt {
    /// Create angle from degrees
    fn from_degrees(deg: f64) -> Self;

    /// Get angle in degrees
    fn as_degrees(&self) -> f64;

    /// Create angle from arcseconds
    fn from_arcsec(arcsec: f64) -> Self;

    /// Get angle in arcseconds
    fn as_arcsec(&self) -> f64;

    /// Get angle in radians
    fn as_radians(&self) -> f64;
}

/// Extension trait for wavelength conversions
pub trait WavelengthExt {
    /// Create wavelength from micrometers
    fn from_micrometers(um: f64) -> Self;

    /// Get wavelength in micrometers
    fn as_micrometers(&self) -> f64;

    /// Get wavelength in centimeters (CGS photometry)
    fn as_centimeters(&self) -> f64;
}

/// Extension trait for temperature conversions
pub trait TemperatureExt {
    /// Create temperature from Kelvin
    fn from_kelvin(kelvin: f64) -> Self;

    /// Get temperature in Kelvin
    fn as_kelvin(&self) -> f64;
}

impl AngleExt for Angle {
    fn from_degrees(deg: f64) -> Self {
        Angle::new::<degree>(deg)
    }

    fn as_degrees(&self) -> f64 {
        self.get::<degree>()
    }

    fn from_arcsec(arcsec: f64) -> Self {
        Angle::new::<second>(arcsec)
    }

    fn as_arcsec(&self) -> f64 {
        self.get::<second>()
    }

    fn as_radians(&self) -> f64 {
        self.get::<radian>()
    }
}

impl WavelengthExt for Wavelength {
    fn from_micrometers(um: f64) -> Self {
        Length::new::<micrometer>(um)
    }

    fn as_micrometers(&self) -> f64 {
        self.get::<micrometer>()
    }

    fn as_centimeters(&self) -> f64 {
        self.get::<uom::si::length::centimeter>()
    }
}

impl TemperatureExt for Temperature {
    fn from_kelvin(kelvin_value: f64) -> Self {
        Temperature::new::<kelvin>(kelvin_value)
    }

    fn as_kelvin(&self) -> f64 {
        self.get::<kelvin>()
    }
}

/// Wrap an angle in degrees into [0, 360)
pub fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversions() {
        let pa = Angle::from_degrees(90.0);
        assert_relative_eq!(pa.as_radians(), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(pa.as_arcsec(), 324_000.0, epsilon = 1e-6);

        let sep = Angle::from_arcsec(3600.0);
        assert_relative_eq!(sep.as_degrees(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wavelength_conversions() {
        let w = Wavelength::from_micrometers(24.0);
        assert_relative_eq!(w.as_micrometers(), 24.0, epsilon = 1e-12);
        assert_relative_eq!(w.as_centimeters(), 24.0e-4, epsilon = 1e-15);
    }

    #[test]
    fn test_temperature_round_trip() {
        let t = Temperature::from_kelvin(80.0);
        assert_relative_eq!(t.as_kelvin(), 80.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_relative_eq!(wrap_degrees(-30.0), 330.0);
        assert_relative_eq!(wrap_degrees(725.0), 5.0, epsilon = 1e-12);
        assert!(wrap_degrees(-1e-20) < 360.0);
    }
}
