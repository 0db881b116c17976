//! Blackbody photometry for scene components.

pub mod planck;
pub mod spectrum;

pub use planck::{planck_bnu, planck_ratio, CGS};
pub use spectrum::{default_wavelengths, normalise_scene, scene_spectrum, SceneSpectrum};
