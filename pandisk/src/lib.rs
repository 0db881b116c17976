//! Star and circumstellar disk scenes for coronagraphic exposure simulation
//!
//! This crate composes scenes of stars, rings and blackbody dots, rotates
//! them, evaluates their blackbody spectra, and exports them as the source
//! lists an external exposure-time simulator consumes. Scenes can be plotted
//! through pluggable rendering backends.

pub mod config;
pub mod error;
pub mod objects;
pub mod pandeia;
pub mod photometry;
pub mod render;
pub mod scene;
pub mod shared_args;
pub mod spectral;
pub mod transform;
pub mod units;

// Re-exports for easier access
pub use config::{ExportConfig, PlotConfig, SceneConfig};
pub use error::{SceneError, SceneResult};
pub use objects::{BlackbodySed, Dot, Ring, RingGeometry, SceneObject, Star, MAX_RING_POINTS};
pub use pandeia::{to_pandeia_json, to_pandeia_sources, PandeiaSource};
pub use photometry::{normalise_scene, planck_bnu, scene_spectrum, SceneSpectrum};
pub use render::{
    plot_disk_scene, AsciiBackend, Footprint, MockBackend, PlottersBackend, RenderArtifact,
    RenderBackend, RenderHandle,
};
pub use scene::{add_dot, add_radial_profile, add_ring, create_star, Annulus, Scene};
pub use spectral::SpectralType;
pub use transform::rotate_scene;
