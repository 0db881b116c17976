//! Scene visualisation through pluggable rendering backends.
//!
//! [`plot_disk_scene`] discretises a scene exactly as the pandeia export does
//! and hands the resulting [`Footprint`]s to a [`RenderBackend`]. Backends only
//! see footprints, never the scene, so a plot always shows what the simulator
//! would receive.

pub mod ascii;
pub mod mock;
pub mod plot;

use std::fmt;
use std::path::PathBuf;

use log::{info, warn};

use crate::config::ExportConfig;
use crate::error::{SceneError, SceneResult};
use crate::pandeia::{to_pandeia_sources, PandeiaSource};
use crate::scene::Scene;

pub use ascii::AsciiBackend;
pub use mock::MockBackend;
pub use plot::PlottersBackend;

/// What a footprint stands for on the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FootprintKind {
    /// Point source, drawn as a marker
    Star { magnitude: f64 },
    /// Flat elliptical source
    Flat,
}

/// Backend-facing geometry of one simulator source, offsets in arcsec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub kind: FootprintKind,
    pub x: f64,
    pub y: f64,
    /// Full length of the major axis
    pub major: f64,
    /// Full length of the minor axis
    pub minor: f64,
    /// Major axis angle, degrees counter-clockwise from +x
    pub orientation_deg: f64,
    /// Flux in mJy; zero for stars
    pub flux_mjy: f64,
}

impl Footprint {
    pub fn from_source(source: &PandeiaSource) -> Self {
        let kind = if source.is_point() {
            FootprintKind::Star {
                magnitude: source.spectrum.normalization.norm_flux,
            }
        } else {
            FootprintKind::Flat
        };
        let flux_mjy = match kind {
            FootprintKind::Star { .. } => 0.0,
            FootprintKind::Flat => source.spectrum.normalization.norm_flux,
        };
        Self {
            kind,
            x: source.position.x_offset,
            y: source.position.y_offset,
            major: source.shape.major.unwrap_or(0.0),
            minor: source.shape.minor.unwrap_or(0.0),
            orientation_deg: source.shape.orientation.unwrap_or(0.0),
            flux_mjy,
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self.kind, FootprintKind::Star { .. })
    }

    /// Flux per unit ellipse axis product, 0 for stars and zero-area sources
    pub fn surface_brightness(&self) -> f64 {
        let area = self.major * self.minor;
        if self.is_star() || area <= 0.0 {
            0.0
        } else {
            self.flux_mjy / area
        }
    }
}

/// Half-width of a square view that contains every flat footprint.
///
/// Falls back to 1 arcsec when nothing extends away from the origin, e.g. a
/// scene holding only a star.
pub fn scene_extent(footprints: &[Footprint]) -> f64 {
    let extent = footprints
        .iter()
        .filter(|f| !f.is_star())
        .map(|f| f.x.hypot(f.y) + 0.5 * f.major)
        .fold(0.0f64, f64::max);
    if extent > 0.0 && extent.is_finite() {
        extent
    } else {
        warn!("Scene has no extended sources, using a 1 arcsec field");
        1.0
    }
}

/// Output produced by a backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderArtifact {
    /// Image written to disk
    File(PathBuf),
    /// Text rendered in memory
    Text(String),
}

impl fmt::Display for RenderArtifact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderArtifact::File(path) => write!(f, "{}", path.display()),
            RenderArtifact::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Something that can draw scene footprints.
pub trait RenderBackend: Send + Sync {
    /// Short identifier used in logs and handles
    fn name(&self) -> &str;

    /// Check the backend can produce output before any work is done
    ///
    /// # Errors
    /// `BackendUnavailable` when the backend cannot be reached
    fn probe(&self) -> SceneResult<()>;

    /// Draw the footprints
    fn render(&self, footprints: &[Footprint]) -> SceneResult<RenderArtifact>;
}

/// Result of a successful plot.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderHandle {
    /// Name of the backend that drew the scene
    pub backend: String,
    pub artifact: RenderArtifact,
    /// Number of simulator sources drawn
    pub components: usize,
}

/// Discretise a scene into footprints
pub fn scene_footprints(scene: &Scene) -> SceneResult<Vec<Footprint>> {
    let sources = to_pandeia_sources(scene, &ExportConfig::default())?;
    Ok(sources.iter().map(Footprint::from_source).collect())
}

/// Plot a scene with the given backend.
///
/// # Errors
/// * `EmptyScene` if the scene has no objects
/// * `BackendUnavailable` if the backend probe fails
/// * `InvalidGeometry` if a ring cannot be discretised
/// * `Render` or `Io` if drawing fails
pub fn plot_disk_scene(scene: &Scene, backend: &dyn RenderBackend) -> SceneResult<RenderHandle> {
    if scene.is_empty() {
        return Err(SceneError::EmptyScene);
    }

    backend.probe().map_err(|e| match e {
        SceneError::BackendUnavailable(_) => e,
        other => SceneError::BackendUnavailable(format!("{}: {other}", backend.name())),
    })?;

    let footprints = scene_footprints(scene)?;
    let artifact = backend.render(&footprints)?;

    if let RenderArtifact::File(path) = &artifact {
        info!(
            "{} rendered {} components to {}",
            backend.name(),
            footprints.len(),
            path.display()
        );
    }

    Ok(RenderHandle {
        backend: backend.name().to_string(),
        artifact,
        components: footprints.len(),
    })
}
