//! Terminal preview of a scene.

use viz::density_map::{create_density_map, DensityMapConfig, Marker, Point};

use super::{scene_extent, Footprint, RenderArtifact, RenderBackend};
use crate::error::{SceneError, SceneResult};

/// Flux-weighted ASCII density map of the flat sources, stars marked with `*`.
#[derive(Debug, Clone)]
pub struct AsciiBackend {
    pub width: usize,
    pub height: usize,
}

impl AsciiBackend {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl Default for AsciiBackend {
    fn default() -> Self {
        Self::new(60, 30)
    }
}

impl RenderBackend for AsciiBackend {
    fn name(&self) -> &str {
        "ascii"
    }

    fn probe(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::BackendUnavailable(format!(
                "ASCII grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    fn render(&self, footprints: &[Footprint]) -> SceneResult<RenderArtifact> {
        let extent = scene_extent(footprints);
        let normalise = |v: f64| 0.5 + 0.5 * v / extent;

        let points: Vec<Point> = footprints
            .iter()
            .filter(|f| !f.is_star())
            .map(|f| Point::weighted(normalise(f.x), normalise(f.y), f.flux_mjy))
            .collect();
        let markers: Vec<Marker> = footprints
            .iter()
            .filter(|f| f.is_star())
            .map(|f| Marker::new(normalise(f.x), normalise(f.y), '*'))
            .collect();

        let y_top = format!("y = +{extent:.2} arcsec");
        let y_bottom = format!("y = -{extent:.2} arcsec");
        let x_label = format!("x offset / arcsec, -{extent:.2} to +{extent:.2}");
        let config = DensityMapConfig {
            title: Some("Disk scene"),
            x_label: Some(x_label.as_str()),
            y_top_label: Some(y_top.as_str()),
            y_bottom_label: Some(y_bottom.as_str()),
            density_chars: " .:-=+#%@",
            markers: &markers,
            width: self.width,
            height: self.height,
        };

        let map = create_density_map(&points, &config)
            .map_err(|e| SceneError::Render(e.to_string()))?;
        Ok(RenderArtifact::Text(map))
    }
}
