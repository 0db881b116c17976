//! PNG and SVG scene plots drawn with plotters.

use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{scene_extent, Footprint, RenderArtifact, RenderBackend};
use crate::error::{SceneError, SceneResult};
use crate::units::{Angle, AngleExt};

/// Vertices used to outline each ellipse
const ELLIPSE_STEPS: usize = 48;

/// Default side length of the square figure in pixels
pub const DEFAULT_SIZE_PX: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ImageFormat {
    Png,
    Svg,
}

fn image_format(path: &Path) -> Option<ImageFormat> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "png" => Some(ImageFormat::Png),
        "svg" => Some(ImageFormat::Svg),
        _ => None,
    }
}

/// Draws flat sources as grey ellipses shaded by surface brightness, darker
/// meaning brighter, and stars as points.
#[derive(Debug, Clone)]
pub struct PlottersBackend {
    output: PathBuf,
    size_px: u32,
}

impl PlottersBackend {
    /// Backend writing to `output`; the extension selects PNG or SVG
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            size_px: DEFAULT_SIZE_PX,
        }
    }

    pub fn with_size(mut self, size_px: u32) -> Self {
        self.size_px = size_px;
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl RenderBackend for PlottersBackend {
    fn name(&self) -> &str {
        "plotters"
    }

    fn probe(&self) -> SceneResult<()> {
        if image_format(&self.output).is_none() {
            return Err(SceneError::BackendUnavailable(format!(
                "cannot write {}: only .png and .svg are supported",
                self.output.display()
            )));
        }
        if self.size_px == 0 {
            return Err(SceneError::BackendUnavailable(
                "figure size must be non-zero".to_string(),
            ));
        }
        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SceneError::BackendUnavailable(format!(
                    "cannot create output directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        Ok(())
    }

    fn render(&self, footprints: &[Footprint]) -> SceneResult<RenderArtifact> {
        let size = (self.size_px, self.size_px);
        let result = match image_format(&self.output) {
            Some(ImageFormat::Png) => draw_scene(
                BitMapBackend::new(&self.output, size).into_drawing_area(),
                footprints,
            )
            .map_err(|e| e.to_string()),
            Some(ImageFormat::Svg) => draw_scene(
                SVGBackend::new(&self.output, size).into_drawing_area(),
                footprints,
            )
            .map_err(|e| e.to_string()),
            None => Err(format!("unsupported output {}", self.output.display())),
        };
        result.map_err(SceneError::Render)?;
        Ok(RenderArtifact::File(self.output.clone()))
    }
}

/// Outline of a footprint's ellipse in plot coordinates
fn ellipse_outline(footprint: &Footprint) -> Vec<(f64, f64)> {
    let (sin_o, cos_o) = Angle::from_degrees(footprint.orientation_deg)
        .as_radians()
        .sin_cos();
    let (a, b) = (0.5 * footprint.major, 0.5 * footprint.minor);

    (0..ELLIPSE_STEPS)
        .map(|k| {
            let (sin_t, cos_t) = (TAU * k as f64 / ELLIPSE_STEPS as f64).sin_cos();
            let (u, v) = (a * cos_t, b * sin_t);
            (
                footprint.x + u * cos_o - v * sin_o,
                footprint.y + u * sin_o + v * cos_o,
            )
        })
        .collect()
}

/// Grey level `(1 - c / c_max) / 1.2` for surface brightness `c`
fn grey_shade(brightness: f64, max_brightness: f64) -> RGBColor {
    let fraction = if max_brightness > 0.0 {
        brightness / max_brightness
    } else {
        0.0
    };
    let level = ((1.0 - fraction) / 1.2).clamp(0.0, 1.0);
    let v = (level * 255.0).round() as u8;
    RGBColor(v, v, v)
}

fn draw_scene<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    footprints: &[Footprint],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let extent = scene_extent(footprints);

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x offset / arcsec")
        .y_desc("y offset / arcsec")
        .axis_desc_style(("sans-serif", 16).into_font())
        .draw()?;

    let max_brightness = footprints
        .iter()
        .map(Footprint::surface_brightness)
        .fold(0.0f64, f64::max);

    chart.draw_series(footprints.iter().filter(|f| !f.is_star()).map(|f| {
        Polygon::new(
            ellipse_outline(f),
            grey_shade(f.surface_brightness(), max_brightness).filled(),
        )
    }))?;

    chart.draw_series(
        footprints
            .iter()
            .filter(|f| f.is_star())
            .map(|f| Circle::new((f.x, f.y), 3, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}
