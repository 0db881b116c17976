//! ASCII density map visualization.
//!
//! Points are binned into a `width × height` grid in normalized \[0,1\]
//! coordinates (x left to right, y bottom to top), each adding its weight to
//! the cell it falls in. Cell totals are scaled linearly onto a character
//! progression:
//!
//! ```text
//! char_index = round((total / max_total) × (num_chars - 1))
//! ```
//!
//! Markers are drawn on top of the density grid and are used to pin single
//! objects, such as a star, that would otherwise be lost among the binned
//! points. Out-of-range coordinates are clamped to the grid edges.

use std::fmt::Write;

use crate::{Result, VizError};

/// 2D position in normalized coordinate space.
///
/// # Coordinate Convention
/// - **X-axis**: 0.0 (left) to 1.0 (right)
/// - **Y-axis**: 0.0 (bottom) to 1.0 (top)
/// - Values outside \[0,1\] are clamped to the grid boundaries
pub trait PositionData {
    fn x(&self) -> f64;

    fn y(&self) -> f64;

    /// Amount added to the cell containing this point
    fn weight(&self) -> f64 {
        1.0
    }
}

/// Simple weighted point in normalized coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub weight: f64,
}

impl Point {
    /// Point with unit weight
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, weight: 1.0 }
    }

    pub fn weighted(x: f64, y: f64, weight: f64) -> Self {
        Self { x, y, weight }
    }
}

impl PositionData for Point {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Single character drawn over the density grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub symbol: char,
}

impl Marker {
    pub fn new(x: f64, y: f64, symbol: char) -> Self {
        Self { x, y, symbol }
    }
}

/// Configuration for ASCII density map visualization.
///
/// # Examples
/// ```rust
/// use viz::density_map::DensityMapConfig;
///
/// let custom = DensityMapConfig {
///     title: Some("Disk scene"),
///     x_label: Some("x offset / arcsec"),
///     y_top_label: Some("+10\""),
///     y_bottom_label: Some("-10\""),
///     density_chars: " .:*#@",
///     width: 120,
///     height: 40,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct DensityMapConfig<'a> {
    /// Optional title, underlined with equal signs
    pub title: Option<&'a str>,

    /// Optional label below the grid describing the horizontal axis
    pub x_label: Option<&'a str>,

    /// Optional label for the top edge (y = 1.0)
    pub y_top_label: Option<&'a str>,

    /// Optional label for the bottom edge (y = 0.0)
    pub y_bottom_label: Option<&'a str>,

    /// Character progression from lowest to highest density.
    ///
    /// Must contain at least one character.
    /// - Basic: `" .:#"` (4 levels)
    /// - Smooth: `" .'*oO#"` (7 levels)
    pub density_chars: &'a str,

    /// Objects drawn over the grid, last one wins where they overlap
    pub markers: &'a [Marker],

    /// Width of the grid in character columns
    pub width: usize,

    /// Height of the grid in character rows
    pub height: usize,
}

impl Default for DensityMapConfig<'_> {
    fn default() -> Self {
        Self {
            title: None,
            x_label: None,
            y_top_label: None,
            y_bottom_label: None,
            density_chars: " .:#",
            markers: &[],
            width: 80,
            height: 24,
        }
    }
}

fn cell(x: f64, y: f64, width: usize, height: usize) -> (usize, usize) {
    // Negative and NaN casts saturate to 0
    let col = ((x * width as f64) as usize).min(width - 1);
    let row = (((1.0 - y) * height as f64) as usize).min(height - 1);
    (row, col)
}

/// Generate an ASCII density map from weighted point data.
///
/// # Arguments
/// * `points` - Collection of objects implementing PositionData trait
/// * `config` - Visualization configuration
///
/// # Returns
/// * `Ok(String)` - Complete ASCII density map with labels and legend
/// * `Err(VizError)` - Empty character set or zero-sized grid
///
/// # Examples
/// ```rust
/// use viz::density_map::{Point, DensityMapConfig, create_density_map};
///
/// let points = vec![
///     Point::weighted(0.2, 0.3, 5.0),
///     Point::new(0.8, 0.7),
/// ];
///
/// let config = DensityMapConfig {
///     density_chars: " .o*#@",
///     width: 50,
///     height: 25,
///     ..Default::default()
/// };
///
/// let map = create_density_map(&points, &config)?;
/// println!("{}", map);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn create_density_map<T: PositionData>(
    points: &[T],
    config: &DensityMapConfig,
) -> Result<String> {
    let chars: Vec<char> = config.density_chars.chars().collect();
    if chars.is_empty() {
        return Err(VizError::ConfigError(
            "Empty character set for density map".to_string(),
        ));
    }
    if config.width == 0 || config.height == 0 {
        return Err(VizError::ConfigError(format!(
            "Density map grid must be non-empty, got {}x{}",
            config.width, config.height
        )));
    }

    // Accumulate weights in each cell
    let mut grid = vec![vec![0.0f64; config.width]; config.height];
    for point in points {
        let weight = point.weight();
        if !weight.is_finite() || weight <= 0.0 {
            continue;
        }
        let (row, col) = cell(point.x(), point.y(), config.width, config.height);
        grid[row][col] += weight;
    }
    let max_total = grid.iter().flatten().copied().fold(0.0f64, f64::max);

    let mut canvas: Vec<Vec<char>> = grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|&total| {
                    let idx = if max_total > 0.0 {
                        ((total / max_total) * (chars.len() - 1) as f64).round() as usize
                    } else {
                        0
                    };
                    chars[idx.min(chars.len() - 1)]
                })
                .collect()
        })
        .collect();

    for marker in config.markers {
        let (row, col) = cell(marker.x, marker.y, config.width, config.height);
        canvas[row][col] = marker.symbol;
    }

    let mut output = String::new();

    if let Some(title) = config.title {
        writeln!(output, "{title}")?;
        writeln!(output, "{}", "=".repeat(title.chars().count()))?;
    }

    if let Some(y_top) = config.y_top_label {
        writeln!(output, "{y_top}")?;
    }

    writeln!(output, "  {}", "-".repeat(config.width + 2))?;
    for row in &canvas {
        writeln!(output, "  |{}|", row.iter().collect::<String>())?;
    }
    writeln!(output, "  {}", "-".repeat(config.width + 2))?;

    if let Some(y_bottom) = config.y_bottom_label {
        writeln!(output, "{y_bottom}")?;
    }

    if let Some(x_label) = config.x_label {
        writeln!(output, "  {x_label}")?;
    }

    writeln!(
        output,
        "  Legend: '{}' = empty, '{}' = highest density ({max_total:.3})",
        chars[0],
        chars[chars.len() - 1],
    )?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_rows(map: &str) -> Vec<&str> {
        map.lines().filter(|l| l.starts_with("  |")).collect()
    }

    fn small_config() -> DensityMapConfig<'static> {
        DensityMapConfig {
            width: 10,
            height: 5,
            density_chars: " .:#",
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_density_map() {
        let points: Vec<Point> = vec![];
        let map = create_density_map(&points, &small_config()).unwrap();
        assert!(map.contains("|          |"));
        assert!(map.contains("Legend: ' ' = empty, '#' = highest density"));
    }

    #[test]
    fn test_single_point() {
        let points = vec![Point::new(0.5, 0.5)];
        let map = create_density_map(&points, &small_config()).unwrap();
        let hashes: usize = grid_rows(&map).iter().map(|r| r.matches('#').count()).sum();
        assert_eq!(hashes, 1);
    }

    #[test]
    fn test_weights_decide_densest_cell() {
        // Three light points in one cell lose to one heavy point elsewhere
        let points = vec![
            Point::weighted(0.05, 0.95, 1.0),
            Point::weighted(0.05, 0.95, 1.0),
            Point::weighted(0.05, 0.95, 1.0),
            Point::weighted(0.95, 0.05, 12.0),
        ];
        let map = create_density_map(&points, &small_config()).unwrap();
        let rows = grid_rows(&map);
        assert_eq!(rows.len(), 5);
        assert!(rows[0].starts_with("  |."));
        assert!(rows[4].ends_with("#|"));
    }

    #[test]
    fn test_non_positive_weights_ignored() {
        let points = vec![Point::weighted(0.5, 0.5, 0.0), Point::weighted(0.5, 0.5, f64::NAN)];
        let map = create_density_map(&points, &small_config()).unwrap();
        assert!(grid_rows(&map).iter().all(|r| !r.contains('#')));
    }

    #[test]
    fn test_markers_overlay_grid() {
        let points = vec![Point::new(0.5, 0.5)];
        let markers = [Marker::new(0.5, 0.5, '*'), Marker::new(2.0, -1.0, '+')];
        let config = DensityMapConfig {
            markers: &markers,
            ..small_config()
        };
        let map = create_density_map(&points, &config).unwrap();
        let rows = grid_rows(&map);
        assert!(rows[2].contains('*'));
        assert!(rows.iter().all(|r| !r.contains('#')));
        // Clamped to the bottom right corner
        assert!(rows[4].ends_with("+|"));
    }

    #[test]
    fn test_labels() {
        let config = DensityMapConfig {
            title: Some("Scene"),
            x_label: Some("x offset / arcsec"),
            y_top_label: Some("top"),
            y_bottom_label: Some("bottom"),
            ..small_config()
        };
        let map = create_density_map(&[Point::new(0.1, 0.1)], &config).unwrap();
        assert!(map.starts_with("Scene\n=====\ntop\n"));
        assert!(map.contains("bottom\n  x offset / arcsec\n"));
    }

    #[test]
    fn test_invalid_config() {
        let points = vec![Point::new(0.5, 0.5)];
        let no_chars = DensityMapConfig {
            density_chars: "",
            ..small_config()
        };
        assert!(matches!(
            create_density_map(&points, &no_chars),
            Err(VizError::ConfigError(_))
        ));

        let no_grid = DensityMapConfig {
            width: 0,
            ..small_config()
        };
        assert!(create_density_map(&points, &no_grid).is_err());
    }
}
