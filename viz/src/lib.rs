//! ASCII previews of source distributions.
//!
//! Text output works over SSH, embeds in log files and diffs cleanly, which
//! makes it the quick-look companion to the image backends of `pandisk`.
//!
//! # Example
//! ```rust
//! use viz::density_map::{create_density_map, DensityMapConfig, Marker, Point};
//!
//! let ring: Vec<Point> = (0..36)
//!     .map(|k| {
//!         let a = (k as f64 * 10.0).to_radians();
//!         Point::new(0.5 + 0.4 * a.sin(), 0.5 + 0.4 * a.cos())
//!     })
//!     .collect();
//! let star = [Marker::new(0.5, 0.5, '*')];
//!
//! let config = DensityMapConfig {
//!     title: Some("Debris ring"),
//!     markers: &star,
//!     width: 40,
//!     height: 20,
//!     ..Default::default()
//! };
//! let map = create_density_map(&ring, &config)?;
//! assert!(map.contains('*'));
//! # Ok::<(), viz::VizError>(())
//! ```

use std::fmt;
use thiserror::Error;

/// Errors raised while rendering text visualisations.
#[derive(Debug, Error)]
pub enum VizError {
    /// Invalid map configuration such as an empty character set or zero-sized grid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Formatting error: {0}")]
    FmtError(#[from] fmt::Error),
}

/// Standard Result type for all visualization operations.
pub type Result<T> = std::result::Result<T, VizError>;

pub mod density_map;
