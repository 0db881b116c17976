//! Error taxonomy for scene construction, transforms, export and rendering.

use thiserror::Error;

/// Errors raised by scene operations.
///
/// All errors are raised synchronously at the call that detects the violated
/// precondition; nothing in this crate retries or recovers internally.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Spectral type token is not part of the stellar model vocabulary
    #[error("Invalid spectral type: {0:?}")]
    InvalidSpectralType(String),

    /// Star magnitude is NaN or infinite
    #[error("Invalid magnitude: {0}")]
    InvalidMagnitude(f64),

    /// Operation needs a scene with content (or at least one star)
    #[error("Scene is empty or has no star to attach to")]
    EmptyScene,

    /// Radii, angles or sizes outside their valid ranges
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A ring referenced a scene index that does not hold a star
    #[error("Scene index {0} does not hold a star")]
    UnknownHost(usize),

    /// Temperature or normalisation wavelength outside valid ranges
    #[error("Invalid spectrum: {0}")]
    InvalidSpectrum(String),

    /// Flux normalisation could not be computed
    #[error("Normalization failed: {0}")]
    Normalization(String),

    /// Rendering backend cannot be reached
    #[error("Rendering backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Backend was reachable but failed while drawing
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;
