//! Errors reported before rendering starts.
//!
//! Geometry and shading never fail: degenerate cases are "no hit" or a black
//! sample. Only render and camera settings, and pixel coordinates outside
//! the image, can be rejected.

use thiserror::Error;

/// Invalid render or camera configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Maximum ray depth must be at least 1")]
    ZeroDepth,

    #[error("Self-intersection epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f64),

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    PixelOutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for render setup.
pub type RenderResult<T> = Result<T, RenderError>;
