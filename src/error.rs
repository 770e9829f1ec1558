//! Error type shared by the pipeline, configuration and bindings.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type EdgeResult<T> = Result<T, EdgeError>;

/// Errors raised while preparing or running the edge pipeline.
#[derive(Error, Debug)]
pub enum EdgeError {
    /// The raster does not describe a `width × height` RGBA image.
    #[error("invalid input: {width}x{height} RGBA raster needs {expected} bytes, got {actual}")]
    InvalidInput {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Width or height is zero, or `width * height * 4` overflows.
    #[error("invalid input: unsupported dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A pipeline parameter is negative or not finite.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    /// Parameter JSON could not be parsed.
    #[error("invalid pipeline configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl EdgeError {
    /// True for the `InvalidInput` family (length or dimension problems).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            EdgeError::InvalidInput { .. } | EdgeError::InvalidDimensions { .. }
        )
    }
}
