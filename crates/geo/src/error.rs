//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
///
/// View resolution never returns these; it falls back to defaults instead.
/// They surface from the validation helpers and the WASM/CLI input parsing.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Region with inverted or coincident corners
    #[error("Invalid bounding region: {0}")]
    InvalidRegion(String),

    /// Viewport with zero width or height
    #[error("Viewport {width}x{height} has no drawable area")]
    EmptyViewport { width: u32, height: u32 },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with clipmap-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Invalid bounding region
    InvalidRegion = 10002,
    /// Empty viewport
    EmptyViewport = 10003,
    /// JSON parsing error
    JsonParsing = 10004,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidRegion(_) => GeoErrorCode::InvalidRegion,
            GeoError::EmptyViewport { .. } => GeoErrorCode::EmptyViewport,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }
}
