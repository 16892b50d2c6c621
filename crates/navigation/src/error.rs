//! Error types for the navigation crate.

use thiserror::Error;

/// Result type alias for navigation operations.
pub type Result<T> = std::result::Result<T, NavigationError>;

/// Errors that can occur while talking to the history service or decoding URLs.
///
/// The controller never propagates these; it logs them and keeps going with
/// its in-memory state.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The history service could not be reached
    #[error("History service unavailable: {0}")]
    HistoryUnavailable(String),

    /// A query string that does not describe a filter selection
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
}

/// Error code for integration with clipmap-core error handling.
/// Range: 11xxx for navigation errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationErrorCode {
    /// History service unavailable
    HistoryUnavailable = 11001,
    /// Invalid query string
    InvalidQuery = 11002,
}

impl NavigationError {
    /// Returns the error code for this error.
    pub fn code(&self) -> NavigationErrorCode {
        match self {
            NavigationError::HistoryUnavailable(_) => NavigationErrorCode::HistoryUnavailable,
            NavigationError::InvalidQuery(_) => NavigationErrorCode::InvalidQuery,
        }
    }
}
