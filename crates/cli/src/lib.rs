//! CLI utilities for the clipmap tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Formatting of coordinates, zoom levels and durations

#![warn(missing_docs)]

pub mod output;
