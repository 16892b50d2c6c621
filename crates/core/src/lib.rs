//! Core utilities shared by the clipmap crates
//!
//! This crate provides the pieces every other crate leans on:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration for the map, history and logging
//!
//! # Example
//!
//! ```rust,no_run
//! use clipmap_core::config::Config;
//!
//! let config = Config::load(None).expect("config should load");
//! println!("default zoom: {}", config.schema.map.default_zoom);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, HistoryConfig, LoggingConfig, MapConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
