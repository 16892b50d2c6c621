//! Configuration schema definitions

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Highest zoom level served by the tile providers we target.
pub const MAX_SUPPORTED_ZOOM: f64 = 22.0;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Map defaults and fit-bounds tuning
    #[serde(default)]
    pub map: MapConfig,

    /// History path settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.map.validate()?;
        self.history.validate()
    }
}

/// A latitude/longitude pair as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterConfig {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Map defaults used when nothing else decides the view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Center shown when there is no city and no selected video
    #[serde(default = "default_center")]
    pub default_center: CenterConfig,

    /// Zoom shown alongside `default_center`
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// Interior padding, in pixels, kept on every side when fitting a city
    #[serde(default = "default_padding_px")]
    pub padding_px: u32,

    /// Lowest zoom the fit may produce
    #[serde(default)]
    pub min_zoom: f64,

    /// Highest zoom the fit may produce
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: default_center(),
            default_zoom: default_zoom(),
            padding_px: default_padding_px(),
            min_zoom: 0.0,
            max_zoom: default_max_zoom(),
        }
    }
}

impl MapConfig {
    fn validate(&self) -> Result<()> {
        let CenterConfig { latitude, longitude } = self.default_center;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::invalid_config_value(
                "map.default_center",
                format!("({}, {}) is not a valid coordinate", latitude, longitude),
            ));
        }
        if !(0.0..=MAX_SUPPORTED_ZOOM).contains(&self.min_zoom)
            || !(0.0..=MAX_SUPPORTED_ZOOM).contains(&self.max_zoom)
        {
            return Err(Error::invalid_config_value(
                "map.min_zoom/map.max_zoom",
                format!("zoom levels must lie in 0..={}", MAX_SUPPORTED_ZOOM),
            ));
        }
        if self.min_zoom > self.max_zoom {
            return Err(Error::invalid_config_value(
                "map.min_zoom",
                format!("{} is greater than max_zoom {}", self.min_zoom, self.max_zoom),
            ));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.default_zoom) {
            return Err(Error::invalid_config_value(
                "map.default_zoom",
                format!(
                    "{} is outside {}..={}",
                    self.default_zoom, self.min_zoom, self.max_zoom
                ),
            ));
        }
        Ok(())
    }
}

// Haines, Alaska.
fn default_center() -> CenterConfig {
    CenterConfig {
        latitude: 59.288_331_692,
        longitude: -135.637_207_031,
    }
}

fn default_zoom() -> f64 {
    9.0
}

fn default_padding_px() -> u32 {
    20
}

fn default_max_zoom() -> f64 {
    MAX_SUPPORTED_ZOOM
}

/// History path settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Path that filter query strings are appended to
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
        }
    }
}

impl HistoryConfig {
    fn validate(&self) -> Result<()> {
        if !self.base_path.starts_with('/') || self.base_path.contains('?') {
            return Err(Error::invalid_config_value(
                "history.base_path",
                format!("{:?} must be an absolute path without a query", self.base_path),
            ));
        }
        Ok(())
    }
}

fn default_base_path() -> String {
    "/videos".to_string()
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` takes precedence
    #[serde(default = "default_level")]
    pub level: String,

    /// Include the module target in each line
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            show_target: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
