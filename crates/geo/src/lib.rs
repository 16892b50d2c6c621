//! Map viewport resolution for clipmap.
//!
//! This crate provides:
//! - Coordinates, bounding regions and pixel viewports
//! - Web Mercator projection into normalized world space
//! - A fit-bounds algorithm that picks the largest zoom showing a whole region
//! - [`ViewportResolver`], the pure function deciding the map's center and zoom
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use clipmap_geo::{BoundingRegion, Coordinate, ViewportResolver, Viewport};
//!
//! let juneau = BoundingRegion::new(
//!     Coordinate::new(58.45, -134.75),
//!     Coordinate::new(58.25, -134.30),
//! );
//! let resolver = ViewportResolver::default();
//!
//! let view = resolver.resolve(Viewport::new(1280, 800), Some(&juneau), None, 9.0);
//! assert!(juneau.contains(&view.center));
//! assert!(view.zoom >= 9.0);
//! ```

mod bounds;
mod error;
pub mod mercator;
mod resolve;
mod viewport;

#[cfg(feature = "wasm")]
mod wasm;

pub use bounds::BoundingRegion;
pub use error::{GeoError, GeoErrorCode, Result};
pub use resolve::{fit_bounds, FitOptions, MapView, ResolveRequest, ViewDefaults, ViewportResolver};
pub use viewport::Viewport;

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both values are finite and inside their ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Checks the ranges, naming the offending value on failure.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "({}, {}) is outside lat -90..=90, lng -180..=180",
                self.latitude, self.longitude
            )))
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = GeoError;

    /// Parses `"lat,lng"`.
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| GeoError::InvalidCoordinate(format!("expected LAT,LNG, got {:?}", s)))?;

        let parse = |part: &str, what: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| GeoError::InvalidCoordinate(format!("invalid {}: {:?}", what, part)))
        };

        let coord = Self::new(parse(lat, "latitude")?, parse(lng, "longitude")?);
        coord.validate()?;
        Ok(coord)
    }
}
