//! Rectangular map regions.

use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};

/// A rectangle on the map defined by its north-west and south-east corners.
///
/// A north-west longitude greater than the south-east one means the region
/// crosses the antimeridian (e.g. `170°E .. 170°W`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    #[serde(alias = "nw")]
    pub northwest: Coordinate,
    #[serde(alias = "se")]
    pub southeast: Coordinate,
}

impl BoundingRegion {
    #[inline]
    pub const fn new(northwest: Coordinate, southeast: Coordinate) -> Self {
        Self { northwest, southeast }
    }

    #[inline]
    pub fn crosses_antimeridian(&self) -> bool {
        self.northwest.longitude > self.southeast.longitude
    }

    /// Latitude extent in degrees. Negative when the corners are inverted.
    #[inline]
    pub fn latitude_span(&self) -> f64 {
        self.northwest.latitude - self.southeast.latitude
    }

    /// Longitude extent in degrees, measured eastward from the north-west corner.
    #[inline]
    pub fn longitude_span(&self) -> f64 {
        let span = self.southeast.longitude - self.northwest.longitude;
        if span < 0.0 {
            span + 360.0
        } else {
            span
        }
    }

    /// True when both corners are the same point.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.latitude_span() == 0.0 && self.longitude_span() == 0.0
    }

    /// Rejects out-of-range corners, inverted latitudes and zero-area regions.
    pub fn validate(&self) -> Result<()> {
        self.northwest.validate()?;
        self.southeast.validate()?;

        if self.latitude_span() < 0.0 {
            return Err(GeoError::InvalidRegion(format!(
                "northwest latitude {} is south of southeast latitude {}",
                self.northwest.latitude, self.southeast.latitude
            )));
        }
        if self.is_degenerate() {
            return Err(GeoError::InvalidRegion(
                "corners coincide; the region has no extent".into(),
            ));
        }
        Ok(())
    }

    /// Whether `coord` lies inside the region, edges included.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        let lat_ok = coord.latitude <= self.northwest.latitude
            && coord.latitude >= self.southeast.latitude;

        let lng_ok = if self.crosses_antimeridian() {
            coord.longitude >= self.northwest.longitude || coord.longitude <= self.southeast.longitude
        } else {
            coord.longitude >= self.northwest.longitude && coord.longitude <= self.southeast.longitude
        };

        lat_ok && lng_ok
    }
}
