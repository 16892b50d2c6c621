//! Web Mercator projection into normalized world space.
//!
//! World coordinates run from `(0, 0)` at the north-west corner of the map to
//! `(1, 1)` at the south-east corner. At zoom `z` the world is
//! `TILE_SIZE * 2^z` pixels wide.

use crate::Coordinate;
use std::f64::consts::PI;

/// Edge length of one map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude at which Web Mercator becomes square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// A point in normalized world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Projects a coordinate. Latitudes beyond [`MAX_LATITUDE`] are clamped.
#[inline]
pub fn project(coord: &Coordinate) -> WorldPoint {
    let lat = coord.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin = lat.to_radians().sin();

    WorldPoint {
        x: coord.longitude / 360.0 + 0.5,
        y: 0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI),
    }
}

/// Inverse of [`project`]. `x` is wrapped into `[0, 1]` first.
#[inline]
pub fn unproject(point: WorldPoint) -> Coordinate {
    let x = if (0.0..=1.0).contains(&point.x) {
        point.x
    } else {
        point.x.rem_euclid(1.0)
    };
    let n = PI - 2.0 * PI * point.y;

    Coordinate::new(
        n.sinh().atan().to_degrees(),
        x * 360.0 - 180.0,
    )
}

/// Width of the whole world in pixels at `zoom`.
#[inline]
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_origin_projects_to_world_center() {
        let p = project(&Coordinate::new(0.0, 0.0));
        assert_close(p.x, 0.5);
        assert_close(p.y, 0.5);
    }

    #[test]
    fn test_corners() {
        let nw = project(&Coordinate::new(MAX_LATITUDE, -180.0));
        assert_close(nw.x, 0.0);
        assert_close(nw.y, 0.0);

        let se = project(&Coordinate::new(-MAX_LATITUDE, 180.0));
        assert_close(se.x, 1.0);
        assert_close(se.y, 1.0);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let juneau = Coordinate::new(58.3019, -134.4197);
        let back = unproject(project(&juneau));
        assert_close(back.latitude, juneau.latitude);
        assert_close(back.longitude, juneau.longitude);
    }

    #[test]
    fn test_polar_latitudes_clamp() {
        assert_close(project(&Coordinate::new(90.0, 0.0)).y, 0.0);
    }

    #[test]
    fn test_unproject_wraps_x() {
        let c = unproject(WorldPoint { x: 1.25, y: 0.5 });
        assert_close(c.longitude, -90.0);
    }

    #[test]
    fn test_world_size() {
        assert_close(world_size(0.0), 256.0);
        assert_close(world_size(3.0), 2048.0);
    }
}
