//! Pixel viewport of the map widget.

use crate::{GeoError, Result};
use serde::{Deserialize, Serialize};

/// Size of the drawable map area in CSS pixels.
///
/// Replaced wholesale on every resize; it has no identity of its own.
/// The default is the empty `0x0` viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            Err(GeoError::EmptyViewport {
                width: self.width,
                height: self.height,
            })
        } else {
            Ok(())
        }
    }

    /// Drawable size after removing `padding` pixels from every side.
    ///
    /// Falls back to the full size when the padding would leave nothing,
    /// and returns `None` only for an empty viewport.
    pub fn inner_size(&self, padding: u32) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let padded_w = i64::from(self.width) - 2 * i64::from(padding);
        let padded_h = i64::from(self.height) - 2 * i64::from(padding);
        if padded_w > 0 && padded_h > 0 {
            Some((padded_w as f64, padded_h as f64))
        } else {
            Some((f64::from(self.width), f64::from(self.height)))
        }
    }
}

impl From<(u32, u32)> for Viewport {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}
