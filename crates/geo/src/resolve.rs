//! Map center and zoom resolution.
//!
//! [`ViewportResolver::resolve`] is called on every render with whatever the
//! session currently knows. It holds no state between calls; the same inputs
//! always produce the same [`MapView`].

use crate::mercator::{self, TILE_SIZE};
use crate::{BoundingRegion, Coordinate, Result, Viewport};
use serde::{Deserialize, Serialize};

/// Guards against `floor` dropping a whole zoom level on rounding noise.
const FIT_EPSILON: f64 = 1e-9;

/// Center and zoom handed to the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
}

/// Tuning for [`fit_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    /// Pixels kept clear on every side of the fitted region
    pub padding_px: u32,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding_px: 20,
            min_zoom: 0.0,
            max_zoom: 22.0,
        }
    }
}

/// View shown when neither a selection nor a region decides it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewDefaults {
    pub center: Coordinate,
    pub zoom: f64,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            center: Coordinate::new(59.288_331_692, -135.637_207_031),
            zoom: 9.0,
        }
    }
}

/// Computes the largest zoom at which `region` fits inside `viewport`, and the
/// region's projected midpoint.
///
/// Returns `None` when nothing sensible can be computed: an empty viewport, a
/// region with out-of-range or inverted corners, or a single-point region.
///
/// # Example
/// ```
/// use clipmap_geo::{fit_bounds, BoundingRegion, Coordinate, FitOptions, Viewport};
///
/// let region = BoundingRegion::new(Coordinate::new(58.45, -134.75), Coordinate::new(58.25, -134.30));
/// let view = fit_bounds(&region, Viewport::new(1280, 800), &FitOptions::default()).unwrap();
/// assert_eq!(view.zoom, 11.0);
///
/// assert!(fit_bounds(&region, Viewport::new(0, 800), &FitOptions::default()).is_none());
/// ```
pub fn fit_bounds(region: &BoundingRegion, viewport: Viewport, options: &FitOptions) -> Option<MapView> {
    if let Err(err) = region.validate() {
        tracing::debug!(error = %err, "Region cannot be fitted");
        return None;
    }
    let Some((width, height)) = viewport.inner_size(options.padding_px) else {
        tracing::debug!(width = viewport.width, height = viewport.height, "Viewport is empty");
        return None;
    };

    let nw = mercator::project(&region.northwest);
    let se = mercator::project(&region.southeast);
    let wraps = region.crosses_antimeridian();

    let dx = if wraps { 1.0 - nw.x + se.x } else { se.x - nw.x };
    let dy = se.y - nw.y;

    let zoom_x = axis_zoom(width, dx);
    let zoom_y = axis_zoom(height, dy);
    let fitted = zoom_x.min(zoom_y);
    if !fitted.is_finite() {
        // Both spans vanished after projection (e.g. two points past the
        // Mercator latitude limit).
        return None;
    }

    let zoom = (fitted + FIT_EPSILON)
        .floor()
        .max(options.min_zoom)
        .min(options.max_zoom);

    let mid_x = if wraps {
        (nw.x + se.x + 1.0) / 2.0
    } else {
        (nw.x + se.x) / 2.0
    };
    let projected = mercator::unproject(mercator::WorldPoint {
        x: mid_x,
        y: (nw.y + se.y) / 2.0,
    });
    // Corners past the Mercator latitude limit project onto its edge.
    let latitude = projected
        .latitude
        .clamp(region.southeast.latitude, region.northwest.latitude);
    let center = Coordinate::new(latitude, projected.longitude);

    Some(MapView { center, zoom })
}

/// Zoom at which a world-space span of `span` exactly fills `pixels`.
#[inline]
fn axis_zoom(pixels: f64, span: f64) -> f64 {
    if span > 0.0 {
        (pixels / TILE_SIZE / span).log2()
    } else {
        f64::INFINITY
    }
}

/// Decides what the map shows on each render.
///
/// Rules, first match wins:
/// 1. a selected coordinate becomes the center, zoom stays where the map has it;
/// 2. a bounding region is fitted to the viewport;
/// 3. the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportResolver {
    defaults: ViewDefaults,
    options: FitOptions,
}

impl ViewportResolver {
    pub fn new(defaults: ViewDefaults, options: FitOptions) -> Self {
        Self { defaults, options }
    }

    pub fn defaults(&self) -> &ViewDefaults {
        &self.defaults
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Resolves the view for one render.
    ///
    /// `current_zoom` is whatever the map widget holds right now; it is only
    /// used when centering on a selection.
    pub fn resolve(
        &self,
        viewport: Viewport,
        region: Option<&BoundingRegion>,
        selected: Option<Coordinate>,
        current_zoom: f64,
    ) -> MapView {
        if let Some(center) = selected {
            return MapView {
                center,
                zoom: current_zoom,
            };
        }

        region
            .and_then(|region| fit_bounds(region, viewport, &self.options))
            .unwrap_or(MapView {
                center: self.defaults.center,
                zoom: self.defaults.zoom,
            })
    }
}

/// One resolve call as the browser host sends it, in camelCase JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub viewport: Viewport,
    #[serde(default)]
    pub region: Option<BoundingRegion>,
    #[serde(default)]
    pub selected: Option<Coordinate>,
    pub default_center: Coordinate,
    pub default_zoom: f64,
    pub current_zoom: f64,
    #[serde(default)]
    pub padding_px: Option<u32>,
}

impl ResolveRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn resolver(&self) -> ViewportResolver {
        let options = FitOptions {
            padding_px: self.padding_px.unwrap_or(FitOptions::default().padding_px),
            ..FitOptions::default()
        };
        ViewportResolver::new(
            ViewDefaults {
                center: self.default_center,
                zoom: self.default_zoom,
            },
            options,
        )
    }

    pub fn resolve(&self) -> MapView {
        self.resolver()
            .resolve(self.viewport, self.region.as_ref(), self.selected, self.current_zoom)
    }
}
