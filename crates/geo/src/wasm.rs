//! WASM bindings for the geo crate.
//!
//! These let the browser host call the resolver on every render without a
//! JavaScript port of the fit-bounds math.

use crate::{fit_bounds, BoundingRegion, Coordinate, FitOptions, ResolveRequest, Viewport};
use wasm_bindgen::prelude::*;

/// Resolve the map's center and zoom.
///
/// # Arguments
/// * `request_json` - JSON object with `viewport`, optional `region` and
///   `selected`, `defaultCenter`, `defaultZoom`, `currentZoom` and optional `paddingPx`
///
/// # Returns
/// JSON string `{"center": {...}, "zoom": n}`
#[wasm_bindgen(js_name = resolveView)]
pub fn resolve_view(request_json: &str) -> Result<String, JsValue> {
    let request = ResolveRequest::from_json(request_json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&request.resolve())
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Fit a region into a viewport.
///
/// # Returns
/// `[latitude, longitude, zoom]`, or an empty array when the region or the
/// viewport cannot be fitted
#[wasm_bindgen(js_name = fitRegion)]
#[allow(clippy::too_many_arguments)]
pub fn fit_region(
    nw_lat: f64,
    nw_lng: f64,
    se_lat: f64,
    se_lng: f64,
    width: u32,
    height: u32,
    padding_px: u32,
) -> js_sys::Float64Array {
    let region = BoundingRegion::new(Coordinate::new(nw_lat, nw_lng), Coordinate::new(se_lat, se_lng));
    let options = FitOptions {
        padding_px,
        ..FitOptions::default()
    };

    match fit_bounds(&region, Viewport::new(width, height), &options) {
        Some(view) => js_sys::Float64Array::from(
            &[view.center.latitude, view.center.longitude, view.zoom][..],
        ),
        None => js_sys::Float64Array::new_with_length(0),
    }
}
