//! A map view's per-session glue.
//!
//! [`MapSession`] owns the controller, remembers the latest viewport and the
//! map widget's zoom, and asks the resolver for a fresh [`MapView`] on every
//! render. The host forwards its UI events through [`MapSession::apply`].

use crate::observer::{ResizeSubscription, ViewportSource};
use crate::{CityRecord, HistoryService, Marker, NavigationStateController, VideoRecord};
use clipmap_core::config::{ConfigSchema, MapConfig};
use clipmap_geo::{Coordinate, FitOptions, MapView, ViewDefaults, Viewport, ViewportResolver};
use clipmap_telemetry::{metrics, names, Timer};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// A discrete event from the host UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    Resize { width: u32, height: u32 },
    /// The user zoomed the map widget directly.
    Zoom { zoom: f64 },
    SelectVideo { index: Option<usize> },
    OpenVideo { index: Option<usize> },
    ShowOverlays { show: bool },
    AuthToken { token: Option<String> },
    #[serde(rename_all = "camelCase")]
    InitFilters {
        #[serde(default)]
        city: String,
        #[serde(default)]
        year: u32,
        #[serde(default)]
        month: u32,
    },
    /// The host moved through history (back/forward).
    Navigated,
}

/// Default center and zoom taken from `[map]`.
pub fn view_defaults(map: &MapConfig) -> ViewDefaults {
    ViewDefaults {
        center: Coordinate::new(map.default_center.latitude, map.default_center.longitude),
        zoom: map.default_zoom,
    }
}

/// Fit tuning taken from `[map]`.
pub fn fit_options(map: &MapConfig) -> FitOptions {
    FitOptions {
        padding_px: map.padding_px,
        min_zoom: map.min_zoom,
        max_zoom: map.max_zoom,
    }
}

#[derive(Debug)]
pub struct MapSession<H> {
    controller: NavigationStateController<H>,
    resolver: ViewportResolver,
    viewport: Rc<Cell<Viewport>>,
    current_zoom: f64,
    subscription: Option<ResizeSubscription>,
}

impl<H: HistoryService> MapSession<H> {
    pub fn new(controller: NavigationStateController<H>, resolver: ViewportResolver, viewport: Viewport) -> Self {
        let current_zoom = resolver.defaults().zoom;
        Self {
            controller,
            resolver,
            viewport: Rc::new(Cell::new(viewport)),
            current_zoom,
            subscription: None,
        }
    }

    /// Builds a session from a loaded configuration.
    pub fn from_config(history: H, config: &ConfigSchema, viewport: Viewport) -> Self {
        let controller = NavigationStateController::with_base_path(history, config.history.base_path.clone());
        let resolver = ViewportResolver::new(view_defaults(&config.map), fit_options(&config.map));
        Self::new(controller, resolver, viewport)
    }

    pub fn controller(&self) -> &NavigationStateController<H> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NavigationStateController<H> {
        &mut self.controller
    }

    /// The most recently observed viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    pub fn current_zoom(&self) -> f64 {
        self.current_zoom
    }

    /// Starts following `source`. Any earlier subscription is released first.
    pub fn attach<S>(&mut self, source: &S)
    where
        S: ViewportSource + Clone + 'static,
    {
        self.detach();
        record_viewport(&self.viewport, source.current());

        let latest = Rc::clone(&self.viewport);
        self.subscription = Some(ResizeSubscription::attach(source, move |viewport| {
            record_viewport(&latest, viewport);
        }));
    }

    /// Stops following the viewport source. Safe to call repeatedly.
    pub fn detach(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.detach();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.as_ref().is_some_and(ResizeSubscription::is_attached)
    }

    /// Records a size reported directly by the host.
    pub fn on_resize(&mut self, viewport: Viewport) {
        record_viewport(&self.viewport, viewport);
    }

    pub fn apply(&mut self, event: SessionEvent) {
        tracing::trace!(?event, "Session event");
        match event {
            SessionEvent::Resize { width, height } => self.on_resize(Viewport::new(width, height)),
            SessionEvent::Zoom { zoom } => self.current_zoom = zoom,
            SessionEvent::SelectVideo { index } => self.controller.set_active_video(index),
            SessionEvent::OpenVideo { index } => self.controller.set_open_video(index),
            SessionEvent::ShowOverlays { show } => self.controller.set_show_overlays(show),
            SessionEvent::AuthToken { token } => self.controller.set_auth_token(token),
            SessionEvent::InitFilters { city, year, month } => {
                self.controller.init_filters(&city, year, month);
            }
            SessionEvent::Navigated => self.controller.restore_from_history(),
        }
    }

    /// Resolves the view for this render.
    ///
    /// The resulting zoom becomes the widget's current zoom, which a later
    /// selection keeps.
    pub fn render(&mut self, videos: &[VideoRecord], city: Option<&CityRecord>) -> MapView {
        let timer = Timer::start(names::VIEW_RESOLVE_MS);
        let view = self.resolver.resolve(
            self.viewport.get(),
            city.and_then(|c| c.bounds.as_ref()),
            self.controller.active_location(videos),
            self.current_zoom,
        );
        timer.stop();

        metrics().increment(names::VIEWS_RESOLVED);
        self.current_zoom = view.zoom;
        view
    }

    pub fn markers(&self, videos: &[VideoRecord]) -> Vec<Marker> {
        self.controller.state().markers(videos)
    }
}

fn record_viewport(cell: &Cell<Viewport>, viewport: Viewport) {
    cell.set(viewport);
    metrics().gauge(names::VIEWPORT_WIDTH, u64::from(viewport.width));
    metrics().gauge(names::VIEWPORT_HEIGHT, u64::from(viewport.height));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::ManualViewportSource;
    use crate::{FilterState, MemoryHistory};
    use clipmap_geo::BoundingRegion;

    fn juneau() -> CityRecord {
        CityRecord {
            name: "Juneau".into(),
            bounds: Some(BoundingRegion::new(
                Coordinate::new(58.45, -134.75),
                Coordinate::new(58.25, -134.30),
            )),
        }
    }

    fn videos() -> Vec<VideoRecord> {
        vec![
            VideoRecord {
                title: "Mendenhall Glacier".into(),
                location: Coordinate::new(58.4167, -134.5450),
            },
            VideoRecord {
                title: "Auke Bay".into(),
                location: Coordinate::new(58.3831, -134.6444),
            },
        ]
    }

    fn session() -> MapSession<MemoryHistory> {
        MapSession::from_config(MemoryHistory::new("/videos"), &ConfigSchema::default(), Viewport::new(1280, 800))
    }

    #[test]
    fn test_render_without_city_uses_config_defaults() {
        let mut s = session();
        let view = s.render(&videos(), None);
        assert_eq!(view.center, Coordinate::new(59.288_331_692, -135.637_207_031));
        assert_eq!(view.zoom, 9.0);
    }

    #[test]
    fn test_selected_video_becomes_center() {
        let mut s = session();
        let fitted = s.render(&videos(), Some(&juneau()));

        s.apply(SessionEvent::SelectVideo { index: Some(2) });
        let view = s.render(&videos(), Some(&juneau()));

        assert_eq!(view.center, videos()[1].location);
        assert_eq!(view.zoom, fitted.zoom);
    }

    #[test]
    fn test_selection_keeps_user_zoom() {
        let mut s = session();
        s.render(&videos(), Some(&juneau()));
        s.apply(SessionEvent::Zoom { zoom: 15.0 });
        s.apply(SessionEvent::SelectVideo { index: Some(1) });

        assert_eq!(s.render(&videos(), Some(&juneau())).zoom, 15.0);
    }

    #[test]
    fn test_stale_selection_falls_back_to_city() {
        let mut s = session();
        s.apply(SessionEvent::SelectVideo { index: Some(5) });
        let view = s.render(&videos(), Some(&juneau()));
        assert!(juneau().bounds.unwrap().contains(&view.center));
    }

    #[test]
    fn test_resize_alone_changes_next_render() {
        let source = ManualViewportSource::new(Viewport::new(1280, 800));
        let mut s = session();
        s.attach(&source);

        let wide = s.render(&videos(), Some(&juneau()));
        source.resize(320, 480);
        let narrow = s.render(&videos(), Some(&juneau()));

        assert_eq!(s.viewport(), Viewport::new(320, 480));
        assert!(narrow.zoom < wide.zoom);
    }

    #[test]
    fn test_render_timings_stay_bounded() {
        let mut s = session();
        let renders = clipmap_telemetry::HISTOGRAM_WINDOW + 500;
        for _ in 0..renders {
            s.render(&[], None);
        }

        let stats = metrics().histogram_stats(names::VIEW_RESOLVE_MS).unwrap();
        assert_eq!(stats.window, clipmap_telemetry::HISTOGRAM_WINDOW);
        assert!(stats.count >= renders as u64);
        assert!(metrics().counter(names::VIEWS_RESOLVED) >= renders as u64);
    }

    #[test]
    fn test_detach_stops_following_resizes() {
        let source = ManualViewportSource::new(Viewport::new(1280, 800));
        let mut s = session();
        s.attach(&source);
        assert!(s.is_attached());

        s.detach();
        s.detach();
        source.resize(10, 10);

        assert!(!s.is_attached());
        assert_eq!(s.viewport(), Viewport::new(1280, 800));
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_dropping_session_releases_listener() {
        let source = ManualViewportSource::new(Viewport::new(1280, 800));
        {
            let mut s = session();
            s.attach(&source);
            assert_eq!(source.listener_count(), 1);
        }
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_events_drive_history() {
        let mut s = session();
        s.apply(SessionEvent::InitFilters {
            city: "Juneau".into(),
            year: 2020,
            month: 0,
        });
        s.apply(SessionEvent::AuthToken { token: Some("tok".into()) });

        let entry = s.controller().history().current_entry().unwrap();
        assert_eq!(entry.path(), "/videos?city=Juneau&year=2020");
        assert_eq!(entry.state.unwrap().auth_token.as_deref(), Some("tok"));
        assert_eq!(s.controller().state().filters, FilterState::new("Juneau", 2020, 0));
    }

    #[test]
    fn test_event_json_shape() {
        let event: SessionEvent =
            serde_json::from_str(r#"{"type": "initFilters", "city": "Sitka", "year": 2019}"#).unwrap();
        assert_eq!(
            event,
            SessionEvent::InitFilters {
                city: "Sitka".into(),
                year: 2019,
                month: 0
            }
        );

        let event: SessionEvent = serde_json::from_str(r#"{"type": "selectVideo", "index": null}"#).unwrap();
        assert_eq!(event, SessionEvent::SelectVideo { index: None });
    }
}
