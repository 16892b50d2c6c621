//! Replays a recorded UI session against an in-memory history.
//!
//! A script is JSON:
//!
//! ```json
//! {
//!   "start": "/videos",
//!   "viewport": { "width": 1280, "height": 800 },
//!   "videos": [{ "title": "Auke Bay", "location": { "latitude": 58.38, "longitude": -134.64 } }],
//!   "city": { "name": "Juneau", "bounds": { "nw": { ... }, "se": { ... } } },
//!   "steps": [
//!     { "type": "initFilters", "city": "Juneau", "year": 2020 },
//!     { "type": "push", "path": "/videos/1" },
//!     { "type": "back" },
//!     { "type": "render" }
//!   ]
//! }
//! ```
//!
//! `back` and `forward` behave like the browser's popstate: the controller
//! restores filters from the entry it lands on.

use anyhow::{Context, Result};
use clipmap_core::config::ConfigSchema;
use clipmap_geo::{MapView, Viewport};
use clipmap_navigation::{
    CityRecord, CurrentEntry, MapSession, Marker, MemoryHistory, SelectionState, SessionEvent, VideoRecord,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
    #[serde(default)]
    pub city: Option<CityRecord>,
    pub steps: Vec<Step>,
}

fn default_start() -> String {
    "/videos".to_string()
}

fn default_viewport() -> Viewport {
    Viewport::new(1280, 800)
}

/// Browser-side actions that are not session events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HistoryStep {
    Push { path: String },
    Back,
    Forward,
    Render,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    History(HistoryStep),
    Session(SessionEvent),
}

/// What one `render` step produced.
#[derive(Debug, Clone, Serialize)]
pub struct RenderRecord {
    pub step: usize,
    pub viewport: Viewport,
    pub view: MapView,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Serialize)]
pub struct Outcome {
    pub renders: Vec<RenderRecord>,
    pub entries: Vec<CurrentEntry>,
    pub current: usize,
    pub state: SelectionState,
    /// Process metrics after the last step, as exported by the telemetry registry.
    pub metrics: serde_json::Value,
}

impl Script {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid replay script {}", path.display()))
    }
}

/// Runs every step in order. `on_step` sees the 1-based step number first.
pub fn run(script: &Script, config: &ConfigSchema, mut on_step: impl FnMut(usize, &Step)) -> Outcome {
    let history = MemoryHistory::new(&script.start);
    let mut session = MapSession::from_config(history, config, script.viewport);
    let mut renders = Vec::new();

    for (offset, step) in script.steps.iter().enumerate() {
        on_step(offset + 1, step);
        match step {
            Step::History(HistoryStep::Push { path }) => {
                session.controller_mut().history_mut().push(path, None);
            }
            Step::History(HistoryStep::Back) => {
                if session.controller_mut().history_mut().back() {
                    session.apply(SessionEvent::Navigated);
                } else {
                    tracing::warn!(step = offset + 1, "Already at the oldest entry");
                }
            }
            Step::History(HistoryStep::Forward) => {
                if session.controller_mut().history_mut().forward() {
                    session.apply(SessionEvent::Navigated);
                } else {
                    tracing::warn!(step = offset + 1, "Already at the newest entry");
                }
            }
            Step::History(HistoryStep::Render) => {
                let view = session.render(&script.videos, script.city.as_ref());
                renders.push(RenderRecord {
                    step: offset + 1,
                    viewport: session.viewport(),
                    view,
                    markers: session.markers(&script.videos),
                });
            }
            Step::Session(event) => session.apply(event.clone()),
        }
    }

    let history = session.controller().history();
    Outcome {
        renders,
        entries: history.entries().to_vec(),
        current: history.index(),
        state: session.controller().state().clone(),
        metrics: clipmap_telemetry::metrics().export_json(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCRIPT: &str = r#"{
        "videos": [
            { "title": "Mendenhall Glacier", "location": { "latitude": 58.4167, "longitude": -134.545 } },
            { "title": "Auke Bay", "location": { "latitude": 58.3831, "longitude": -134.6444 } }
        ],
        "city": {
            "name": "Juneau",
            "bounds": {
                "nw": { "latitude": 58.45, "longitude": -134.75 },
                "se": { "latitude": 58.25, "longitude": -134.30 }
            }
        },
        "steps": [
            { "type": "initFilters", "city": "Juneau", "year": 2020 },
            { "type": "authToken", "token": "first" },
            { "type": "push", "path": "/videos/2" },
            { "type": "selectVideo", "index": 2 },
            { "type": "render" },
            { "type": "back" },
            { "type": "resize", "width": 400, "height": 300 },
            { "type": "render" }
        ]
    }"#;

    fn script() -> Script {
        serde_json::from_str(SCRIPT).unwrap()
    }

    #[test]
    fn test_steps_parse_into_both_kinds() {
        let script = script();
        assert_eq!(script.start, "/videos");
        assert_eq!(script.steps[2], Step::History(HistoryStep::Push { path: "/videos/2".into() }));
        assert_eq!(script.steps[3], Step::Session(SessionEvent::SelectVideo { index: Some(2) }));
        assert_eq!(script.steps[5], Step::History(HistoryStep::Back));
    }

    #[test]
    fn test_replay_records_renders_and_history() {
        let mut seen = 0;
        let outcome = run(&script(), &ConfigSchema::default(), |_, _| seen += 1);

        assert_eq!(seen, 8);
        assert_eq!(outcome.renders.len(), 2);
        assert_eq!(outcome.renders[0].view.center.latitude, 58.3831);
        assert_eq!(outcome.renders[1].viewport, Viewport::new(400, 300));

        assert_eq!(outcome.current, 0);
        assert_eq!(outcome.entries.len(), 2);
        assert_eq!(outcome.entries[0].path(), "/videos?city=Juneau&year=2020");
        assert_eq!(outcome.state.filters.city, "Juneau");
        assert_eq!(outcome.state.auth_token.as_deref(), Some("first"));
    }

    #[test]
    fn test_outcome_carries_metrics() {
        let outcome = run(&script(), &ConfigSchema::default(), |_, _| {});

        let resolved = outcome.metrics["counters"]["view.resolved"].as_u64().unwrap();
        assert!(resolved >= 2);
        assert!(outcome.metrics["histograms"]["view.resolve_ms"]["count"].as_u64().unwrap() >= 2);
        assert!(outcome.metrics["gauges"].get("viewport.width").is_some());
    }

    #[test]
    fn test_back_at_start_is_ignored() {
        let script: Script = serde_json::from_str(r#"{ "steps": [{ "type": "back" }, { "type": "render" }] }"#).unwrap();
        let outcome = run(&script, &ConfigSchema::default(), |_, _| {});
        assert_eq!(outcome.current, 0);
        assert_eq!(outcome.renders[0].view.zoom, 9.0);
    }

    #[test]
    fn test_from_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ \"steps\": [ { \"type\": \"teleport\" } ] }").unwrap();

        let err = Script::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid replay script"));
    }
}
