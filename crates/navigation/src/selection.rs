//! Session state and the records read from the data provider.

use crate::FilterState;
use clipmap_geo::{BoundingRegion, Coordinate};
use serde::{Deserialize, Serialize};

/// A geotagged clip as delivered by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub title: String,
    pub location: Coordinate,
}

/// The city record delivered alongside the videos. Only `bounds` is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    #[serde(default)]
    pub bounds: Option<BoundingRegion>,
}

/// Everything the user has picked during this page session.
///
/// Video indices are 1-based, matching the numbers printed on map markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub active_video: Option<usize>,
    pub open_video: Option<usize>,
    pub show_overlays: bool,
    pub filters: FilterState,
    pub auth_token: Option<String>,
}

impl SelectionState {
    /// Location of the active video in `videos`.
    ///
    /// `None` when nothing is active, or when the index no longer points into
    /// the list (a filter change may have shrunk it).
    pub fn active_location(&self, videos: &[VideoRecord]) -> Option<Coordinate> {
        self.active_video
            .and_then(|index| index.checked_sub(1))
            .and_then(|offset| videos.get(offset))
            .map(|video| video.location)
    }
}

/// A marker the host should draw for one video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// 1-based index shown on the marker
    pub index: usize,
    pub location: Coordinate,
    pub is_active: bool,
}

impl SelectionState {
    /// Markers for `videos`, or none at all while overlays are hidden.
    pub fn markers(&self, videos: &[VideoRecord]) -> Vec<Marker> {
        if !self.show_overlays {
            return Vec::new();
        }
        videos
            .iter()
            .enumerate()
            .map(|(offset, video)| Marker {
                index: offset + 1,
                location: video.location,
                is_active: self.active_video == Some(offset + 1),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_active_location_is_one_based() {
        let state = SelectionState {
            active_video: Some(2),
            ..SelectionState::default()
        };
        assert_eq!(state.active_location(&videos()), Some(Coordinate::new(58.3831, -134.6444)));
    }

    #[test]
    fn test_out_of_range_selection_is_none() {
        let mut state = SelectionState {
            active_video: Some(3),
            ..SelectionState::default()
        };
        assert_eq!(state.active_location(&videos()), None);

        state.active_video = Some(0);
        assert_eq!(state.active_location(&videos()), None);

        state.active_video = Some(1);
        assert_eq!(state.active_location(&[]), None);
    }

    #[test]
    fn test_markers_follow_overlay_flag() {
        let mut state = SelectionState {
            active_video: Some(1),
            ..SelectionState::default()
        };
        assert!(state.markers(&videos()).is_empty());

        state.show_overlays = true;
        let markers = state.markers(&videos());
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].index, 1);
        assert!(markers[0].is_active);
        assert!(!markers[1].is_active);
    }

    #[test]
    fn test_city_without_bounds_deserializes() {
        let city: CityRecord = serde_json::from_str(r#"{"name": "Haines"}"#).unwrap();
        assert!(city.bounds.is_none());
    }
}
