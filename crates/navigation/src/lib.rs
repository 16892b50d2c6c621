//! Session state and browser-history synchronization for clipmap.
//!
//! This crate provides:
//! - [`NavigationStateController`], which owns the user's selections and
//!   mirrors filter and token changes into the current history entry
//! - The [`HistoryService`] seam plus an in-memory implementation
//! - The `/videos?city=&year=&month=` filter codec
//! - A [`ViewportSource`] observer with RAII subscriptions
//! - [`MapSession`], tying the controller to the viewport resolver
//!
//! # Example
//!
//! ```
//! use clipmap_navigation::{HistoryService, MemoryHistory, NavigationStateController};
//!
//! let mut controller = NavigationStateController::new(MemoryHistory::new("/videos"));
//! controller.init_filters("Juneau", 2020, 0);
//! controller.set_auth_token(Some("token".into()));
//!
//! let entry = controller.history().current_entry().unwrap();
//! assert_eq!(entry.path(), "/videos?city=Juneau&year=2020");
//! assert_eq!(entry.state.unwrap().auth_token.as_deref(), Some("token"));
//! ```

mod controller;
mod error;
mod filters;
mod history;
mod memory;
mod observer;
mod selection;
mod session;

pub use controller::NavigationStateController;
pub use error::{NavigationError, NavigationErrorCode, Result};
pub use filters::{FilterState, DEFAULT_BASE_PATH};
pub use history::{CurrentEntry, EntryPatch, EntryState, HistoryEntry, HistoryService};
pub use memory::MemoryHistory;
pub use observer::{ManualViewportSource, ResizeListener, ResizeSubscription, SubscriptionId, ViewportSource};
pub use selection::{CityRecord, Marker, SelectionState, VideoRecord};
pub use session::{fit_options, view_defaults, MapSession, SessionEvent};
