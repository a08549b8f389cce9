//! Collaborator seams for the navigation controller.
//!
//! The controller talks to the page exclusively through these traits,
//! never through ambient globals. Implementations live with the embedder:
//! a DOM binding in a browser build, recording doubles in tests.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{DataError, FetchError, SurfaceError};

/// Event name published on the notification bus when a navigation
/// completes.
pub const ROUTE_CHANGED_EVENT: &str = "route-changed";

/// The addressable page region the controller renders into.
pub trait DisplaySurface: Send + Sync {
	/// Replaces the content region; fails when the region is absent.
	fn set_content(&self, html: &str) -> Result<(), SurfaceError>;
	/// Toggles content visibility around a paced swap.
	fn set_content_visible(&self, visible: bool);
	/// Updates the page title.
	fn set_title(&self, title: &str);
	/// Toggles the loading indicator.
	fn set_loading(&self, visible: bool);
	/// Surfaces a navigation error to the user.
	fn show_error(&self, message: &str);
	/// Marks navigational affordances matching `path` as active and all
	/// others inactive.
	fn set_active_path(&self, path: &str);
}

/// Browser-history style entry management.
///
/// External path changes (back/forward) reach the controller as new
/// `navigate` calls issued by the embedder's change listener.
pub trait HistorySurface: Send + Sync {
	/// Pushes a new entry for `path`.
	fn push(&self, path: &str);
	/// Replaces the current entry with `path`.
	fn replace(&self, path: &str);
	/// Steps back one entry.
	fn back(&self);
	/// Steps forward one entry.
	fn forward(&self);
}

/// Asynchronous raw-text fetch for lazily loaded templates.
#[async_trait]
pub trait TemplateFetcher: Send + Sync {
	/// Returns the text at `url` or a transport error.
	async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Supplies per-route dynamic context data.
#[async_trait]
pub trait RouteDataProvider: Send + Sync {
	/// Returns the data for `path`; may suspend.
	async fn data_for_route(&self, path: &str) -> Result<Map<String, Value>, DataError>;
}

/// Fire-and-forget notification bus.
pub trait EventBus: Send + Sync {
	/// Publishes a named event with a payload.
	fn publish(&self, event: &str, payload: Value);
}
