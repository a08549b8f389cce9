//! Error types for client-side navigation.

use std::fmt;

/// Error from the display surface's content commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
	/// The addressable content region is absent from the page.
	ContentMissing,
}

impl fmt::Display for SurfaceError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ContentMissing => write!(f, "Page content element not found"),
		}
	}
}

impl std::error::Error for SurfaceError {}

/// Error from a template resource fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError(pub String);

impl fmt::Display for FetchError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::error::Error for FetchError {}

/// Error from the route data collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataError(pub String);

impl fmt::Display for DataError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::error::Error for DataError {}

/// Error type for navigation-level failures.
///
/// Middleware and `before_enter` rejections are not errors: they abort the
/// navigation silently. Everything here is funneled to the single
/// error-display path and followed by the guaranteed state reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
	/// No route is registered under the requested path.
	RouteNotFound(String),
	/// The route's template could not be fetched.
	Transport(String),
	/// Rendering failed.
	Render(String),
	/// The display surface has no content region to commit into.
	ContentSurfaceMissing,
}

impl fmt::Display for NavigationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::RouteNotFound(path) => write!(f, "Route not found: {}", path),
			Self::Transport(msg) => write!(f, "Template fetch failed: {}", msg),
			Self::Render(msg) => write!(f, "Render failed: {}", msg),
			Self::ContentSurfaceMissing => write!(f, "Page content element not found"),
		}
	}
}

impl std::error::Error for NavigationError {}

impl From<SurfaceError> for NavigationError {
	fn from(err: SurfaceError) -> Self {
		match err {
			SurfaceError::ContentMissing => Self::ContentSurfaceMissing,
		}
	}
}
