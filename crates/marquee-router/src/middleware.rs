//! Middleware for the navigation pipeline.
//!
//! Middlewares run in registration order before a route is entered, each
//! receiving the incoming route and the current one. An explicit `false`
//! aborts the navigation silently: no error surface, no history update, no
//! content swap.

use async_trait::async_trait;
use std::sync::Arc;

use crate::route::Route;

/// A navigation middleware.
#[async_trait]
pub trait Middleware: Send + Sync {
	/// Returns whether the navigation may proceed.
	async fn handle(&self, to: &Route, from: Option<&Route>) -> bool;
}

struct FnMiddleware<F>(F);

#[async_trait]
impl<F> Middleware for FnMiddleware<F>
where
	F: Fn(&Route, Option<&Route>) -> bool + Send + Sync,
{
	async fn handle(&self, to: &Route, from: Option<&Route>) -> bool {
		(self.0)(to, from)
	}
}

/// Wraps a synchronous predicate as a middleware.
pub fn middleware_fn<F>(f: F) -> Arc<dyn Middleware>
where
	F: Fn(&Route, Option<&Route>) -> bool + Send + Sync + 'static,
{
	Arc::new(FnMiddleware(f))
}

/// Logging middleware
/// Logs every navigation attempt with its source and target paths.
pub struct LoggingMiddleware;

impl LoggingMiddleware {
	/// Create a new logging middleware
	pub fn new() -> Self {
		Self
	}
}

impl Default for LoggingMiddleware {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Middleware for LoggingMiddleware {
	async fn handle(&self, to: &Route, from: Option<&Route>) -> bool {
		tracing::info!(
			to = %to.path,
			from = from.map(|route| route.path.as_str()).unwrap_or("-"),
			"navigating"
		);
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::route::RouteConfig;

	#[tokio::test]
	async fn test_middleware_fn_predicate() {
		let allow = middleware_fn(|_to, _from| true);
		let deny = middleware_fn(|to, _from| to.path != "admin");

		let home = Route::from_config("home", RouteConfig::new());
		let admin = Route::from_config("admin", RouteConfig::new());

		assert!(allow.handle(&home, None).await);
		assert!(deny.handle(&home, None).await);
		assert!(!deny.handle(&admin, None).await);
	}

	#[tokio::test]
	async fn test_logging_middleware_always_allows() {
		let middleware = LoggingMiddleware::new();
		let route = Route::from_config("home", RouteConfig::new());

		assert!(middleware.handle(&route, None).await);
		assert!(middleware.handle(&route, Some(&route)).await);
	}
}
