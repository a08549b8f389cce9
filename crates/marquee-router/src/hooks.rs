//! Lifecycle hooks and post-render handlers.
//!
//! Routes carry their hooks as `Arc<dyn …>` trait objects so the
//! descriptors stay cloneable; [`hook_fn`] and [`handler_fn`] adapt plain
//! closures for the common synchronous case, and async implementations
//! implement the traits directly.

use async_trait::async_trait;
use marquee_templates::Context;
use std::sync::Arc;

use crate::route::Route;

/// A navigation lifecycle hook.
///
/// As `before_enter`, returning `false` aborts the navigation with no
/// user-visible error. As `after_enter`, the return value is ignored.
#[async_trait]
pub trait RouteHook: Send + Sync {
	/// Runs the hook with the incoming route and the route it replaces.
	async fn run(&self, to: &Route, from: Option<&Route>) -> bool;
}

/// A post-render route callback, run after the view has been committed.
#[async_trait]
pub trait RouteHandler: Send + Sync {
	/// Receives the entered route and the context it was rendered with.
	async fn handle(&self, route: &Route, context: &Context);
}

struct FnHook<F>(F);

#[async_trait]
impl<F> RouteHook for FnHook<F>
where
	F: Fn(&Route, Option<&Route>) -> bool + Send + Sync,
{
	async fn run(&self, to: &Route, from: Option<&Route>) -> bool {
		(self.0)(to, from)
	}
}

/// Wraps a synchronous closure as a lifecycle hook.
pub fn hook_fn<F>(f: F) -> Arc<dyn RouteHook>
where
	F: Fn(&Route, Option<&Route>) -> bool + Send + Sync + 'static,
{
	Arc::new(FnHook(f))
}

struct FnHandler<F>(F);

#[async_trait]
impl<F> RouteHandler for FnHandler<F>
where
	F: Fn(&Route, &Context) + Send + Sync,
{
	async fn handle(&self, route: &Route, context: &Context) {
		(self.0)(route, context)
	}
}

/// Wraps a synchronous closure as a post-render handler.
pub fn handler_fn<F>(f: F) -> Arc<dyn RouteHandler>
where
	F: Fn(&Route, &Context) + Send + Sync + 'static,
{
	Arc::new(FnHandler(f))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::route::RouteConfig;

	#[tokio::test]
	async fn test_hook_fn_passes_routes_through() {
		let route = Route::from_config("home", RouteConfig::new());
		let hook = hook_fn(|to, from| to.path == "home" && from.is_none());

		assert!(hook.run(&route, None).await);
		assert!(!hook.run(&route, Some(&route)).await);
	}

	#[tokio::test]
	async fn test_handler_fn_runs() {
		let route = Route::from_config("home", RouteConfig::new());
		let seen = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
		let observed = seen.clone();
		let handler = handler_fn(move |_route, _context| {
			observed.store(true, std::sync::atomic::Ordering::SeqCst);
		});

		handler.handle(&route, &Context::new()).await;
		assert!(seen.load(std::sync::atomic::Ordering::SeqCst));
	}
}
