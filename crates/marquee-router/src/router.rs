//! Core Router implementation.
//!
//! The router resolves a path to a route, drives the middleware and
//! lifecycle pipeline, renders the view through the template engine,
//! commits it to the display surface, and serializes navigation attempts:
//! exactly one navigation runs at a time, later requests are rejected, not
//! queued. The in-flight flag is cleared by a guard on every exit path, so
//! success, rejection and failure all return the controller to idle.

use chrono::Utc;
use marquee_templates::{Context, TemplateEngine};
use parking_lot::{Mutex, RwLock};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::RouterConfig;
use crate::error::NavigationError;
use crate::middleware::Middleware;
use crate::route::{Route, RouteConfig};
use crate::surface::{
	DisplaySurface, EventBus, HistorySurface, RouteDataProvider, TemplateFetcher,
	ROUTE_CHANGED_EVENT,
};

/// Options for a single navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigateOptions {
	/// Replace the current history entry instead of pushing a new one.
	pub replace: bool,
}

/// Result of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// The route was entered and its view committed.
	Completed,
	/// Dropped: another navigation was already in flight.
	AlreadyNavigating,
	/// A middleware or `before_enter` hook declined the navigation.
	Rejected,
	/// The navigation failed; the error was surfaced to the display.
	Failed(NavigationError),
}

impl NavigationOutcome {
	/// Returns whether the navigation committed.
	pub fn is_completed(&self) -> bool {
		matches!(self, Self::Completed)
	}
}

#[derive(Default)]
struct NavigationState {
	current: Option<Route>,
	previous: Option<Route>,
}

/// Clears the in-flight flag and hides the loading indicator on every exit
/// path of a navigation.
struct IdleGuard<'a> {
	navigating: &'a AtomicBool,
	display: Option<&'a Arc<dyn DisplaySurface>>,
}

impl Drop for IdleGuard<'_> {
	fn drop(&mut self) {
		if let Some(display) = self.display {
			display.set_loading(false);
		}
		self.navigating.store(false, Ordering::SeqCst);
	}
}

/// The navigation controller.
///
/// Collaborators are supplied at construction; the template engine and the
/// display surface are mandatory, everything else optional. Routes and
/// middlewares register builder-style before navigation starts.
pub struct Router {
	routes: RwLock<HashMap<String, Route>>,
	middlewares: RwLock<Vec<Arc<dyn Middleware>>>,
	engine: RwLock<TemplateEngine>,
	display: Arc<dyn DisplaySurface>,
	history: Option<Arc<dyn HistorySurface>>,
	fetcher: Option<Arc<dyn TemplateFetcher>>,
	data_provider: Option<Arc<dyn RouteDataProvider>>,
	events: Option<Arc<dyn EventBus>>,
	state: Mutex<NavigationState>,
	navigating: AtomicBool,
	config: RouterConfig,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes.read().keys().collect::<Vec<_>>())
			.field("middleware_count", &self.middlewares.read().len())
			.field("is_navigating", &self.navigating.load(Ordering::SeqCst))
			.field("config", &self.config)
			.finish()
	}
}

impl Router {
	/// Creates a router over its two mandatory collaborators.
	pub fn new(engine: TemplateEngine, display: Arc<dyn DisplaySurface>) -> Self {
		Self {
			routes: RwLock::new(HashMap::new()),
			middlewares: RwLock::new(Vec::new()),
			engine: RwLock::new(engine),
			display,
			history: None,
			fetcher: None,
			data_provider: None,
			events: None,
			state: Mutex::new(NavigationState::default()),
			navigating: AtomicBool::new(false),
			config: RouterConfig::default(),
		}
	}

	/// Replaces the configuration.
	pub fn with_config(mut self, config: RouterConfig) -> Self {
		self.config = config;
		self
	}

	/// Attaches a history surface.
	pub fn with_history(mut self, history: Arc<dyn HistorySurface>) -> Self {
		self.history = Some(history);
		self
	}

	/// Attaches a template fetcher for lazily loaded templates.
	pub fn with_fetcher(mut self, fetcher: Arc<dyn TemplateFetcher>) -> Self {
		self.fetcher = Some(fetcher);
		self
	}

	/// Attaches the route data collaborator.
	pub fn with_data_provider(mut self, provider: Arc<dyn RouteDataProvider>) -> Self {
		self.data_provider = Some(provider);
		self
	}

	/// Attaches the notification bus.
	pub fn with_events(mut self, events: Arc<dyn EventBus>) -> Self {
		self.events = Some(events);
		self
	}

	/// Registers a route, overwriting any previous one at the same path.
	pub fn add_route(self, path: impl Into<String>, config: RouteConfig) -> Self {
		let path = path.into();
		let route = Route::from_config(path.clone(), config);
		self.routes.write().insert(path, route);
		self
	}

	/// Appends a middleware; middlewares run in registration order.
	pub fn use_middleware(self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.write().push(middleware);
		self
	}

	/// Removes a route; returns whether it existed.
	pub fn remove_route(&self, path: &str) -> bool {
		self.routes.write().remove(path).is_some()
	}

	/// Merges `config` over an existing route field by field: present
	/// fields override, absent fields keep their values. Returns `false`
	/// when the path is unknown.
	pub fn update_route(&self, path: &str, config: RouteConfig) -> bool {
		let mut routes = self.routes.write();
		match routes.get_mut(path) {
			Some(route) => {
				route.apply(config);
				true
			}
			None => false,
		}
	}

	/// Returns whether a route exists at `path`.
	pub fn has_route(&self, path: &str) -> bool {
		self.routes.read().contains_key(path)
	}

	/// Lists the registered route paths.
	pub fn routes(&self) -> Vec<String> {
		self.routes.read().keys().cloned().collect()
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.read().len()
	}

	/// Returns the route currently displayed.
	pub fn current_route(&self) -> Option<Route> {
		self.state.lock().current.clone()
	}

	/// Returns the route displayed before the current one.
	pub fn previous_route(&self) -> Option<Route> {
		self.state.lock().previous.clone()
	}

	/// Returns whether a navigation is in flight.
	pub fn is_navigating(&self) -> bool {
		self.navigating.load(Ordering::SeqCst)
	}

	/// The template engine registry, for template/partial/helper
	/// registration after construction.
	pub fn engine(&self) -> &RwLock<TemplateEngine> {
		&self.engine
	}

	/// Navigates to the configured default route, replacing the current
	/// history entry.
	pub async fn start(&self) -> NavigationOutcome {
		let default_route = self.config.default_route.clone();
		self.navigate_with(&default_route, NavigateOptions { replace: true })
			.await
	}

	/// Navigates to `path`, pushing a history entry.
	pub async fn navigate(&self, path: &str) -> NavigationOutcome {
		self.navigate_with(path, NavigateOptions::default()).await
	}

	/// Navigates to `path`, replacing the current history entry.
	pub async fn replace(&self, path: &str) -> NavigationOutcome {
		self.navigate_with(path, NavigateOptions { replace: true })
			.await
	}

	/// Steps back one history entry when a history surface is attached.
	pub fn back(&self) {
		if let Some(history) = &self.history {
			history.back();
		}
	}

	/// Steps forward one history entry when a history surface is attached.
	pub fn forward(&self) {
		if let Some(history) = &self.history {
			history.forward();
		}
	}

	/// Navigates to `path`.
	///
	/// Returns [`NavigationOutcome::AlreadyNavigating`] while another
	/// navigation is in flight. Middleware or hook rejections return
	/// [`NavigationOutcome::Rejected`] with no visible effect. Failures are
	/// surfaced through the display's error path and returned as
	/// [`NavigationOutcome::Failed`]; the current route is untouched.
	pub async fn navigate_with(&self, path: &str, options: NavigateOptions) -> NavigationOutcome {
		if self.navigating.swap(true, Ordering::SeqCst) {
			tracing::debug!(%path, "navigation dropped, another is in flight");
			return NavigationOutcome::AlreadyNavigating;
		}
		let _idle = IdleGuard {
			navigating: &self.navigating,
			display: self.config.enable_transitions.then_some(&self.display),
		};

		if self.config.enable_transitions {
			self.display.set_loading(true);
		}

		match self.run_pipeline(path, options).await {
			Ok(true) => NavigationOutcome::Completed,
			Ok(false) => {
				tracing::debug!(%path, "navigation declined by middleware or hook");
				NavigationOutcome::Rejected
			}
			Err(err) => {
				tracing::error!(%path, %err, "navigation failed");
				self.display.show_error(&format!("Error loading page: {err}"));
				NavigationOutcome::Failed(err)
			}
		}
	}

	/// The navigation pipeline proper. `Ok(false)` is a silent abort from a
	/// middleware or `before_enter`; errors are handled by the caller.
	async fn run_pipeline(
		&self,
		path: &str,
		options: NavigateOptions,
	) -> Result<bool, NavigationError> {
		let route = self
			.routes
			.read()
			.get(path)
			.cloned()
			.ok_or_else(|| NavigationError::RouteNotFound(path.to_string()))?;
		let current = self.state.lock().current.clone();

		let middlewares: Vec<_> = self.middlewares.read().iter().cloned().collect();
		for middleware in middlewares {
			if !middleware.handle(&route, current.as_ref()).await {
				return Ok(false);
			}
		}
		if let Some(hook) = &route.before_enter {
			if !hook.run(&route, current.as_ref()).await {
				return Ok(false);
			}
		}

		let context = self.prepare_context(&route).await;
		let html = self.render_route(&route, &context).await?;
		self.commit_content(&html).await?;

		if let Some(handler) = &route.handler {
			handler.handle(&route, &context).await;
		}

		if let Some(history) = &self.history {
			if options.replace {
				history.replace(&route.path);
			} else {
				history.push(&route.path);
			}
		}

		let previous = {
			let mut state = self.state.lock();
			let previous = state.current.take();
			state.previous = previous.clone();
			state.current = Some(route.clone());
			previous
		};

		let title = match &self.config.title_suffix {
			Some(suffix) => format!("{}{}", route.title, suffix),
			None => route.title.clone(),
		};
		self.display.set_title(&title);
		self.display.set_active_path(&route.path);

		if let Some(hook) = &route.after_enter {
			hook.run(&route, previous.as_ref()).await;
		}

		if let Some(events) = &self.events {
			events.publish(
				ROUTE_CHANGED_EVENT,
				json!({
					"current": { "path": route.path, "title": route.title },
					"previous": previous.as_ref().map(|route| json!({
						"path": route.path,
						"title": route.title,
					})),
				}),
			);
		}

		Ok(true)
	}

	/// Builds the render context: static route data, then provider data,
	/// then the controller-injected fields; later layers win on collision.
	async fn prepare_context(&self, route: &Route) -> Context {
		let mut context = Context::from_map(route.data.clone());
		if let Some(provider) = &self.data_provider {
			match provider.data_for_route(&route.path).await {
				Ok(data) => context.merge(data),
				Err(err) => {
					tracing::warn!(
						path = %route.path,
						%err,
						"route data unavailable, rendering with static data"
					);
				}
			}
		}
		context.insert("currentRoute", route.path.as_str());
		context.insert("currentDate", Utc::now().to_rfc3339());
		context
	}

	/// Resolves the route's template and renders it. Inline text renders
	/// directly; otherwise the template is fetched once per route path and
	/// cached in the engine registry for subsequent navigations.
	async fn render_route(
		&self,
		route: &Route,
		context: &Context,
	) -> Result<String, NavigationError> {
		if let Some(template) = &route.template {
			return Ok(self.engine.read().process(template, context));
		}
		if !self.engine.read().has_template(&route.path) {
			let fetcher = self.fetcher.as_ref().ok_or_else(|| {
				NavigationError::Transport("no template fetcher configured".to_string())
			})?;
			let text = fetcher
				.fetch(&route.template_url)
				.await
				.map_err(|err| NavigationError::Transport(err.to_string()))?;
			self.engine
				.write()
				.register_template(route.path.clone(), text);
		}
		self.engine
			.read()
			.render(&route.path, context)
			.map_err(|err| NavigationError::Render(err.to_string()))
	}

	/// Commits rendered content. With transitions enabled the swap is paced
	/// by the configured fade: hide, wait the fade-out share of the
	/// duration, swap, wait the remainder, reveal.
	async fn commit_content(&self, html: &str) -> Result<(), NavigationError> {
		if !self.config.enable_transitions {
			return self.display.set_content(html).map_err(NavigationError::from);
		}

		let fade_out = self
			.config
			.transition_duration
			.mul_f64(self.config.fade_split.clamp(0.0, 1.0));
		let fade_in = self.config.transition_duration.saturating_sub(fade_out);

		self.display.set_content_visible(false);
		tokio::time::sleep(fade_out).await;
		self.display.set_content(html)?;
		tokio::time::sleep(fade_in).await;
		self.display.set_content_visible(true);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SurfaceError;

	struct NullDisplay;

	impl DisplaySurface for NullDisplay {
		fn set_content(&self, _html: &str) -> Result<(), SurfaceError> {
			Ok(())
		}
		fn set_content_visible(&self, _visible: bool) {}
		fn set_title(&self, _title: &str) {}
		fn set_loading(&self, _visible: bool) {}
		fn show_error(&self, _message: &str) {}
		fn set_active_path(&self, _path: &str) {}
	}

	fn test_router() -> Router {
		Router::new(TemplateEngine::new(), Arc::new(NullDisplay))
	}

	#[test]
	fn test_router_new_is_empty_and_idle() {
		let router = test_router();
		assert_eq!(router.route_count(), 0);
		assert!(!router.is_navigating());
		assert!(router.current_route().is_none());
	}

	#[test]
	fn test_router_add_route_chaining() {
		let router = test_router()
			.add_route("home", RouteConfig::new().template("h"))
			.add_route("about", RouteConfig::new().template("a"));

		assert_eq!(router.route_count(), 2);
		assert!(router.has_route("home"));
		assert!(router.has_route("about"));
		assert!(!router.has_route("contact"));
	}

	#[test]
	fn test_router_add_route_overwrites_same_path() {
		let router = test_router()
			.add_route("home", RouteConfig::new().title("First"))
			.add_route("home", RouteConfig::new().title("Second"));

		assert_eq!(router.route_count(), 1);
		let paths = router.routes();
		assert_eq!(paths, vec!["home".to_string()]);
	}

	#[test]
	fn test_router_remove_route() {
		let router = test_router().add_route("home", RouteConfig::new());

		assert!(router.remove_route("home"));
		assert!(!router.remove_route("home"));
		assert_eq!(router.route_count(), 0);
	}

	#[test]
	fn test_router_update_route_merges() {
		let router = test_router()
			.add_route("home", RouteConfig::new().template("body").title("Old"));

		assert!(router.update_route("home", RouteConfig::new().title("New")));
		assert!(!router.update_route("ghost", RouteConfig::new()));

		let routes = router.routes.read();
		let route = routes.get("home").unwrap();
		assert_eq!(route.title, "New");
		assert_eq!(route.template.as_deref(), Some("body"));
	}

	#[tokio::test]
	async fn test_navigate_unknown_route_fails_and_resets() {
		let router = test_router();

		let outcome = router.navigate("ghost").await;
		assert_eq!(
			outcome,
			NavigationOutcome::Failed(NavigationError::RouteNotFound("ghost".to_string()))
		);
		assert!(!router.is_navigating());
		assert!(router.current_route().is_none());
	}

	#[tokio::test]
	async fn test_navigate_inline_template_completes() {
		let config = RouterConfig {
			enable_transitions: false,
			..RouterConfig::default()
		};
		let router = test_router()
			.with_config(config)
			.add_route("home", RouteConfig::new().template("<h1>hi</h1>"));

		let outcome = router.navigate("home").await;
		assert!(outcome.is_completed());
		assert_eq!(router.current_route().unwrap().path, "home");
		assert!(!router.is_navigating());
	}

	#[test]
	fn test_navigation_outcome_is_completed() {
		assert!(NavigationOutcome::Completed.is_completed());
		assert!(!NavigationOutcome::Rejected.is_completed());
		assert!(!NavigationOutcome::AlreadyNavigating.is_completed());
	}
}
