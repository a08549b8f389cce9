//! Route descriptors and their configuration.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::hooks::{RouteHandler, RouteHook};

/// A single route definition.
///
/// `path` is the uniqueness invariant: the route table never holds two
/// routes for the same path.
pub struct Route {
	/// The unique path identifier.
	pub path: String,
	/// Inline template text; when absent, the template is lazily fetched
	/// from `template_url` once and cached under the route path.
	pub template: Option<String>,
	/// Source URL for lazy template loading.
	pub template_url: String,
	/// Optional post-render callback.
	pub handler: Option<Arc<dyn RouteHandler>>,
	/// Optional pre-entry hook; an explicit `false` aborts the navigation.
	pub before_enter: Option<Arc<dyn RouteHook>>,
	/// Optional post-entry hook.
	pub after_enter: Option<Arc<dyn RouteHook>>,
	/// Page title committed on entry.
	pub title: String,
	/// Static context data merged at render time.
	pub data: Map<String, Value>,
}

impl Clone for Route {
	fn clone(&self) -> Self {
		Self {
			path: self.path.clone(),
			template: self.template.clone(),
			template_url: self.template_url.clone(),
			handler: self.handler.clone(),
			before_enter: self.before_enter.clone(),
			after_enter: self.after_enter.clone(),
			title: self.title.clone(),
			data: self.data.clone(),
		}
	}
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("path", &self.path)
			.field("template", &self.template.as_deref().map(|_| "<inline>"))
			.field("template_url", &self.template_url)
			.field("title", &self.title)
			.field("has_handler", &self.handler.is_some())
			.field("has_before_enter", &self.before_enter.is_some())
			.field("has_after_enter", &self.after_enter.is_some())
			.finish()
	}
}

impl Route {
	/// Builds a route from its path and configuration, applying the
	/// defaults: `templates/{path}.html` as the fetch URL and the
	/// capitalized path as the title.
	pub fn from_config(path: impl Into<String>, config: RouteConfig) -> Self {
		let path = path.into();
		let template_url = config
			.template_url
			.unwrap_or_else(|| format!("templates/{path}.html"));
		let title = config.title.unwrap_or_else(|| capitalize_first(&path));
		Self {
			path,
			template: config.template,
			template_url,
			handler: config.handler,
			before_enter: config.before_enter,
			after_enter: config.after_enter,
			title,
			data: config.data.unwrap_or_default(),
		}
	}

	/// Merges a partial configuration into this route: present fields
	/// override, absent fields keep their current values.
	pub fn apply(&mut self, config: RouteConfig) {
		if let Some(template) = config.template {
			self.template = Some(template);
		}
		if let Some(url) = config.template_url {
			self.template_url = url;
		}
		if let Some(handler) = config.handler {
			self.handler = Some(handler);
		}
		if let Some(hook) = config.before_enter {
			self.before_enter = Some(hook);
		}
		if let Some(hook) = config.after_enter {
			self.after_enter = Some(hook);
		}
		if let Some(title) = config.title {
			self.title = title;
		}
		if let Some(data) = config.data {
			self.data = data;
		}
	}
}

/// Builder-style route configuration.
///
/// Unset fields fall back to defaults when a route is created and keep the
/// existing values when one is updated.
#[derive(Clone, Default)]
pub struct RouteConfig {
	pub(crate) template: Option<String>,
	pub(crate) template_url: Option<String>,
	pub(crate) handler: Option<Arc<dyn RouteHandler>>,
	pub(crate) before_enter: Option<Arc<dyn RouteHook>>,
	pub(crate) after_enter: Option<Arc<dyn RouteHook>>,
	pub(crate) title: Option<String>,
	pub(crate) data: Option<Map<String, Value>>,
}

impl fmt::Debug for RouteConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteConfig")
			.field("template", &self.template.as_deref().map(|_| "<inline>"))
			.field("template_url", &self.template_url)
			.field("title", &self.title)
			.field("has_handler", &self.handler.is_some())
			.field("has_before_enter", &self.before_enter.is_some())
			.field("has_after_enter", &self.after_enter.is_some())
			.finish()
	}
}

impl RouteConfig {
	/// Creates an empty configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets inline template text, bypassing lazy loading.
	pub fn template(mut self, text: impl Into<String>) -> Self {
		self.template = Some(text.into());
		self
	}

	/// Sets the URL the template is lazily fetched from.
	pub fn template_url(mut self, url: impl Into<String>) -> Self {
		self.template_url = Some(url.into());
		self
	}

	/// Sets the page title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Sets the static context data.
	pub fn data(mut self, data: Map<String, Value>) -> Self {
		self.data = Some(data);
		self
	}

	/// Sets the post-render handler.
	pub fn handler(mut self, handler: Arc<dyn RouteHandler>) -> Self {
		self.handler = Some(handler);
		self
	}

	/// Sets the pre-entry hook.
	pub fn before_enter(mut self, hook: Arc<dyn RouteHook>) -> Self {
		self.before_enter = Some(hook);
		self
	}

	/// Sets the post-entry hook.
	pub fn after_enter(mut self, hook: Arc<dyn RouteHook>) -> Self {
		self.after_enter = Some(hook);
		self
	}
}

fn capitalize_first(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_from_config_defaults() {
		let route = Route::from_config("about", RouteConfig::new());

		assert_eq!(route.path, "about");
		assert_eq!(route.template_url, "templates/about.html");
		assert_eq!(route.title, "About");
		assert!(route.template.is_none());
		assert!(route.data.is_empty());
	}

	#[test]
	fn test_from_config_explicit_fields() {
		let mut data = Map::new();
		data.insert("greeting".to_string(), json!("hola"));

		let route = Route::from_config(
			"home",
			RouteConfig::new()
				.template("<h1>{{greeting}}</h1>")
				.title("Inicio")
				.data(data),
		);

		assert_eq!(route.template.as_deref(), Some("<h1>{{greeting}}</h1>"));
		assert_eq!(route.title, "Inicio");
		assert_eq!(route.data.get("greeting"), Some(&json!("hola")));
	}

	#[test]
	fn test_apply_merges_field_by_field() {
		let mut route = Route::from_config(
			"home",
			RouteConfig::new().template("old").title("Old"),
		);

		route.apply(RouteConfig::new().title("New"));

		// Present fields override, absent fields keep their values.
		assert_eq!(route.title, "New");
		assert_eq!(route.template.as_deref(), Some("old"));
		assert_eq!(route.template_url, "templates/home.html");
	}
}
