//! # Marquee
//!
//! A client-side application shell for Rust: a directive-based string
//! template engine paired with a single-page navigation controller.
//!
//! Marquee lets an embedder swap "views" in an addressable content region
//! without a full reload. Templates carry partials, loops, conditionals,
//! interpolation and helper calls; the router resolves paths to routes,
//! drives a middleware/lifecycle pipeline, renders through the engine, and
//! serializes concurrent navigation attempts.
//!
//! ## Feature Flags
//!
//! - `templates` - The template engine only
//! - `router` - The navigation controller (pulls in `templates`)
//! - `full` (default) - Everything
//!
//! ## Quick Example
//!
//! ```rust
//! use marquee::templates::{Context, TemplateEngine};
//!
//! let mut engine = TemplateEngine::new();
//! engine.register_template(
//!     "greeting",
//!     "{{#if user}}Hola {{user.name}}{{else}}Hola{{/if}}",
//! );
//!
//! let mut context = Context::new();
//! context.insert("user", serde_json::json!({ "name": "Ana" }));
//!
//! assert_eq!(engine.render("greeting", &context).unwrap(), "Hola Ana");
//! ```
//!
//! The router side is driven through collaborator traits (display surface,
//! history, template fetcher, data provider, notification bus) supplied
//! explicitly at construction. See [`router`] for the full pipeline.

#[cfg(feature = "router")]
pub use marquee_router as router;
#[cfg(feature = "templates")]
pub use marquee_templates as templates;

/// Commonly used types, re-exported flat.
pub mod prelude {
	#[cfg(feature = "router")]
	pub use marquee_router::{
		handler_fn, hook_fn, middleware_fn, DisplaySurface, EventBus, HistorySurface, Middleware,
		NavigateOptions, NavigationError, NavigationOutcome, Route, RouteConfig,
		RouteDataProvider, RouteHandler, RouteHook, Router, RouterConfig, TemplateFetcher,
	};
	#[cfg(feature = "templates")]
	pub use marquee_templates::{Context, DirectiveRegistry, TemplateEngine, TemplateError};
}
