//! # Marquee Router
//!
//! Single-page navigation controller for the Marquee application shell.
//!
//! The [`Router`] resolves a path against its route table, runs the
//! middleware chain and lifecycle hooks, renders the route's template
//! through [`marquee_templates::TemplateEngine`], commits the result to a
//! [`DisplaySurface`], and updates history, title and active-link state.
//! Navigations are strictly single-flight: a request arriving while one is
//! in flight is rejected, never queued.
//!
//! All collaborators (display, history, template fetcher, data provider,
//! notification bus) are supplied explicitly at construction. The router
//! has no ambient globals and no DOM dependency of its own.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use marquee_router::{RouteConfig, Router};
//! use marquee_templates::TemplateEngine;
//!
//! let router = Router::new(TemplateEngine::new(), Arc::new(DomSurface::new()))
//!     .add_route("home", RouteConfig::new().template("<h1>{{title}}</h1>"))
//!     .add_route("about", RouteConfig::new().title("About us"))
//!     .use_middleware(marquee_router::middleware_fn(|to, _from| {
//!         to.path != "admin"
//!     }));
//!
//! router.start().await;
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod middleware;
pub mod route;
pub mod router;
pub mod surface;

pub use config::RouterConfig;
pub use error::{DataError, FetchError, NavigationError, SurfaceError};
pub use hooks::{handler_fn, hook_fn, RouteHandler, RouteHook};
pub use middleware::{middleware_fn, LoggingMiddleware, Middleware};
pub use route::{Route, RouteConfig};
pub use router::{NavigateOptions, NavigationOutcome, Router};
pub use surface::{
	DisplaySurface, EventBus, HistorySurface, RouteDataProvider, TemplateFetcher,
	ROUTE_CHANGED_EVENT,
};
