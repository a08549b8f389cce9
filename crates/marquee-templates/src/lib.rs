//! # Marquee Templates
//!
//! Directive-based string template engine for the Marquee application shell.
//!
//! Templates are plain strings carrying five directive kinds, resolved in a
//! fixed order so each pass can treat the others' syntax as opaque literal
//! text:
//!
//! 1. Partial inclusion: `{{>name}}`
//! 2. Iteration: `{{#each items}}...{{/each}}` exposing `this`, `@index`,
//!    `@first`, `@last` and `@length`
//! 3. Conditionals: `{{#if cond}}...{{else}}...{{/if}}` and
//!    `{{#unless cond}}...{{/unless}}`
//! 4. Interpolation: `{{path}}` (HTML-escaped) and `{{{path}}}` (raw)
//! 5. Helper calls: `{{helper arg1 arg2}}`
//!
//! Directive faults never fail a render: unknown partials and helpers stay
//! literal, failing helpers are logged and stay literal, and missing context
//! keys render as the empty string.
//!
//! ## Example
//!
//! ```rust
//! use marquee_templates::{Context, TemplateEngine};
//!
//! let mut engine = TemplateEngine::new();
//! engine.register_template(
//!     "cart",
//!     "{{#each items}}{{this.name}}{{#unless @last}}, {{/unless}}{{/each}}",
//! );
//!
//! let mut context = Context::new();
//! context.insert("items", serde_json::json!([
//!     { "name": "café" },
//!     { "name": "pan" },
//! ]));
//!
//! assert_eq!(engine.render("cart", &context).unwrap(), "café, pan");
//! ```

mod condition;
pub mod context;
mod engine;
pub mod error;
pub mod escaping;
pub mod helpers;
pub mod registry;

pub use context::Context;
pub use engine::TemplateEngine;
pub use error::TemplateError;
pub use escaping::{escape_html, unescape_html};
pub use helpers::{Helper, HelperError, HelperResult};
pub use registry::DirectiveRegistry;

#[cfg(test)]
mod tests;
