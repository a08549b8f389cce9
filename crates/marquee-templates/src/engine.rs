//! The template engine: named templates plus the five-pass processor.
//!
//! Processing applies five ordered passes over the whole string (partials,
//! loops, conditionals, variable interpolation, helpers), and each pass only
//! understands its own directive syntax, treating everything else as literal
//! text. That keeps the grammar regular (no recursive-descent parser) at the
//! cost of re-scanning the string once per pass, which is acceptable for
//! view-sized templates. Same-kind directives do not nest within one pass;
//! nesting across kinds (a loop body containing conditionals and variables)
//! works because block bodies are recursively re-processed.

use crate::condition;
use crate::context::{value_to_string, Context};
use crate::error::TemplateError;
use crate::escaping::escape_html;
use crate::registry::DirectiveRegistry;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

static PARTIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{>\s*(\w+)\s*\}\}").expect("partial directive regex"));
static EACH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{#each\s+([\w@.]+)\s*\}\}(.*?)\{\{/each\}\}").expect("each directive regex")
});
static IF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{#if\s+(.+?)\s*\}\}(.*?)\{\{/if\}\}").expect("if directive regex")
});
static UNLESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{#unless\s+(.+?)\s*\}\}(.*?)\{\{/unless\}\}")
        .expect("unless directive regex")
});
static RAW_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\{\s*([\w@.]+)\s*\}\}\}").expect("raw variable regex"));
static VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([\w@.]+)\s*\}\}").expect("variable regex"));
static HELPER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+)\s+(.+?)\s*\}\}").expect("helper directive regex"));

/// Directive-processing template engine.
///
/// Templates and partials are registered by name; re-registration
/// overwrites. Rendering never mutates the stored source text.
pub struct TemplateEngine {
    templates: HashMap<String, String>,
    registry: DirectiveRegistry,
}

impl fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .field("registry", &self.registry)
            .finish()
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Creates an engine with the default helpers registered.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
            registry: DirectiveRegistry::with_default_helpers(),
        }
    }

    /// Creates an engine over a prepared registry.
    pub fn with_registry(registry: DirectiveRegistry) -> Self {
        Self {
            templates: HashMap::new(),
            registry,
        }
    }

    /// Registers a template body under `name`, replacing any previous one.
    pub fn register_template(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.templates.insert(name.into(), content.into());
    }

    /// Returns whether a template is registered under `name`.
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registers a helper function, replacing any previous one of the same
    /// name.
    pub fn register_helper<F>(&mut self, name: impl Into<String>, helper: F)
    where
        F: Fn(&[Value]) -> crate::helpers::HelperResult + Send + Sync + 'static,
    {
        self.registry.register_helper(name, helper);
    }

    /// Registers a partial fragment, replacing any previous one of the same
    /// name.
    pub fn register_partial(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.registry.register_partial(name, content);
    }

    /// Renders a registered template against `context`.
    ///
    /// Fails only when `name` is unregistered. Directive-level problems
    /// (missing context keys, unknown partials or helpers, helper failures)
    /// degrade the output instead of failing the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee_templates::{Context, TemplateEngine, TemplateError};
    ///
    /// let mut engine = TemplateEngine::new();
    /// engine.register_template("greeting", "Hola {{name}}");
    ///
    /// let mut context = Context::new();
    /// context.insert("name", "Ana");
    /// assert_eq!(engine.render("greeting", &context).unwrap(), "Hola Ana");
    ///
    /// let missing = engine.render("nope", &context).unwrap_err();
    /// assert_eq!(missing, TemplateError::TemplateNotFound("nope".into()));
    /// ```
    pub fn render(&self, name: &str, context: &Context) -> Result<String, TemplateError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| TemplateError::TemplateNotFound(name.to_string()))?;
        Ok(self.process(template, context))
    }

    /// Processes a raw template string against `context`, applying the five
    /// passes in their fixed order.
    pub fn process(&self, template: &str, context: &Context) -> String {
        let result = self.process_partials(template, context);
        let result = self.process_loops(&result, context);
        let result = self.process_conditionals(&result, context);
        let result = self.process_variables(&result, context);
        self.process_helpers(&result, context)
    }

    /// Pass 1: `{{>name}}` is replaced by the fully processed partial
    /// against the same context; unknown names stay literal.
    fn process_partials(&self, template: &str, context: &Context) -> String {
        PARTIAL_RE
            .replace_all(template, |caps: &Captures<'_>| {
                match self.registry.partial(&caps[1]) {
                    Some(partial) => self.process(partial, context),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Pass 2: `{{#each key}}body{{/each}}` re-processes the body once per
    /// element under a derived scope; non-array values yield nothing.
    fn process_loops(&self, template: &str, context: &Context) -> String {
        EACH_RE
            .replace_all(template, |caps: &Captures<'_>| {
                let Some(Value::Array(items)) = context.lookup(&caps[1]) else {
                    return String::new();
                };
                let body = &caps[2];
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let scope = context.for_item(item, index, items.len());
                        self.process(body, &scope)
                    })
                    .collect()
            })
            .into_owned()
    }

    /// Pass 3: `{{#if}}`/`{{else}}`/`{{/if}}` and `{{#unless}}`. Only the
    /// chosen branch is processed; the other branch is discarded untouched.
    fn process_conditionals(&self, template: &str, context: &Context) -> String {
        let result = IF_RE.replace_all(template, |caps: &Captures<'_>| {
            let (then_branch, else_branch) = split_else(&caps[2]);
            if condition::evaluate(&caps[1], context) {
                self.process(then_branch, context)
            } else {
                else_branch
                    .map(|branch| self.process(branch, context))
                    .unwrap_or_default()
            }
        });
        UNLESS_RE
            .replace_all(result.as_ref(), |caps: &Captures<'_>| {
                if condition::evaluate(&caps[1], context) {
                    String::new()
                } else {
                    self.process(&caps[2], context)
                }
            })
            .into_owned()
    }

    /// Pass 4: `{{{path}}}` raw, then `{{path}}` HTML-escaped. Paths are
    /// bare dot-path tokens, so helper invocations (which contain spaces)
    /// survive untouched into pass 5. Absent values render empty.
    fn process_variables(&self, template: &str, context: &Context) -> String {
        let result = RAW_VAR_RE.replace_all(template, |caps: &Captures<'_>| {
            context
                .lookup(&caps[1])
                .map(value_to_string)
                .unwrap_or_default()
        });
        VAR_RE
            .replace_all(result.as_ref(), |caps: &Captures<'_>| {
                context
                    .lookup(&caps[1])
                    .map(|value| escape_html(&value_to_string(value)))
                    .unwrap_or_default()
            })
            .into_owned()
    }

    /// Pass 5: `{{name arg1 arg2}}` for registered helpers. Unknown names
    /// stay literal; a failing helper stays literal and is logged.
    fn process_helpers(&self, template: &str, context: &Context) -> String {
        HELPER_RE
            .replace_all(template, |caps: &Captures<'_>| {
                let name = &caps[1];
                let Some(helper) = self.registry.helper(name) else {
                    return caps[0].to_string();
                };
                let args = parse_arguments(&caps[2], context);
                match helper(&args) {
                    Ok(output) => output,
                    Err(err) => {
                        tracing::error!(helper = name, %err, "helper invocation failed");
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}

/// Splits an if-body on the first `{{else}}` marker.
fn split_else(body: &str) -> (&str, Option<&str>) {
    match body.split_once("{{else}}") {
        Some((then_branch, else_branch)) => (then_branch, Some(else_branch)),
        None => (body, None),
    }
}

/// Parses helper arguments left to right: quoted tokens become string
/// literals, numeric tokens become numbers, everything else resolves as a
/// context lookup (absent resolves to null).
fn parse_arguments(raw: &str, context: &Context) -> Vec<Value> {
    raw.split_whitespace()
        .map(|token| {
            if token.len() >= 2
                && ((token.starts_with('"') && token.ends_with('"'))
                    || (token.starts_with('\'') && token.ends_with('\'')))
            {
                return Value::String(token[1..token.len() - 1].to_string());
            }
            if let Ok(n) = token.parse::<i64>() {
                return Value::from(n);
            }
            if let Ok(n) = token.parse::<f64>() {
                if let Some(number) = serde_json::Number::from_f64(n) {
                    return Value::Number(number);
                }
            }
            context.lookup(token).cloned().unwrap_or(Value::Null)
        })
        .collect()
}
