//! Registry for named helpers and partial fragments
//!
//! The registry is a pure lookup table: the engine consults it during the
//! partial and helper passes, and registration always overwrites silently.

use crate::helpers::{self, Helper, HelperResult};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lookup table for helper functions and partial fragments.
#[derive(Clone, Default)]
pub struct DirectiveRegistry {
    helpers: HashMap<String, Helper>,
    partials: HashMap<String, String>,
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .field("partials", &self.partials.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl DirectiveRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry preloaded with the default helpers: `formatDate`,
    /// `capitalize`, `truncate` and `currency`.
    pub fn with_default_helpers() -> Self {
        let mut registry = Self::new();
        registry.register_helper("formatDate", helpers::format_date);
        registry.register_helper("capitalize", helpers::capitalize);
        registry.register_helper("truncate", helpers::truncate);
        registry.register_helper("currency", helpers::currency);
        registry
    }

    /// Registers a helper under `name`, replacing any previous one.
    pub fn register_helper<F>(&mut self, name: impl Into<String>, helper: F)
    where
        F: Fn(&[Value]) -> HelperResult + Send + Sync + 'static,
    {
        self.helpers.insert(name.into(), Arc::new(helper));
    }

    /// Registers a partial fragment under `name`, replacing any previous one.
    pub fn register_partial(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.partials.insert(name.into(), content.into());
    }

    /// Looks up a helper by name.
    pub fn helper(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }

    /// Looks up a partial by name.
    pub fn partial(&self, name: &str) -> Option<&str> {
        self.partials.get(name).map(String::as_str)
    }

    /// Returns whether a helper is registered under `name`.
    pub fn has_helper(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Returns whether a partial is registered under `name`.
    pub fn has_partial(&self, name: &str) -> bool {
        self.partials.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_helpers_present() {
        let registry = DirectiveRegistry::with_default_helpers();

        for name in ["formatDate", "capitalize", "truncate", "currency"] {
            assert!(registry.has_helper(name), "missing default helper {name}");
        }
    }

    #[test]
    fn test_registration_overwrites() {
        let mut registry = DirectiveRegistry::new();
        registry.register_helper("shout", |_args| Ok("first".to_string()));
        registry.register_helper("shout", |_args| Ok("second".to_string()));

        let helper = registry.helper("shout").unwrap();
        assert_eq!(helper(&[]).unwrap(), "second");

        registry.register_partial("header", "<h1>old</h1>");
        registry.register_partial("header", "<h1>new</h1>");
        assert_eq!(registry.partial("header"), Some("<h1>new</h1>"));
    }

    #[test]
    fn test_unknown_lookups_are_none() {
        let registry = DirectiveRegistry::new();
        assert!(registry.helper("nope").is_none());
        assert!(registry.partial("nope").is_none());
    }
}
