//! Render context for template processing.
//!
//! A [`Context`] is the key/value structure a template is rendered against.
//! Values are `serde_json` values looked up by dot-separated paths; missing
//! keys resolve to an absent value, never an error. The iteration pass
//! derives per-item child contexts carrying the reserved keys `this`,
//! `@index`, `@first`, `@last` and `@length`.

use serde::Serialize;
use serde_json::{Map, Value};

/// Key/value data a template is rendered against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    /// Creates an empty context.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee_templates::Context;
    ///
    /// let mut context = Context::new();
    /// context.insert("name", "World");
    /// assert!(context.lookup("name").is_some());
    /// ```
    pub fn new() -> Self {
        Self { values: Map::new() }
    }

    /// Creates a context from an existing JSON object map.
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Inserts a value under `key`, replacing any previous value.
    ///
    /// Values that fail to serialize are stored as `null`.
    pub fn insert<T: Serialize>(&mut self, key: impl Into<String>, value: T) {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.values.insert(key.into(), value);
    }

    /// Overlays every entry of `other` onto this context, replacing
    /// colliding keys.
    pub fn merge(&mut self, other: Map<String, Value>) {
        for (key, value) in other {
            self.values.insert(key, value);
        }
    }

    /// Looks up a dot-separated path.
    ///
    /// Returns `None` when any segment is missing or a non-object value is
    /// indexed further; lookups never fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee_templates::Context;
    /// use serde_json::json;
    ///
    /// let mut context = Context::new();
    /// context.insert("user", json!({ "name": "Ana" }));
    ///
    /// assert_eq!(context.lookup("user.name"), Some(&json!("Ana")));
    /// assert_eq!(context.lookup("user.missing"), None);
    /// ```
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns the underlying map.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Derives the scope for one loop iteration: the outer context overlaid
    /// with the current item and the iteration metadata keys.
    pub(crate) fn for_item(&self, item: &Value, index: usize, len: usize) -> Context {
        let mut scope = self.clone();
        scope.values.insert("this".to_string(), item.clone());
        scope.values.insert("@index".to_string(), Value::from(index));
        scope.values.insert("@first".to_string(), Value::from(index == 0));
        scope
            .values
            .insert("@last".to_string(), Value::from(index + 1 == len));
        scope.values.insert("@length".to_string(), Value::from(len));
        scope
    }
}

/// Renders a value the way the interpolation passes print it: strings
/// verbatim, numbers and booleans via `Display`, null as the empty string,
/// arrays and objects as compact JSON.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
