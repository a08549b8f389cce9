//! Conditional directive evaluation.
//!
//! The grammar is deliberately restricted: an optional leading `!` negating
//! a key's truthiness, a single binary comparison whose operands are
//! literals or context lookups, or a bare key checked for truthiness.
//! Anything more expressive belongs in a helper.

use crate::context::Context;
use serde_json::Value;

/// Comparison operators, longest first so `===` wins over `==`.
const OPERATORS: [&str; 8] = ["===", "!==", "==", "!=", ">=", "<=", ">", "<"];

/// Evaluates a conditional expression against the context.
pub(crate) fn evaluate(condition: &str, context: &Context) -> bool {
    let condition = condition.trim();

    if let Some(rest) = condition.strip_prefix('!') {
        return !is_truthy(context.lookup(rest.trim()));
    }

    for op in OPERATORS {
        if let Some(pos) = condition.find(op) {
            let left = resolve_operand(&condition[..pos], context);
            let right = resolve_operand(&condition[pos + op.len()..], context);
            return compare(op, left.as_ref(), right.as_ref());
        }
    }

    is_truthy(context.lookup(condition))
}

/// Template truthiness: `false`, null, absent, the empty string, an empty
/// array, an object with zero keys, and numeric zero are falsy; everything
/// else is truthy.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
    }
}

/// Resolves one operand: a quoted string, a number, `true`/`false`/`null`,
/// or a context lookup. The `undefined` literal and absent lookups both
/// resolve to `None`.
fn resolve_operand(token: &str, context: &Context) -> Option<Value> {
    let token = token.trim();

    if is_quoted(token) {
        return Some(Value::String(token[1..token.len() - 1].to_string()));
    }
    if looks_numeric(token) {
        if let Ok(n) = token.parse::<f64>() {
            return serde_json::Number::from_f64(n).map(Value::Number);
        }
    }
    match token {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        "undefined" => None,
        _ => context.lookup(token).cloned(),
    }
}

/// Rejects word-shaped tokens (`inf`, `nan`) that `f64::from_str` would
/// otherwise accept as numbers.
fn looks_numeric(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
}

fn is_quoted(token: &str) -> bool {
    token.len() >= 2
        && ((token.starts_with('"') && token.ends_with('"'))
            || (token.starts_with('\'') && token.ends_with('\'')))
}

fn compare(op: &str, left: Option<&Value>, right: Option<&Value>) -> bool {
    match op {
        "===" => strict_eq(left, right),
        "!==" => !strict_eq(left, right),
        "==" => loose_eq(left, right),
        "!=" => !loose_eq(left, right),
        _ => ordering(op, left, right),
    }
}

/// Strict equality: operand shapes must match; numbers compare as `f64`.
fn strict_eq(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Loose equality: null and absent are mutually equal, and operands that
/// coerce to numbers (numbers, numeric strings, booleans) compare
/// numerically.
fn loose_eq(left: Option<&Value>, right: Option<&Value>) -> bool {
    let left_nullish = matches!(left, None | Some(Value::Null));
    let right_nullish = matches!(right, None | Some(Value::Null));
    if left_nullish || right_nullish {
        return left_nullish && right_nullish;
    }
    if let (Some(a), Some(b)) = (as_number(left), as_number(right)) {
        return a == b;
    }
    left == right
}

/// Numeric coercion used by loose equality and the ordering operators.
fn as_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Orderings compare numerically when both operands coerce to numbers,
/// lexicographically when both are strings, and are false otherwise.
fn ordering(op: &str, left: Option<&Value>, right: Option<&Value>) -> bool {
    if let (Some(a), Some(b)) = (as_number(left), as_number(right)) {
        return match op {
            ">=" => a >= b,
            "<=" => a <= b,
            ">" => a > b,
            "<" => a < b,
            _ => false,
        };
    }
    if let (Some(Value::String(a)), Some(Value::String(b))) = (left, right) {
        return match op {
            ">=" => a >= b,
            "<=" => a <= b,
            ">" => a > b,
            "<" => a < b,
            _ => false,
        };
    }
    false
}
