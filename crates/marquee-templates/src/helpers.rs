//! Helper functions callable from templates
//!
//! A helper is a named function receiving already-resolved argument values
//! and returning the replacement text for its directive. Failures stay at
//! the call site: the engine logs them and leaves the directive literal, so
//! a broken helper can never abort a render.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::context::value_to_string;

/// Error returned by a failing helper invocation.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HelperError(String);

impl HelperError {
    /// Creates a helper error with the given message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Result type for helper invocations.
pub type HelperResult = Result<String, HelperError>;

/// A registered helper function.
pub type Helper = Arc<dyn Fn(&[Value]) -> HelperResult + Send + Sync>;

/// Format a date value
///
/// `{{formatDate value format}}` accepts an RFC 3339 string, a plain
/// `YYYY-MM-DD` string, or a millisecond timestamp. Supported formats are
/// `short` (default), `long`, `time` and `datetime`. Unparseable input is
/// echoed back unchanged.
///
/// # Example
/// ```
/// use marquee_templates::helpers::format_date;
/// use serde_json::json;
///
/// let out = format_date(&[json!("2026-03-14"), json!("short")]).unwrap();
/// assert_eq!(out, "14/03/2026");
/// ```
pub fn format_date(args: &[Value]) -> HelperResult {
    let Some(raw) = args.first() else {
        return Ok(String::new());
    };
    if raw.is_null() {
        return Ok(String::new());
    }
    let Some(date) = parse_date(raw) else {
        return Ok(value_to_string(raw));
    };
    let pattern = match args.get(1).and_then(Value::as_str).unwrap_or("short") {
        "long" => "%-d %B %Y",
        "time" => "%H:%M:%S",
        "datetime" => "%d/%m/%Y %H:%M:%S",
        _ => "%d/%m/%Y",
    };
    Ok(date.format(pattern).to_string())
}

fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| Utc.from_utc_datetime(&dt))
            }),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// Capitalize a string
///
/// `{{capitalize value}}` uppercases the first character and lowercases the
/// rest. Null or missing input renders as the empty string.
///
/// # Example
/// ```
/// use marquee_templates::helpers::capitalize;
/// use serde_json::json;
///
/// assert_eq!(capitalize(&[json!("hELLO")]).unwrap(), "Hello");
/// ```
pub fn capitalize(args: &[Value]) -> HelperResult {
    let Some(value) = args.first() else {
        return Ok(String::new());
    };
    if value.is_null() {
        return Ok(String::new());
    }
    let s = value
        .as_str()
        .ok_or_else(|| HelperError::msg("capitalize requires a string"))?;
    let mut chars = s.chars();
    Ok(match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    })
}

/// Truncate a string to a specified length
///
/// `{{truncate value length suffix}}`: length defaults to 100, suffix to
/// `...`. Uses character count, not byte count.
///
/// # Example
/// ```
/// use marquee_templates::helpers::truncate;
/// use serde_json::json;
///
/// let out = truncate(&[json!("Hello World"), json!(5)]).unwrap();
/// assert_eq!(out, "Hello...");
/// ```
pub fn truncate(args: &[Value]) -> HelperResult {
    let Some(value) = args.first() else {
        return Ok(String::new());
    };
    if value.is_null() {
        return Ok(String::new());
    }
    let s = value
        .as_str()
        .ok_or_else(|| HelperError::msg("truncate requires a string"))?;
    let length = args
        .get(1)
        .and_then(Value::as_f64)
        .map(|n| n as usize)
        .unwrap_or(100);
    let suffix = args.get(2).and_then(Value::as_str).unwrap_or("...");

    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= length {
        return Ok(s.to_string());
    }
    let truncated: String = chars[..length].iter().collect();
    Ok(format!("{truncated}{suffix}"))
}

/// Format an amount as currency
///
/// `{{currency amount code}}` renders two decimals, comma-grouped
/// thousands, and a currency symbol when one is known (`CRC` is the
/// default code).
/// Non-numeric input is echoed back unchanged.
///
/// # Example
/// ```
/// use marquee_templates::helpers::currency;
/// use serde_json::json;
///
/// assert_eq!(currency(&[json!(1234.5)]).unwrap(), "₡1,234.50");
/// assert_eq!(currency(&[json!(99), json!("USD")]).unwrap(), "$99.00");
/// ```
pub fn currency(args: &[Value]) -> HelperResult {
    let Some(value) = args.first() else {
        return Ok(String::new());
    };
    let amount = value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()));
    let Some(amount) = amount else {
        return Ok(value_to_string(value));
    };
    let code = args.get(1).and_then(Value::as_str).unwrap_or("CRC");
    let symbol = match code {
        "CRC" => "₡",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    };
    let sign = if amount < 0.0 { "-" } else { "" };
    let formatted = group_thousands(amount.abs());
    if symbol.is_empty() {
        Ok(format!("{sign}{code} {formatted}"))
    } else {
        Ok(format!("{sign}{symbol}{formatted}"))
    }
}

fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (integer, decimals) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{grouped}.{decimals}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_date_short_and_datetime() {
        let args = [json!("2026-08-07T10:30:00Z")];
        assert_eq!(format_date(&args).unwrap(), "07/08/2026");

        let args = [json!("2026-08-07T10:30:00Z"), json!("datetime")];
        assert_eq!(format_date(&args).unwrap(), "07/08/2026 10:30:00");

        let args = [json!("2026-08-07T10:30:00Z"), json!("time")];
        assert_eq!(format_date(&args).unwrap(), "10:30:00");
    }

    #[test]
    fn test_format_date_echoes_unparseable() {
        assert_eq!(format_date(&[json!("soon")]).unwrap(), "soon");
    }

    #[test]
    fn test_format_date_empty_for_null() {
        assert_eq!(format_date(&[json!(null)]).unwrap(), "");
        assert_eq!(format_date(&[]).unwrap(), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize(&[json!("hello")]).unwrap(), "Hello");
        assert_eq!(capitalize(&[json!("WORLD")]).unwrap(), "World");
        assert_eq!(capitalize(&[json!("")]).unwrap(), "");
        assert!(capitalize(&[json!(5)]).is_err());
    }

    #[test]
    fn test_truncate_defaults_and_suffix() {
        let long = "x".repeat(120);
        let out = truncate(&[json!(long)]).unwrap();
        assert_eq!(out.chars().count(), 103);
        assert!(out.ends_with("..."));

        let out = truncate(&[json!("abcdef"), json!(3), json!("…")]).unwrap();
        assert_eq!(out, "abc…");

        assert_eq!(truncate(&[json!("short"), json!(10)]).unwrap(), "short");
    }

    #[test]
    fn test_currency_formats() {
        assert_eq!(currency(&[json!(1234567.891)]).unwrap(), "₡1,234,567.89");
        assert_eq!(currency(&[json!(0)]).unwrap(), "₡0.00");
        assert_eq!(currency(&[json!(-42.5), json!("EUR")]).unwrap(), "-€42.50");
        assert_eq!(currency(&[json!(10), json!("GBP")]).unwrap(), "GBP 10.00");
        assert_eq!(currency(&[json!("12.5")]).unwrap(), "₡12.50");
        assert_eq!(currency(&[json!("free")]).unwrap(), "free");
    }
}
