//! HTML escaping for template security
//!
//! The double-delimited interpolation form escapes values before they reach
//! the page, preventing XSS from user-provided content. The triple-delimited
//! form bypasses escaping for values that are already trusted markup.
//!
//! Escaped characters:
//! - `<` → `&lt;`
//! - `>` → `&gt;`
//! - `&` → `&amp;`
//! - `"` → `&quot;`
//! - `'` → `&#x27;`

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use marquee_templates::escape_html;
///
/// assert_eq!(escape_html("<script>alert('XSS')</script>"),
///            "&lt;script&gt;alert(&#x27;XSS&#x27;)&lt;/script&gt;");
/// assert_eq!(escape_html("Hello & goodbye"), "Hello &amp; goodbye");
/// assert_eq!(escape_html(r#"<a href="test">link</a>"#),
///            "&lt;a href=&quot;test&quot;&gt;link&lt;/a&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '&' => "&amp;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Unescape HTML entities
///
/// Converts HTML entities back to their original characters.
/// This is the inverse of `escape_html`.
///
/// # Examples
///
/// ```
/// use marquee_templates::unescape_html;
///
/// assert_eq!(unescape_html("&lt;div&gt;"), "<div>");
/// assert_eq!(unescape_html("&quot;quoted&quot;"), r#""quoted""#);
/// assert_eq!(unescape_html("&#x27;single&#x27;"), "'single'");
/// ```
pub fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_entities() {
        assert_eq!(escape_html("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_escape_html_leaves_plain_text() {
        assert_eq!(escape_html("plain text 123"), "plain text 123");
    }

    #[test]
    fn test_unescape_round_trip() {
        let original = r#"<a href="x">it's & more</a>"#;
        assert_eq!(unescape_html(&escape_html(original)), original);
    }
}
