//! Error types for template processing.

use thiserror::Error;

/// Errors surfaced by the fallible engine entry points.
///
/// Directive-level faults (unknown partials, unknown helpers, helper
/// failures) are deliberately absent: they degrade the rendered output
/// instead of failing the render call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// No template has been registered under the requested name.
    #[error("template '{0}' not found")]
    TemplateNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_template_not_found_display() {
        assert_eq!(
            TemplateError::TemplateNotFound("home".to_string()).to_string(),
            "template 'home' not found"
        );
    }
}
