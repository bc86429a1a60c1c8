//! The core diagnostic type.

use std::fmt;

use crate::{
    Span,
    error::{ErrorCode, Label},
};

/// A warning with source location information.
///
/// Every diagnostic is a warning: the chart is still produced, possibly
/// with less content.
///
/// ```text
/// warning[W002]: `FSM_CREATE_STATE` for `door` has 1 of 3 fields
///   --> door.c:12:1
///    |
/// 12 | FSM_CREATE_STATE(door, OPEN_ST)
///    | ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ missing fields read as empty
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[W001]: message" or "warning: message"
        write!(f, "warning")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_defaults() {
        let diag = Diagnostic::warning("skipped");

        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_labels_keep_order() {
        let diag = Diagnostic::warning("duplicate")
            .with_label(Span::new(10..20), "here")
            .with_secondary_label(Span::new(0..5), "first");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(!diag.labels()[1].is_primary());
        assert_eq!(diag.labels()[1].message(), "first");
    }

    #[test]
    fn test_display_with_code() {
        let diag = Diagnostic::warning("missing fields").with_code(ErrorCode::W002);
        assert_eq!(diag.to_string(), "warning[W002]: missing fields");

        let plain = Diagnostic::warning("no chart for this table");
        assert_eq!(plain.to_string(), "warning: no chart for this table");
    }
}
