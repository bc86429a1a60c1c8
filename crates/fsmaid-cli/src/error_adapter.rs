//! Error adapter for converting fsmaid errors and warnings to miette
//! diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! Warnings raised while reading the source are rendered one report each,
//! with a snippet of the offending declaration. A
//! [`FsmaidError::Charts`] failure becomes one report per failed state
//! machine.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use fsmaid::{ChartFailure, FsmaidError};
use fsmaid_parser::error::Diagnostic;

/// Adapter for a single fsmaid diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(MietteSeverity::Warning)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`FsmaidError`] values that carry no source location.
pub struct ErrorAdapter<'a>(pub &'a FsmaidError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(error_code(self.0)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        error_help(self.0).map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Adapter for the failure of one state machine in a run.
pub struct FailureAdapter<'a>(pub &'a ChartFailure);

impl fmt::Debug for FailureAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for FailureAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for FailureAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.error().source()
    }
}

impl MietteDiagnostic for FailureAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(error_code(self.0.error())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        error_help(self.0.error()).map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

fn error_code(err: &FsmaidError) -> &'static str {
    match err {
        FsmaidError::Io(_) => "fsmaid::io",
        FsmaidError::InputNotFound { .. } => "fsmaid::input",
        FsmaidError::Config(_) => "fsmaid::config",
        FsmaidError::InvalidName(_) => "fsmaid::name",
        FsmaidError::Export(_) => "fsmaid::export",
        FsmaidError::Charts(_) => "fsmaid::charts",
    }
}

fn error_help(err: &FsmaidError) -> Option<&'static str> {
    match err {
        FsmaidError::InputNotFound { .. } => {
            Some("the configured input extension is appended when the path lacks it")
        }
        FsmaidError::InvalidName(_) => {
            Some("state machine names become file names and cannot hold path separators")
        }
        _ => None,
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps a source diagnostic, a per-machine failure or a plain
/// error, providing a uniform interface for rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// One state machine that could not be written.
    Failure(FailureAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl Reportable<'_> {
    fn inner(&self) -> &dyn MietteDiagnostic {
        match self {
            Reportable::Diagnostic(d) => d,
            Reportable::Failure(f) => f,
            Reportable::Error(e) => e,
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner().source()
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner().code()
    }

    fn severity(&self) -> Option<MietteSeverity> {
        self.inner().severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner().help()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.inner().source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.inner().labels()
    }
}

/// Convert an fsmaid [`Span`](fsmaid_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: fsmaid_parser::Span) -> SourceSpan {
    SourceSpan::from(Range::from(span))
}

/// Convert an [`FsmaidError`] into a list of reportable errors.
///
/// For [`FsmaidError::Charts`], this returns one [`Reportable`] for each
/// failed state machine. For other error variants, this returns a single
/// [`Reportable`].
pub fn to_reportables(err: &FsmaidError) -> Vec<Reportable<'_>> {
    match err {
        FsmaidError::Charts(failures) => failures
            .iter()
            .map(|failure| Reportable::Failure(FailureAdapter(failure)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Wrap source diagnostics for rendering against `src`.
pub fn diagnostics_to_reportables<'a>(
    diagnostics: &'a [Diagnostic],
    src: &'a str,
) -> Vec<Reportable<'a>> {
    diagnostics
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use fsmaid_parser::{Span, error::ErrorCode};

    use super::*;

    #[test]
    fn test_single_warning() {
        let diag = Diagnostic::warning("missing fields")
            .with_code(ErrorCode::W002)
            .with_label(Span::new(0..5), "here")
            .with_help("add the fields");
        let diags = [diag];

        let reportables = diagnostics_to_reportables(&diags, "hello");
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "missing fields");
                assert_eq!(d.severity(), Some(MietteSeverity::Warning));
                assert_eq!(d.code().map(|c| c.to_string()), Some("W002".to_string()));
            }
            _ => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_chart_failures_are_split() {
        let err = FsmaidError::Charts(vec![
            ChartFailure::new("a/b", FsmaidError::InvalidName("a/b".to_string())),
            ChartFailure::new(
                "door",
                FsmaidError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            ),
        ]);

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert!(reportables[0].to_string().starts_with("state machine `a/b`"));
        assert_eq!(
            reportables[0].code().map(|c| c.to_string()),
            Some("fsmaid::name".to_string())
        );
        assert!(reportables[1].to_string().starts_with("state machine `door`"));
        assert_eq!(
            reportables[1].code().map(|c| c.to_string()),
            Some("fsmaid::io".to_string())
        );
    }

    #[test]
    fn test_input_not_found() {
        let err = FsmaidError::InputNotFound {
            path: PathBuf::from("missing.c"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(
                    e.to_string(),
                    "Cannot read input file missing.c: no such file"
                );
                assert!(e.help().is_some());
            }
            _ => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_all_labels_returned() {
        let diag = Diagnostic::warning("warning with labels")
            .with_label(Span::new(0..5), "primary label")
            .with_secondary_label(Span::new(10..15), "secondary label");

        let adapter = DiagnosticAdapter::new(&diag, "some source code");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("primary label"));
        assert!(labels[0].primary());
        assert_eq!(labels[1].label(), Some("secondary label"));
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_unlabelled_diagnostic_has_no_labels() {
        let diag = Diagnostic::warning("bare");

        let adapter = DiagnosticAdapter::new(&diag, "");

        assert!(adapter.labels().is_none());
    }
}
