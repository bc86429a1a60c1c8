//! Diagnostics raised while reading declarations.
//!
//! Nothing read from the source text aborts a run: malformed or dangling
//! declarations degrade the rendered chart and are reported as warning
//! [`Diagnostic`]s carrying an [`ErrorCode`] and labeled source spans.
//!
//! # Example
//!
//! ```
//! # use fsmaid_parser::error::{Diagnostic, ErrorCode};
//! # use fsmaid_parser::Span;
//!
//! let diag = Diagnostic::warning("state machine `door` is declared more than once")
//!     .with_code(ErrorCode::W004)
//!     .with_label(Span::new(120..141), "duplicate declaration")
//!     .with_secondary_label(Span::new(10..31), "first declared here");
//! ```

mod diagnostic;
mod error_code;
mod label;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
