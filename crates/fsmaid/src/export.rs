//! Export functionality for state charts.
//!
//! This module provides the [`Exporter`] trait, the final stage of the
//! pipeline:
//!
//! ```text
//! Source Text
//!     ↓ locate + extract
//! State and Transition Records
//!     ↓ hierarchy
//! State Groups
//!     ↓ export (this module)
//! Chart Text
//! ```
//!
//! # Available Backends
//!
//! - [`mermaid`]: Mermaid `stateDiagram-v2` via [`mermaid::MermaidExporter`]

pub mod mermaid;

use std::fmt;

use fsmaid_core::record::TransitionRecord;

use crate::hierarchy::Hierarchy;

/// Abstraction for chart export backends.
pub trait Exporter {
    /// Render the groups of `hierarchy` followed by `transitions`, in the
    /// order given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the text cannot be produced.
    fn export(
        &self,
        hierarchy: &Hierarchy,
        transitions: &[TransitionRecord],
    ) -> Result<String, Error>;
}

/// Errors that can occur during chart export.
///
/// Converted into [`FsmaidError::Export`](crate::FsmaidError::Export) at
/// the crate boundary.
#[derive(Debug)]
pub enum Error {
    /// Writing into the output buffer failed.
    Format(fmt::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(err) => write!(f, "Format error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Format(err)
    }
}
