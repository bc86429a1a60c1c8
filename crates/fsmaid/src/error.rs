//! Error types for fsmaid operations.
//!
//! Only I/O and configuration problems are errors. Irregular declarations
//! never fail a run; they are reported as warning diagnostics on each
//! [`Chart`](crate::Chart) instead.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for fsmaid operations.
#[derive(Debug, Error)]
pub enum FsmaidError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot read input file {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("State machine name `{0}` cannot be used as a file name")]
    InvalidName(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),

    #[error("{} state machine chart(s) could not be written", .0.len())]
    Charts(Vec<ChartFailure>),
}

impl From<crate::export::Error> for FsmaidError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

/// The failure of one state machine within a run.
#[derive(Debug, Error)]
#[error("state machine `{fsm}`: {error}")]
pub struct ChartFailure {
    fsm: String,
    #[source]
    error: Box<FsmaidError>,
}

impl ChartFailure {
    pub fn new(fsm: impl Into<String>, error: FsmaidError) -> Self {
        Self {
            fsm: fsm.into(),
            error: Box::new(error),
        }
    }

    /// Name of the state machine that failed.
    pub fn fsm(&self) -> &str {
        &self.fsm
    }

    pub fn error(&self) -> &FsmaidError {
        &self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_failure_display() {
        let failure = ChartFailure::new("door", FsmaidError::InvalidName("a/b".to_string()));

        assert_eq!(
            failure.to_string(),
            "state machine `door`: State machine name `a/b` cannot be used as a file name"
        );
    }

    #[test]
    fn test_charts_display_counts_failures() {
        let err = FsmaidError::Charts(vec![
            ChartFailure::new("door", FsmaidError::Config("x".to_string())),
            ChartFailure::new("lamp", FsmaidError::Config("y".to_string())),
        ]);

        assert_eq!(err.to_string(), "2 state machine chart(s) could not be written");
    }
}
