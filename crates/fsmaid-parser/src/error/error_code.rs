//! Codes for the fsmaid diagnostic system.
//!
//! Codes are organized by stage:
//! - `W0xx` - Scanning and record parsing
//! - `W1xx` - Hierarchy building

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Scanner and Record Warnings (W0xx)
    // =========================================================================
    /// Unterminated invocation.
    ///
    /// A macro name and its opening parenthesis were found but the argument
    /// list never closes. The invocation is ignored.
    W001,

    /// Missing fields.
    ///
    /// An invocation has fewer fields than its macro requires. The missing
    /// fields are read as empty strings.
    W002,

    /// Empty state machine name.
    W003,

    /// Duplicate state machine declaration.
    ///
    /// Only the first declaration of a name produces a chart.
    W004,

    /// Transition table without a state table.
    W005,

    // =========================================================================
    // Hierarchy Warnings (W1xx)
    // =========================================================================
    /// Dropped state.
    ///
    /// The declared parent is not a root state, so the state belongs to no
    /// group and is missing from the chart.
    W100,

    /// Undeclared entry target.
    ///
    /// The initial sub-state named by a root is never declared. It is
    /// rendered verbatim.
    W101,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "W001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::W001 => "W001",
            ErrorCode::W002 => "W002",
            ErrorCode::W003 => "W003",
            ErrorCode::W004 => "W004",
            ErrorCode::W005 => "W005",
            ErrorCode::W100 => "W100",
            ErrorCode::W101 => "W101",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::W001.to_string(), "W001");
        assert_eq!(ErrorCode::W101.to_string(), "W101");
    }
}
