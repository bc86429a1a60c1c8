//! # fsmaid parser
//!
//! Reads state machine declarations out of C source text without parsing
//! C. The pipeline has two stages:
//!
//! 1. **Locate** - find every state machine by its state-table macro
//! 2. **Extract** - collect the state and transition records bound to one
//!    machine
//!
//! ## Usage
//!
//! ```
//! # use fsmaid_core::grammar::FSM_GRAMMAR;
//! # use fsmaid_parser::{extract_states, locate_declarations};
//!
//! let source = r#"
//!     FSM_STATES_INIT(door)
//!     FSM_CREATE_STATE(door, open, FSM_ST_NONE, closing)
//!     FSM_CREATE_STATE(door, closing, open, FSM_ST_NONE)
//!     FSM_STATES_END()
//! "#;
//!
//! let declarations = locate_declarations(source, &FSM_GRAMMAR);
//! for declaration in &declarations {
//!     let states = extract_states(source, declaration.name(), &FSM_GRAMMAR);
//!     assert_eq!(states.records().len(), 2);
//! }
//! ```

pub mod error;

mod locate;
mod records;
mod scan;

pub use fsmaid_core::span::Span;

pub use locate::{Declarations, count_declarations, list_declaration_names, locate_declarations};
pub use records::{Extraction, RawRecord, extract_records, extract_states, extract_transitions};
pub use scan::{Invocation, scan};
