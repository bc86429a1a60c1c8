//! The macro grammar shared by every extraction stage.
//!
//! A state machine is declared in C source through four macro forms:
//!
//! ```text
//! FSM_STATES_INIT(name)
//! FSM_CREATE_STATE(name, state, parent_or_none, initial_or_none[, entry, run, exit])
//! FSM_TRANSITIONS_INIT(name)
//! FSM_TRANSITION_CREATE(name, from, event, to)
//! ```
//!
//! Field semantics are positional. The field counts live on [`MacroKind`]
//! and the reserved names live on [`Grammar`]; nothing else in the
//! workspace re-declares them.

use std::fmt;

/// One of the four recognized macro forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroKind {
    /// Opens the state table of a machine: `FSM_STATES_INIT(name)`.
    StatesInit,
    /// Declares one state of a machine.
    CreateState,
    /// Opens the transition table of a machine: `FSM_TRANSITIONS_INIT(name)`.
    TransitionsInit,
    /// Declares one transition of a machine.
    TransitionCreate,
}

impl MacroKind {
    /// Number of required positional fields following the machine name.
    pub const fn field_count(self) -> usize {
        match self {
            Self::StatesInit | Self::TransitionsInit => 0,
            Self::CreateState | Self::TransitionCreate => 3,
        }
    }

    /// Number of optional positional fields after the required ones.
    ///
    /// `CreateState` carries the `entry`, `run` and `exit` callbacks.
    pub const fn optional_field_count(self) -> usize {
        match self {
            Self::CreateState => 3,
            _ => 0,
        }
    }
}

impl fmt::Display for MacroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StatesInit => "states-init",
            Self::CreateState => "create-state",
            Self::TransitionsInit => "transitions-init",
            Self::TransitionCreate => "transition-create",
        };
        f.write_str(name)
    }
}

/// Macro names and reserved values of the declaration grammar.
///
/// # Duplicated sub-states
///
/// Grouping matches a sub-state to its parent by name only. When two root
/// states share a name, every sub-state naming that parent is listed under
/// both groups; this duplication is accepted rather than resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar<'a> {
    /// Macro opening a state table.
    pub states_init: &'a str,
    /// Macro declaring one state.
    pub create_state: &'a str,
    /// Macro opening a transition table.
    pub transitions_init: &'a str,
    /// Macro declaring one transition.
    pub transition_create: &'a str,
    /// Parent value marking a root state, also used as "no initial sub-state".
    pub no_parent: &'a str,
    /// Callback value marking an absent action.
    pub null_action: &'a str,
}

/// The grammar of the `fsm.h` macro family.
pub const FSM_GRAMMAR: Grammar<'static> = Grammar {
    states_init: "FSM_STATES_INIT",
    create_state: "FSM_CREATE_STATE",
    transitions_init: "FSM_TRANSITIONS_INIT",
    transition_create: "FSM_TRANSITION_CREATE",
    no_parent: "FSM_ST_NONE",
    null_action: "NULL",
};

impl<'a> Grammar<'a> {
    /// Returns the macro name used for `kind`.
    pub fn macro_name(&self, kind: MacroKind) -> &'a str {
        match kind {
            MacroKind::StatesInit => self.states_init,
            MacroKind::CreateState => self.create_state,
            MacroKind::TransitionsInit => self.transitions_init,
            MacroKind::TransitionCreate => self.transition_create,
        }
    }

    /// Returns `true` if `value` is the no-parent sentinel.
    pub fn is_no_parent(&self, value: &str) -> bool {
        value == self.no_parent
    }

    /// Returns `true` if `value` stands for a missing callback.
    pub fn is_null_action(&self, value: &str) -> bool {
        value.is_empty() || value == self.null_action
    }
}

impl Default for Grammar<'static> {
    fn default() -> Self {
        FSM_GRAMMAR
    }
}
