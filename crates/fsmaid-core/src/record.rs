//! Flat records read out of the source text.
//!
//! Records reference states by name only. No record is validated against
//! any other; resolving names is the job of the hierarchy builder.

use std::fmt;

use crate::{grammar::Grammar, span::Span};

/// One state machine declared in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsmDeclaration {
    name: String,
    ordinal: usize,
    span: Span,
}

impl FsmDeclaration {
    /// Create a declaration for the machine `name`, the `ordinal`-th in its file.
    pub fn new(name: impl Into<String>, ordinal: usize, span: Span) -> Self {
        Self {
            name: name.into(),
            ordinal,
            span,
        }
    }

    /// The declared machine name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based position among all declarations of the file.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Location of the declaring invocation.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// The three callbacks a state may bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Entry,
    Run,
    Exit,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => f.write_str("entry"),
            Self::Run => f.write_str("run"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

/// Callbacks bound to a state; `None` when the declaration passes the null marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateActions {
    entry: Option<String>,
    run: Option<String>,
    exit: Option<String>,
}

impl StateActions {
    pub fn new(entry: Option<String>, run: Option<String>, exit: Option<String>) -> Self {
        Self { entry, run, exit }
    }

    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    pub fn run(&self) -> Option<&str> {
        self.run.as_deref()
    }

    pub fn exit(&self) -> Option<&str> {
        self.exit.as_deref()
    }

    /// Returns `true` if no callback is bound.
    pub fn is_empty(&self) -> bool {
        self.entry.is_none() && self.run.is_none() && self.exit.is_none()
    }

    /// Iterate over the bound callbacks in entry, run, exit order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionKind, &str)> {
        [
            (ActionKind::Entry, self.entry()),
            (ActionKind::Run, self.run()),
            (ActionKind::Exit, self.exit()),
        ]
        .into_iter()
        .filter_map(|(kind, name)| name.map(|name| (kind, name)))
    }
}

/// One `create-state` declaration: `[state, parent, initial]` plus callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    name: String,
    parent: String,
    initial: String,
    actions: StateActions,
    span: Span,
}

impl StateRecord {
    /// Create a state record from its three positional fields.
    pub fn new(
        name: impl Into<String>,
        parent: impl Into<String>,
        initial: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            initial: initial.into(),
            actions: StateActions::default(),
            span,
        }
    }

    /// Attach the callbacks declared for this state.
    pub fn with_actions(mut self, actions: StateActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parent, verbatim; may be the no-parent sentinel.
    pub fn parent(&self) -> &str {
        &self.parent
    }

    /// The declared initial sub-state, verbatim; may be the sentinel.
    pub fn initial(&self) -> &str {
        &self.initial
    }

    pub fn actions(&self) -> &StateActions {
        &self.actions
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns `true` if the declared parent is the no-parent sentinel.
    pub fn is_root(&self, grammar: &Grammar<'_>) -> bool {
        grammar.is_no_parent(&self.parent)
    }

    /// The entry target of this state, unless it is the sentinel or blank.
    pub fn initial_substate(&self, grammar: &Grammar<'_>) -> Option<&str> {
        if self.initial.is_empty() || grammar.is_no_parent(&self.initial) {
            None
        } else {
            Some(&self.initial)
        }
    }
}

/// One `transition-create` declaration: `[from, event, to]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    from: String,
    event: String,
    to: String,
    span: Span,
}

impl TransitionRecord {
    pub fn new(
        from: impl Into<String>,
        event: impl Into<String>,
        to: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            from: from.into(),
            event: event.into(),
            to: to.into(),
            span,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn span(&self) -> Span {
        self.span
    }
}
