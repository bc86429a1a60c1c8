//! Declaration locator.
//!
//! Finds the state machines declared in a file through their state-table
//! macro. Counting and listing both derive from [`locate_declarations`], so
//! they cannot disagree.

use indexmap::IndexMap;
use log::debug;

use fsmaid_core::{grammar::Grammar, record::FsmDeclaration};

use crate::{
    Span,
    error::{Diagnostic, ErrorCode},
    scan::scan,
};

/// The state machines declared in one source file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    declarations: Vec<FsmDeclaration>,
    diagnostics: Vec<Diagnostic>,
}

impl Declarations {
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FsmDeclaration> {
        self.declarations.iter()
    }

    /// Machine names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(FsmDeclaration::name)
    }

    /// Warnings raised while locating declarations.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl<'a> IntoIterator for &'a Declarations {
    type Item = &'a FsmDeclaration;
    type IntoIter = std::slice::Iter<'a, FsmDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Locate every state machine declared in `source`.
///
/// A declaration is a closed state-table invocation with a non-empty name.
/// Repeated names keep their first occurrence. Transition tables naming a
/// machine without a state table are reported but declare nothing.
pub fn locate_declarations(source: &str, grammar: &Grammar<'_>) -> Declarations {
    let tables = scan(source, grammar.states_init);
    let mut diagnostics = Vec::new();
    let mut seen: IndexMap<&str, Span> = IndexMap::new();

    for invocation in &tables {
        let span = invocation.span();
        let name = invocation.owner();

        if !invocation.is_closed() {
            diagnostics.push(unterminated(grammar.states_init, span));
            continue;
        }
        if name.is_empty() {
            diagnostics.push(
                Diagnostic::warning(format!("`{}` has no state machine name", grammar.states_init))
                    .with_code(ErrorCode::W003)
                    .with_label(span, "no chart is produced for this table"),
            );
            continue;
        }
        if let Some(first) = seen.get(name) {
            diagnostics.push(
                Diagnostic::warning(format!("state machine `{name}` is declared more than once"))
                    .with_code(ErrorCode::W004)
                    .with_label(span, "duplicate declaration")
                    .with_secondary_label(*first, "first declared here"),
            );
            continue;
        }
        seen.insert(name, span);
    }

    for invocation in scan(source, grammar.transitions_init) {
        let name = invocation.owner();
        if invocation.is_closed() && !name.is_empty() && !seen.contains_key(name) {
            diagnostics.push(
                Diagnostic::warning(format!(
                    "transition table for `{name}` has no matching `{}`",
                    grammar.states_init
                ))
                .with_code(ErrorCode::W005)
                .with_label(invocation.span(), "these transitions are not rendered"),
            );
        }
    }

    let declarations: Vec<_> = seen
        .into_iter()
        .enumerate()
        .map(|(ordinal, (name, span))| FsmDeclaration::new(name, ordinal, span))
        .collect();

    debug!(
        count = declarations.len(),
        warnings = diagnostics.len();
        "Located state machine declarations"
    );

    Declarations {
        declarations,
        diagnostics,
    }
}

/// Number of state machines declared in `source`.
pub fn count_declarations(source: &str, grammar: &Grammar<'_>) -> usize {
    locate_declarations(source, grammar).len()
}

/// Names of the state machines declared in `source`, in file order.
pub fn list_declaration_names(source: &str, grammar: &Grammar<'_>) -> Vec<String> {
    locate_declarations(source, grammar)
        .names()
        .map(str::to_owned)
        .collect()
}

pub(crate) fn unterminated(macro_name: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(format!("`{macro_name}` invocation is never closed"))
        .with_code(ErrorCode::W001)
        .with_label(span, "expected `)` to end the argument list")
        .with_help("the invocation is ignored")
}
