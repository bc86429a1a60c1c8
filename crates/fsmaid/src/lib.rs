//! fsmaid - Mermaid state diagrams from C state machine declarations.
//!
//! State machines declared with the `FSM_STATES_INIT` / `FSM_CREATE_STATE` /
//! `FSM_TRANSITION_CREATE` macro family are located in a source file, their
//! states are grouped under root states, and each machine is rendered as a
//! Mermaid `stateDiagram-v2` chart.

pub mod config;
pub mod hierarchy;

mod error;
mod export;

pub use fsmaid_core::{grammar, record};
pub use fsmaid_parser::{Declarations, Span, error::Diagnostic};

pub use error::{ChartFailure, FsmaidError};

use log::{debug, info, trace};

use fsmaid_core::{
    grammar::Grammar,
    record::{FsmDeclaration, TransitionRecord},
};
use fsmaid_parser::error::ErrorCode;

use config::AppConfig;
use export::{Exporter, mermaid::MermaidExporter};
use hierarchy::Hierarchy;

/// Builder for locating, building and rendering state charts.
///
/// # Examples
///
/// ```rust
/// use fsmaid::{ChartBuilder, config::AppConfig};
///
/// let source = r#"
///     FSM_STATES_INIT(door)
///     FSM_CREATE_STATE(door, open, FSM_ST_NONE, closing)
///     FSM_CREATE_STATE(door, closing, open, FSM_ST_NONE)
///     FSM_CREATE_STATE(door, closed, FSM_ST_NONE, FSM_ST_NONE)
///     FSM_STATES_END()
///
///     FSM_TRANSITIONS_INIT(door)
///     FSM_TRANSITION_CREATE(door, open, close_event, closed)
///     FSM_TRANSITIONS_END()
/// "#;
///
/// let builder = ChartBuilder::new(AppConfig::default());
/// let declarations = builder.locate(source);
///
/// for declaration in &declarations {
///     let chart = builder.build(source, declaration);
///     let text = builder.render(&chart).expect("Failed to render");
///     assert!(text.contains("open --> closed : close_event"));
/// }
/// ```
#[derive(Default)]
pub struct ChartBuilder {
    config: AppConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The grammar in effect, with configured overrides applied.
    pub fn grammar(&self) -> Grammar<'_> {
        self.config.grammar().grammar()
    }

    /// Locate the state machines declared in `source`.
    pub fn locate(&self, source: &str) -> Declarations {
        info!("Locating state machine declarations");
        let declarations = fsmaid_parser::locate_declarations(source, &self.grammar());
        debug!(
            count = declarations.len(),
            warnings = declarations.diagnostics().len();
            "Declarations located"
        );
        declarations
    }

    /// Extract and group the records of one declared machine.
    ///
    /// This never fails: irregular declarations are reported through
    /// [`Chart::diagnostics`].
    pub fn build(&self, source: &str, declaration: &FsmDeclaration) -> Chart {
        let grammar = self.grammar();
        let name = declaration.name();
        info!(fsm = name, ordinal = declaration.ordinal(); "Building chart");

        let (states, mut diagnostics) =
            fsmaid_parser::extract_states(source, name, &grammar).into_parts();
        let (transitions, transition_diagnostics) =
            fsmaid_parser::extract_transitions(source, name, &grammar).into_parts();
        diagnostics.extend(transition_diagnostics);

        let hierarchy = hierarchy::build(&states, &grammar);
        diagnostics.extend(unresolved_diagnostics(&hierarchy, &grammar));

        for diagnostic in &diagnostics {
            debug!(fsm = name; "{diagnostic}");
        }
        trace!(hierarchy:?; "Built hierarchy");

        Chart {
            declaration: declaration.clone(),
            hierarchy,
            transitions,
            diagnostics,
        }
    }

    /// Render a chart to Mermaid text.
    ///
    /// # Errors
    ///
    /// Returns [`FsmaidError::Export`] if the text cannot be produced.
    pub fn render(&self, chart: &Chart) -> Result<String, FsmaidError> {
        let exporter = MermaidExporter::new(self.config.style());
        let text = exporter.export(&chart.hierarchy, &chart.transitions)?;

        info!(fsm = chart.name(); "Chart rendered");
        Ok(text)
    }
}

/// Everything read for one state machine.
#[derive(Debug, Clone)]
pub struct Chart {
    declaration: FsmDeclaration,
    hierarchy: Hierarchy,
    transitions: Vec<TransitionRecord>,
    diagnostics: Vec<Diagnostic>,
}

impl Chart {
    pub fn name(&self) -> &str {
        self.declaration.name()
    }

    pub fn declaration(&self) -> &FsmDeclaration {
        &self.declaration
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Transitions in declaration order.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// Warnings raised while extracting and grouping this machine.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Warnings for dropped states and undeclared entry targets.
fn unresolved_diagnostics(hierarchy: &Hierarchy, grammar: &Grammar<'_>) -> Vec<Diagnostic> {
    let unresolved = hierarchy.unresolved();
    let mut diagnostics = Vec::new();
    if unresolved.is_empty() {
        return diagnostics;
    }

    for record in unresolved.dropped() {
        let parent = record.parent();
        let reason = if unresolved.names().contains(parent) {
            format!("parent `{parent}` is never declared")
        } else {
            format!("parent `{parent}` is not a root state")
        };
        diagnostics.push(
            Diagnostic::warning(format!("state `{}` is left out: {reason}", record.name()))
                .with_code(ErrorCode::W100)
                .with_label(record.span(), "this state appears in no group")
                .with_help(format!(
                    "only states whose parent is `{}` can own sub-states",
                    grammar.no_parent
                )),
        );
    }

    for group in hierarchy.groups() {
        if let Some(initial) = group.initial_substate() {
            if unresolved.names().contains(initial) {
                diagnostics.push(
                    Diagnostic::warning(format!(
                        "entry target `{initial}` of `{}` is never declared",
                        group.name()
                    ))
                    .with_code(ErrorCode::W101)
                    .with_label(group.root().span(), "rendered as written"),
                );
            }
        }
    }

    diagnostics
}
