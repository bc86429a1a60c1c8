//! Record parser.
//!
//! Turns the invocations bound to one state machine into positional
//! records. Missing fields become empty strings so a malformed declaration
//! still contributes what it has.

use log::{debug, trace};

use fsmaid_core::{
    grammar::{Grammar, MacroKind},
    record::{StateActions, StateRecord, TransitionRecord},
};

use crate::{
    Span,
    error::{Diagnostic, ErrorCode},
    locate::unterminated,
    scan::scan,
};

/// The trimmed fields of one invocation, without the owning machine name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<String>,
    span: Span,
}

impl RawRecord {
    /// The fields, padded to the number the macro requires.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The field at `index`, or an empty string past the end.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or_default()
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// Records extracted for one state machine together with the warnings raised.
#[derive(Debug, Clone)]
pub struct Extraction<R> {
    records: Vec<R>,
    diagnostics: Vec<Diagnostic>,
}

impl<R> Extraction<R> {
    /// The records in declaration order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (Vec<R>, Vec<Diagnostic>) {
        (self.records, self.diagnostics)
    }

    /// Convert every record, keeping the warnings.
    pub fn map<T>(self, f: impl FnMut(R) -> T) -> Extraction<T> {
        Extraction {
            records: self.records.into_iter().map(f).collect(),
            diagnostics: self.diagnostics,
        }
    }
}

/// Extract every `kind` invocation whose first argument is `fsm_name`.
///
/// Invocations owned by other machines are ignored. Each record holds the
/// remaining fields, trimmed, padded with empty strings up to
/// [`MacroKind::field_count`].
pub fn extract_records(
    source: &str,
    fsm_name: &str,
    kind: MacroKind,
    grammar: &Grammar<'_>,
) -> Extraction<RawRecord> {
    let macro_name = grammar.macro_name(kind);
    let required = kind.field_count();
    let supported = required + kind.optional_field_count();

    let mut records = Vec::new();
    let mut diagnostics = Vec::new();

    for invocation in scan(source, macro_name) {
        if invocation.owner() != fsm_name {
            continue;
        }
        let span = invocation.span();
        if !invocation.is_closed() {
            diagnostics.push(unterminated(macro_name, span));
            continue;
        }

        let mut fields: Vec<String> = invocation
            .fields()
            .iter()
            .map(|field| field.to_string())
            .collect();

        if fields.len() < required {
            diagnostics.push(
                Diagnostic::warning(format!(
                    "`{macro_name}` for `{fsm_name}` has {} of {required} fields",
                    fields.len()
                ))
                .with_code(ErrorCode::W002)
                .with_label(span, "missing fields read as empty"),
            );
            fields.resize(required, String::new());
        } else if fields.len() > supported {
            trace!(
                macro_name,
                fsm = fsm_name,
                extra = fields.len() - supported;
                "Ignoring extra fields"
            );
        }

        records.push(RawRecord { fields, span });
    }

    debug!(
        macro_kind = kind.to_string(),
        fsm = fsm_name,
        count = records.len();
        "Extracted records"
    );

    Extraction {
        records,
        diagnostics,
    }
}

/// Extract the states of `fsm_name` in declaration order.
pub fn extract_states(
    source: &str,
    fsm_name: &str,
    grammar: &Grammar<'_>,
) -> Extraction<StateRecord> {
    extract_records(source, fsm_name, MacroKind::CreateState, grammar).map(|raw| {
        let action = |index: usize| {
            let name = raw.field(index);
            (!grammar.is_null_action(name)).then(|| name.to_string())
        };
        let actions = StateActions::new(action(3), action(4), action(5));

        StateRecord::new(raw.field(0), raw.field(1), raw.field(2), raw.span())
            .with_actions(actions)
    })
}

/// Extract the transitions of `fsm_name` in declaration order.
pub fn extract_transitions(
    source: &str,
    fsm_name: &str,
    grammar: &Grammar<'_>,
) -> Extraction<TransitionRecord> {
    extract_records(source, fsm_name, MacroKind::TransitionCreate, grammar)
        .map(|raw| TransitionRecord::new(raw.field(0), raw.field(1), raw.field(2), raw.span()))
}

#[cfg(test)]
mod tests {
    use fsmaid_core::grammar::FSM_GRAMMAR;

    use super::*;

    const BLINKER: &str = r#"
FSM_STATES_INIT(blinker)
FSM_CREATE_STATE(blinker, ROOT_ST,  FSM_ST_NONE,  OFF_ST,         NULL,       NULL, NULL)
FSM_CREATE_STATE(blinker, OFF_ST,   ROOT_ST,      FSM_ST_NONE,    enter_off,  NULL, NULL)
FSM_CREATE_STATE(blinker, ON_ST,    ROOT_ST,      FSM_ST_NONE,    enter_on,   NULL, NULL)
FSM_STATES_END()

FSM_STATES_INIT(other)
FSM_CREATE_STATE(other, IDLE, FSM_ST_NONE, FSM_ST_NONE)
FSM_STATES_END()

FSM_TRANSITIONS_INIT(blinker)
FSM_TRANSITION_CREATE(blinker,      OFF_ST,         ON_EV,          ON_ST)
FSM_TRANSITION_CREATE(blinker,      ON_ST,          OFF_EV,         OFF_ST)
FSM_TRANSITIONS_END()
"#;

    #[test]
    fn test_extract_states_scoped_by_machine() {
        let states = extract_states(BLINKER, "blinker", &FSM_GRAMMAR);
        let names: Vec<_> = states.records().iter().map(StateRecord::name).collect();

        assert_eq!(names, vec!["ROOT_ST", "OFF_ST", "ON_ST"]);
        assert!(states.diagnostics().is_empty());

        let other = extract_states(BLINKER, "other", &FSM_GRAMMAR);
        assert_eq!(other.records().len(), 1);
        assert_eq!(other.records()[0].name(), "IDLE");
    }

    #[test]
    fn test_state_fields_and_actions() {
        let states = extract_states(BLINKER, "blinker", &FSM_GRAMMAR);
        let root = &states.records()[0];
        let off = &states.records()[1];

        assert_eq!(root.parent(), "FSM_ST_NONE");
        assert_eq!(root.initial(), "OFF_ST");
        assert!(root.actions().is_empty());
        assert_eq!(off.parent(), "ROOT_ST");
        assert_eq!(off.actions().entry(), Some("enter_off"));
        assert_eq!(off.actions().run(), None);
    }

    #[test]
    fn test_extract_transitions() {
        let transitions = extract_transitions(BLINKER, "blinker", &FSM_GRAMMAR);
        let triples: Vec<_> = transitions
            .records()
            .iter()
            .map(|t| (t.from(), t.event(), t.to()))
            .collect();

        assert_eq!(
            triples,
            vec![("OFF_ST", "ON_EV", "ON_ST"), ("ON_ST", "OFF_EV", "OFF_ST")]
        );
    }

    #[test]
    fn test_machine_without_records() {
        assert!(extract_transitions(BLINKER, "other", &FSM_GRAMMAR).records().is_empty());
        assert!(extract_states(BLINKER, "missing", &FSM_GRAMMAR).records().is_empty());
    }

    #[test]
    fn test_missing_fields_are_padded() {
        let source = "FSM_CREATE_STATE(door, open)";
        let raw = extract_records(source, "door", MacroKind::CreateState, &FSM_GRAMMAR);

        assert_eq!(raw.records()[0].fields(), &["open", "", ""]);
        assert_eq!(raw.diagnostics().len(), 1);
        assert_eq!(raw.diagnostics()[0].code(), Some(ErrorCode::W002));
    }

    #[test]
    fn test_annotated_root_state() {
        let source = "FSM_STATES_INIT(door)
FSM_CREATE_STATE(door,
    open,        // the open state
    FSM_ST_NONE, // root, no parent
    closing)
";
        let states = extract_states(source, "door", &FSM_GRAMMAR);
        let open = &states.records()[0];

        assert_eq!(open.name(), "open");
        assert_eq!(open.parent(), "FSM_ST_NONE");
        assert_eq!(open.initial(), "closing");
        assert!(open.is_root(&FSM_GRAMMAR));
        assert!(states.diagnostics().is_empty());
    }

    #[test]
    fn test_owner_must_match_exactly() {
        let source = "FSM_TRANSITION_CREATE(door2, a, e, b)\n\
                      FSM_TRANSITION_CREATE( door , c, f, d)";
        let transitions = extract_transitions(source, "door", &FSM_GRAMMAR);

        assert_eq!(transitions.records().len(), 1);
        assert_eq!(transitions.records()[0].from(), "c");
    }

    #[test]
    fn test_unterminated_record_is_reported() {
        let source = "FSM_TRANSITION_CREATE(door, a, e, b";
        let transitions = extract_transitions(source, "door", &FSM_GRAMMAR);

        assert!(transitions.records().is_empty());
        assert_eq!(transitions.diagnostics()[0].code(), Some(ErrorCode::W001));
    }
}
