//! Hierarchy builder.
//!
//! Rebuilds the one-level nesting of states from the flat state records of
//! a single machine. A record whose parent is the no-parent sentinel is a
//! root; every record naming that root as parent is one of its sub-states.
//! Deeper nesting is not modeled: a state whose parent is itself a
//! sub-state belongs to no group.
//!
//! ```text
//! (open,    FSM_ST_NONE, closing)       state open {
//! (closing, open,        FSM_ST_NONE)   ->   [*] --> closing
//! (closed,  FSM_ST_NONE, FSM_ST_NONE)        closing
//!                                         }
//!                                         state closed {
//!                                         }
//! ```
//!
//! Building never fails. What could not be placed is returned as an
//! [`Unresolved`] report next to the groups.

use std::collections::HashSet;

use indexmap::IndexSet;
use log::{debug, trace};

use fsmaid_core::{grammar::Grammar, record::StateRecord};

/// One root state and the sub-states that name it as parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateGroup {
    root: StateRecord,
    initial: Option<String>,
    substates: Vec<StateRecord>,
}

impl StateGroup {
    pub fn root(&self) -> &StateRecord {
        &self.root
    }

    pub fn name(&self) -> &str {
        self.root.name()
    }

    /// The entry target, verbatim from the root's declaration.
    ///
    /// `None` when the root declares the sentinel or leaves the field blank.
    /// A name is returned even if no such state was declared.
    pub fn initial_substate(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    /// Sub-states in declaration order.
    pub fn substates(&self) -> &[StateRecord] {
        &self.substates
    }
}

/// Names and records the builder could not resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unresolved {
    names: IndexSet<String>,
    dropped: Vec<StateRecord>,
}

impl Unresolved {
    /// Parent and initial sub-state names referenced but never declared.
    pub fn names(&self) -> &IndexSet<String> {
        &self.names
    }

    /// Non-root records whose parent is not a root; they appear in no group.
    pub fn dropped(&self) -> &[StateRecord] {
        &self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.dropped.is_empty()
    }
}

/// The groups of one machine in root declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    groups: Vec<StateGroup>,
    unresolved: Unresolved,
}

impl Hierarchy {
    pub fn groups(&self) -> &[StateGroup] {
        &self.groups
    }

    pub fn unresolved(&self) -> &Unresolved {
        &self.unresolved
    }
}

/// Group `states` under their root states.
///
/// Sub-states are matched by parent name against each root in turn, so two
/// roots sharing a name list the same sub-states.
pub fn build(states: &[StateRecord], grammar: &Grammar<'_>) -> Hierarchy {
    let groups: Vec<StateGroup> = states
        .iter()
        .filter(|record| record.is_root(grammar))
        .map(|root| {
            let substates: Vec<StateRecord> = states
                .iter()
                .filter(|record| record.parent() == root.name())
                .cloned()
                .collect();
            trace!(root = root.name(), substates = substates.len(); "Grouped root state");

            StateGroup {
                root: root.clone(),
                initial: root.initial_substate(grammar).map(str::to_owned),
                substates,
            }
        })
        .collect();

    let declared: HashSet<&str> = states.iter().map(StateRecord::name).collect();
    let roots: HashSet<&str> = groups.iter().map(StateGroup::name).collect();
    let mut unresolved = Unresolved::default();

    for record in states {
        if let Some(initial) = record.initial_substate(grammar) {
            if !declared.contains(initial) {
                unresolved.names.insert(initial.to_owned());
            }
        }
        if record.is_root(grammar) {
            continue;
        }

        let parent = record.parent();
        if !parent.is_empty() && !declared.contains(parent) {
            unresolved.names.insert(parent.to_owned());
        }
        if !roots.contains(parent) {
            unresolved.dropped.push(record.clone());
        }
    }

    debug!(
        groups = groups.len(),
        dropped = unresolved.dropped.len(),
        unresolved = unresolved.names.len();
        "Built state hierarchy"
    );

    Hierarchy { groups, unresolved }
}

#[cfg(test)]
mod tests {
    use fsmaid_core::{grammar::FSM_GRAMMAR, span::Span};
    use proptest::prelude::*;

    use super::*;

    fn state(name: &str, parent: &str, initial: &str) -> StateRecord {
        StateRecord::new(name, parent, initial, Span::default())
    }

    fn names(records: &[StateRecord]) -> Vec<&str> {
        records.iter().map(StateRecord::name).collect()
    }

    #[test]
    fn test_door_scenario() {
        let states = vec![
            state("open", "FSM_ST_NONE", "closing"),
            state("closing", "open", "FSM_ST_NONE"),
            state("closed", "FSM_ST_NONE", "FSM_ST_NONE"),
        ];
        let hierarchy = build(&states, &FSM_GRAMMAR);
        let groups = hierarchy.groups();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name(), "open");
        assert_eq!(groups[0].initial_substate(), Some("closing"));
        assert_eq!(names(groups[0].substates()), vec!["closing"]);
        assert_eq!(groups[1].name(), "closed");
        assert_eq!(groups[1].initial_substate(), None);
        assert!(groups[1].substates().is_empty());
        assert!(hierarchy.unresolved().is_empty());
    }

    #[test]
    fn test_substates_follow_declaration_order() {
        let states = vec![
            state("b", "root", "FSM_ST_NONE"),
            state("root", "FSM_ST_NONE", "a"),
            state("a", "root", "FSM_ST_NONE"),
            state("c", "root", "FSM_ST_NONE"),
        ];
        let hierarchy = build(&states, &FSM_GRAMMAR);

        assert_eq!(names(hierarchy.groups()[0].substates()), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_orphans_are_dropped_and_reported() {
        let states = vec![
            state("root", "FSM_ST_NONE", "FSM_ST_NONE"),
            state("child", "root", "FSM_ST_NONE"),
            state("grandchild", "child", "FSM_ST_NONE"),
            state("stray", "ghost", "FSM_ST_NONE"),
        ];
        let hierarchy = build(&states, &FSM_GRAMMAR);

        assert_eq!(hierarchy.groups().len(), 1);
        assert_eq!(names(hierarchy.groups()[0].substates()), vec!["child"]);
        assert_eq!(
            names(hierarchy.unresolved().dropped()),
            vec!["grandchild", "stray"]
        );
        assert_eq!(
            hierarchy.unresolved().names().iter().collect::<Vec<_>>(),
            vec!["ghost"]
        );
    }

    #[test]
    fn test_dangling_entry_target_is_kept() {
        let states = vec![state("root", "FSM_ST_NONE", "nowhere")];
        let hierarchy = build(&states, &FSM_GRAMMAR);

        assert_eq!(hierarchy.groups()[0].initial_substate(), Some("nowhere"));
        assert!(hierarchy.unresolved().names().contains("nowhere"));
        assert!(hierarchy.unresolved().dropped().is_empty());
    }

    #[test]
    fn test_same_named_roots_share_substates() {
        let states = vec![
            state("idle", "FSM_ST_NONE", "FSM_ST_NONE"),
            state("waiting", "idle", "FSM_ST_NONE"),
            state("idle", "FSM_ST_NONE", "waiting"),
        ];
        let hierarchy = build(&states, &FSM_GRAMMAR);

        assert_eq!(hierarchy.groups().len(), 2);
        assert_eq!(names(hierarchy.groups()[0].substates()), vec!["waiting"]);
        assert_eq!(names(hierarchy.groups()[1].substates()), vec!["waiting"]);
    }

    #[test]
    fn test_empty_input() {
        let hierarchy = build(&[], &FSM_GRAMMAR);

        assert!(hierarchy.groups().is_empty());
        assert!(hierarchy.unresolved().is_empty());
    }

    #[test]
    fn test_blank_fields_do_not_fail() {
        let states = vec![state("", "", ""), state("root", "FSM_ST_NONE", "")];
        let hierarchy = build(&states, &FSM_GRAMMAR);

        assert_eq!(hierarchy.groups().len(), 1);
        assert_eq!(hierarchy.groups()[0].initial_substate(), None);
        assert_eq!(hierarchy.unresolved().dropped().len(), 1);
        assert!(hierarchy.unresolved().names().is_empty());
    }

    fn arb_states() -> impl Strategy<Value = Vec<StateRecord>> {
        let name = prop::sample::select(vec!["a", "b", "c", "d", "e"]);
        let parent = prop::sample::select(vec!["FSM_ST_NONE", "a", "b", "c", "x"]);
        prop::collection::vec((name, parent), 0..12).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(name, parent)| state(name, parent, "FSM_ST_NONE"))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn one_group_per_root_record(states in arb_states()) {
            let hierarchy = build(&states, &FSM_GRAMMAR);
            let roots = states.iter().filter(|s| s.is_root(&FSM_GRAMMAR)).count();

            prop_assert_eq!(hierarchy.groups().len(), roots);
        }

        #[test]
        fn substates_name_their_group(states in arb_states()) {
            let hierarchy = build(&states, &FSM_GRAMMAR);

            for group in hierarchy.groups() {
                let expected: Vec<&StateRecord> = states
                    .iter()
                    .filter(|s| s.parent() == group.name())
                    .collect();
                let actual: Vec<&StateRecord> = group.substates().iter().collect();
                prop_assert_eq!(actual, expected);
            }
        }

        #[test]
        fn every_non_root_is_grouped_or_dropped(states in arb_states()) {
            let hierarchy = build(&states, &FSM_GRAMMAR);
            let grouped: HashSet<&str> = hierarchy
                .groups()
                .iter()
                .flat_map(|g| g.substates().iter().map(StateRecord::name))
                .collect();

            for record in states.iter().filter(|s| !s.is_root(&FSM_GRAMMAR)) {
                let dropped = hierarchy.unresolved().dropped().contains(record);
                prop_assert!(grouped.contains(record.name()) || dropped);
            }
        }
    }
}
