//! Mermaid `stateDiagram-v2` backend.
//!
//! Output layout:
//!
//! ````text
//! ```mermaid
//! stateDiagram-v2
//!     state open {
//!         [*] --> closing
//!         closing
//!     }
//!     state closed {
//!     }
//!     open --> closed : close_event
//! ```
//! ````

use std::fmt::Write as _;

use log::debug;

use fsmaid_core::record::{StateRecord, TransitionRecord};

use crate::{
    config::StyleConfig,
    export::{Error, Exporter},
    hierarchy::{Hierarchy, StateGroup},
};

/// Opening fence of the chart.
pub const HEAD: &str = "```mermaid";
/// Diagram type line.
pub const FORMAT: &str = "stateDiagram-v2";
/// Closing fence of the chart.
pub const TAIL: &str = "```";
/// Pseudo-state a group is entered from.
pub const ENTRY: &str = "[*]";

/// Renders charts as fenced Mermaid state diagrams.
pub struct MermaidExporter<'a> {
    style: &'a StyleConfig,
}

impl<'a> MermaidExporter<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self { style }
    }

    fn pad(&self, level: usize) -> String {
        " ".repeat(self.style.indent() * level)
    }

    fn write_group(&self, out: &mut String, group: &StateGroup) -> Result<(), Error> {
        let outer = self.pad(1);
        let inner = self.pad(2);

        writeln!(out, "{outer}state {} {{", group.name())?;
        if let Some(initial) = group.initial_substate() {
            writeln!(out, "{inner}{ENTRY} --> {initial}")?;
        }
        for substate in group.substates() {
            writeln!(out, "{inner}{}", substate.name())?;
            self.write_actions(out, substate, &inner)?;
        }
        writeln!(out, "{outer}}}")?;
        self.write_actions(out, group.root(), &outer)
    }

    fn write_actions(&self, out: &mut String, state: &StateRecord, pad: &str) -> Result<(), Error> {
        if !self.style.show_actions() || state.actions().is_empty() {
            return Ok(());
        }
        for (kind, callback) in state.actions().iter() {
            writeln!(out, "{pad}note right of {} : {kind} {callback}", state.name())?;
        }
        Ok(())
    }

    fn write_transition(
        &self,
        out: &mut String,
        transition: &TransitionRecord,
    ) -> Result<(), Error> {
        let pad = self.pad(1);
        if transition.event().is_empty() {
            writeln!(out, "{pad}{} --> {}", transition.from(), transition.to())?;
        } else {
            writeln!(
                out,
                "{pad}{} --> {} : {}",
                transition.from(),
                transition.to(),
                transition.event()
            )?;
        }
        Ok(())
    }
}

impl Exporter for MermaidExporter<'_> {
    fn export(
        &self,
        hierarchy: &Hierarchy,
        transitions: &[TransitionRecord],
    ) -> Result<String, Error> {
        let mut out = String::new();

        writeln!(out, "{HEAD}")?;
        writeln!(out, "{FORMAT}")?;
        if let Some(direction) = self.style.direction() {
            writeln!(out, "{}direction {direction}", self.pad(1))?;
        }

        for group in hierarchy.groups() {
            self.write_group(&mut out, group)?;
        }
        for transition in transitions {
            self.write_transition(&mut out, transition)?;
        }

        writeln!(out, "{TAIL}")?;

        debug!(
            groups = hierarchy.groups().len(),
            transitions = transitions.len(),
            bytes = out.len();
            "Rendered mermaid chart"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use fsmaid_core::{
        grammar::FSM_GRAMMAR,
        record::StateActions,
        span::Span,
    };

    use super::*;
    use crate::{config::Direction, hierarchy};

    fn state(name: &str, parent: &str, initial: &str) -> StateRecord {
        StateRecord::new(name, parent, initial, Span::default())
    }

    fn transition(from: &str, event: &str, to: &str) -> TransitionRecord {
        TransitionRecord::new(from, event, to, Span::default())
    }

    fn door() -> Vec<StateRecord> {
        vec![
            state("open", "FSM_ST_NONE", "closing"),
            state("closing", "open", "FSM_ST_NONE"),
            state("closed", "FSM_ST_NONE", "FSM_ST_NONE"),
        ]
    }

    fn render(
        states: &[StateRecord],
        transitions: &[TransitionRecord],
        style: &StyleConfig,
    ) -> String {
        let hierarchy = hierarchy::build(states, &FSM_GRAMMAR);
        MermaidExporter::new(style)
            .export(&hierarchy, transitions)
            .expect("rendering into a String cannot fail")
    }

    #[test]
    fn test_door_document() {
        let style = StyleConfig::default();
        let chart = render(&door(), &[transition("open", "close_event", "closed")], &style);

        let expected = "\
```mermaid
stateDiagram-v2
    state open {
        [*] --> closing
        closing
    }
    state closed {
    }
    open --> closed : close_event
```
";
        assert_eq!(chart, expected);
    }

    #[test]
    fn test_transition_lines() {
        let style = StyleConfig::default();
        let chart = render(&door(), &[transition("open", "close_event", "closed")], &style);
        let lines: Vec<&str> = chart
            .lines()
            .map(str::trim)
            .filter(|line| line.contains("-->") && !line.starts_with(ENTRY))
            .collect();

        assert_eq!(lines, vec!["open --> closed : close_event"]);
    }

    #[test]
    fn test_no_transitions_section_when_empty() {
        let style = StyleConfig::default();
        let chart = render(&door(), &[], &style);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[lines.len() - 2], "    }");
        assert_eq!(lines[lines.len() - 1], TAIL);
        assert!(!chart.contains("\n\n"));
    }

    #[test]
    fn test_dangling_entry_rendered_verbatim() {
        let style = StyleConfig::default();
        let chart = render(&[state("root", "FSM_ST_NONE", "GHOST_ST")], &[], &style);

        assert!(chart.contains("        [*] --> GHOST_ST\n"));
    }

    #[test]
    fn test_empty_chart() {
        let style = StyleConfig::default();
        let chart = render(&[], &[], &style);

        assert_eq!(chart, "```mermaid\nstateDiagram-v2\n```\n");
    }

    #[test]
    fn test_transitions_keep_declaration_order() {
        let style = StyleConfig::default();
        let transitions = [
            transition("b", "e2", "a"),
            transition("a", "e1", "b"),
            transition("a", "", "c"),
        ];
        let chart = render(&[], &transitions, &style);

        assert!(chart.contains("    b --> a : e2\n    a --> b : e1\n    a --> c\n"));
    }

    #[test]
    fn test_style_options() {
        let style = StyleConfig::new(2, Some(Direction::Lr), true);
        let states = vec![
            state("ROOT_ST", "FSM_ST_NONE", "OFF_ST"),
            state("OFF_ST", "ROOT_ST", "FSM_ST_NONE").with_actions(StateActions::new(
                Some("enter_off".to_string()),
                None,
                None,
            )),
        ];
        let chart = render(&states, &[], &style);

        let expected = "\
```mermaid
stateDiagram-v2
  direction LR
  state ROOT_ST {
    [*] --> OFF_ST
    OFF_ST
    note right of OFF_ST : entry enter_off
  }
```
";
        assert_eq!(chart, expected);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let style = StyleConfig::default();
        let transitions = [transition("open", "close_event", "closed")];

        assert_eq!(
            render(&door(), &transitions, &style),
            render(&door(), &transitions, &style)
        );
    }
}
