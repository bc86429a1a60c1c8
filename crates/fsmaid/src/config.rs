//! Configuration types for fsmaid chart rendering.
//!
//! All types implement [`serde::Deserialize`] so a configuration can be
//! loaded from an external file; every field is optional and falls back to
//! its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`GrammarConfig`] - Overrides of the macro names and sentinels in
//!   [`FSM_GRAMMAR`].
//! - [`StyleConfig`] - Layout of the rendered Mermaid text.
//! - [`FilesConfig`] - Input and output file extensions.
//!
//! # Example
//!
//! ```
//! # use fsmaid::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.grammar().grammar().no_parent, "FSM_ST_NONE");
//! assert_eq!(config.style().indent(), 4);
//! ```

use std::fmt;

use serde::Deserialize;

use fsmaid_core::grammar::{FSM_GRAMMAR, Grammar};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Grammar overrides section.
    #[serde(default)]
    grammar: GrammarConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,

    /// File naming section.
    #[serde(default)]
    files: FilesConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(grammar: GrammarConfig, style: StyleConfig, files: FilesConfig) -> Self {
        Self {
            grammar,
            style,
            files,
        }
    }

    pub fn grammar(&self) -> &GrammarConfig {
        &self.grammar
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn files(&self) -> &FilesConfig {
        &self.files
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        self.grammar.validate()?;
        self.files.validate()
    }
}

/// Overrides of the declaration grammar; unset entries keep [`FSM_GRAMMAR`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrammarConfig {
    states_init: Option<String>,
    create_state: Option<String>,
    transitions_init: Option<String>,
    transition_create: Option<String>,
    no_parent: Option<String>,
    null_action: Option<String>,
}

impl GrammarConfig {
    /// The effective grammar.
    pub fn grammar(&self) -> Grammar<'_> {
        Grammar {
            states_init: pick(&self.states_init, FSM_GRAMMAR.states_init),
            create_state: pick(&self.create_state, FSM_GRAMMAR.create_state),
            transitions_init: pick(&self.transitions_init, FSM_GRAMMAR.transitions_init),
            transition_create: pick(&self.transition_create, FSM_GRAMMAR.transition_create),
            no_parent: pick(&self.no_parent, FSM_GRAMMAR.no_parent),
            null_action: pick(&self.null_action, FSM_GRAMMAR.null_action),
        }
    }

    fn validate(&self) -> Result<(), String> {
        let grammar = self.grammar();
        let macros = [
            ("states_init", grammar.states_init),
            ("create_state", grammar.create_state),
            ("transitions_init", grammar.transitions_init),
            ("transition_create", grammar.transition_create),
        ];

        for (key, name) in macros {
            let is_identifier = name
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !is_identifier {
                return Err(format!("grammar.{key} must be a C identifier, got `{name}`"));
            }
        }
        if grammar.no_parent.is_empty() {
            return Err("grammar.no_parent must not be empty".to_string());
        }
        Ok(())
    }
}

fn pick<'a>(value: &'a Option<String>, default: &'static str) -> &'a str {
    value.as_deref().unwrap_or(default)
}

/// Direction hint emitted as `direction <DIR>` in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Tb,
    Bt,
    Lr,
    Rl,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self {
            Self::Tb => "TB",
            Self::Bt => "BT",
            Self::Lr => "LR",
            Self::Rl => "RL",
        };
        f.write_str(direction)
    }
}

/// Layout of the rendered chart text.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Spaces per nesting level.
    indent: usize,

    direction: Option<Direction>,

    /// Emit a note for every bound entry, run and exit callback.
    show_actions: bool,
}

impl StyleConfig {
    pub fn new(indent: usize, direction: Option<Direction>, show_actions: bool) -> Self {
        Self {
            indent,
            direction,
            show_actions,
        }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn show_actions(&self) -> bool {
        self.show_actions
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            direction: None,
            show_actions: false,
        }
    }
}

/// File extensions used to find the input and name the outputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    input_extension: String,
    output_extension: String,
}

impl FilesConfig {
    pub fn new(input_extension: impl Into<String>, output_extension: impl Into<String>) -> Self {
        Self {
            input_extension: input_extension.into(),
            output_extension: output_extension.into(),
        }
    }

    /// Extension appended to the input path, without the leading dot.
    pub fn input_extension(&self) -> &str {
        &self.input_extension
    }

    /// Extension of every written chart, without the leading dot.
    pub fn output_extension(&self) -> &str {
        &self.output_extension
    }

    fn validate(&self) -> Result<(), String> {
        for (key, extension) in [
            ("input_extension", &self.input_extension),
            ("output_extension", &self.output_extension),
        ] {
            if extension.contains(['/', '\\']) || extension.starts_with('.') {
                return Err(format!(
                    "files.{key} must be a bare extension such as `md`, got `{extension}`"
                ));
            }
        }
        Ok(())
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input_extension: "c".to_string(),
            output_extension: "md".to_string(),
        }
    }
}
