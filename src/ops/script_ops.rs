//! Script library operations and the three-step script editor.
//!
//! Scripts are identified by position in the library. Callers derive the
//! index from the current page and cursor at the moment they act and must
//! not hold on to it across another mutation.

use std::collections::{HashMap, VecDeque};

use crate::model::script::Script;
use crate::ops::template;

/// Error type for script operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("no script at position {0}")]
    NotFound(usize),
}

/// Which field the editor is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Name,
    Command,
    Description,
}

impl ScriptStep {
    pub fn label(self) -> &'static str {
        match self {
            ScriptStep::Name => "NAME",
            ScriptStep::Command => "COMMAND",
            ScriptStep::Description => "DESCRIPTION",
        }
    }

    /// Input hint shown while the field is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            ScriptStep::Name => "Script name",
            ScriptStep::Command => "e.g. echo {{msg}}",
            ScriptStep::Description => "Describe what this does...",
        }
    }

    fn required(self) -> bool {
        !matches!(self, ScriptStep::Description)
    }
}

/// Result of submitting one field to a [`ScriptDraft`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Required field was empty; the draft is unchanged
    Rejected,
    /// Field stored; the editor moves on, pre-filled with `prefill`
    Advanced { step: ScriptStep, prefill: String },
    /// Last field stored; the finished script is ready to commit
    Complete(Script),
}

/// Scratch record for a script being created or edited.
/// Nothing reaches the library until the last step completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDraft {
    step: ScriptStep,
    script: Script,
    editing: bool,
}

impl ScriptDraft {
    /// Blank draft for a new script
    pub fn create() -> Self {
        ScriptDraft {
            step: ScriptStep::Name,
            script: Script::default(),
            editing: false,
        }
    }

    /// Draft seeded from an existing script so each step can be pre-filled
    pub fn edit(existing: &Script) -> Self {
        ScriptDraft {
            step: ScriptStep::Name,
            script: existing.clone(),
            editing: true,
        }
    }

    pub fn step(&self) -> ScriptStep {
        self.step
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Current stored value of the active field
    pub fn current_value(&self) -> &str {
        match self.step {
            ScriptStep::Name => &self.script.name,
            ScriptStep::Command => &self.script.command,
            ScriptStep::Description => &self.script.description,
        }
    }

    /// Submit the text for the active step
    /// The name is stored trimmed. The command and description are kept
    /// as typed.
    pub fn accept(&mut self, input: &str) -> StepOutcome {
        if input.trim().is_empty() && self.step.required() {
            return StepOutcome::Rejected;
        }
        match self.step {
            ScriptStep::Name => {
                self.script.name = input.trim().to_string();
                self.step = ScriptStep::Command;
            }
            ScriptStep::Command => {
                self.script.command = input.to_string();
                self.step = ScriptStep::Description;
            }
            ScriptStep::Description => {
                self.script.description = input.to_string();
                return StepOutcome::Complete(self.script.clone());
            }
        }
        StepOutcome::Advanced {
            step: self.step,
            prefill: self.current_value().to_string(),
        }
    }
}

/// Store a finished script: overwrite at `position` when editing,
/// append otherwise. Returns the index the script now occupies.
pub fn commit_script(
    scripts: &mut Vec<Script>,
    script: Script,
    position: Option<usize>,
) -> Result<usize, ScriptError> {
    match position {
        Some(idx) => {
            let slot = scripts.get_mut(idx).ok_or(ScriptError::NotFound(idx))?;
            *slot = script;
            Ok(idx)
        }
        None => {
            scripts.push(script);
            Ok(scripts.len() - 1)
        }
    }
}

/// Remove the script at `idx`
pub fn delete_script(scripts: &mut Vec<Script>, idx: usize) -> Result<Script, ScriptError> {
    if idx >= scripts.len() {
        return Err(ScriptError::NotFound(idx));
    }
    Ok(scripts.remove(idx))
}

/// First script whose name matches exactly
pub fn find_by_name<'a>(scripts: &'a [Script], name: &str) -> Option<&'a Script> {
    scripts.iter().find(|s| s.name == name)
}

/// A script waiting for its placeholder values before it can be launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    script: Script,
    queue: VecDeque<String>,
    answers: HashMap<String, String>,
}

impl ScriptRun {
    /// Begin collecting values for `script`. Returns `None` when the command
    /// has no placeholders and can be launched as-is.
    pub fn start(script: Script) -> Option<Self> {
        let queue: VecDeque<String> = template::placeholders(&script.command).into();
        if queue.is_empty() {
            return None;
        }
        Some(ScriptRun {
            script,
            queue,
            answers: HashMap::new(),
        })
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Placeholder currently being asked for
    pub fn current(&self) -> Option<&str> {
        self.queue.front().map(String::as_str)
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Record the value for the current placeholder. Once every placeholder
    /// has a value, returns the fully substituted command.
    pub fn answer(&mut self, value: &str) -> Option<String> {
        if let Some(name) = self.queue.pop_front() {
            self.answers.insert(name, value.to_string());
        }
        if self.queue.is_empty() {
            Some(template::substitute(&self.script.command, &self.answers))
        } else {
            None
        }
    }
}
