use serde::{Deserialize, Serialize};

/// A named, reusable command template.
///
/// `command` may contain `{{name}}` placeholders that are filled in
/// when the script is run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub description: String,
}

impl Script {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Script {
            name: name.into(),
            command: command.into(),
            description: description.into(),
        }
    }

    /// The entry handed out when no script store exists yet
    pub fn builtin_default() -> Self {
        Script::new("hello-world", "echo 'hello world'", "prints hello world")
    }
}
