use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::model::{Script, Task};
use crate::ops::template;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct DayJson {
    pub date: NaiveDate,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct ScriptJson {
    pub name: String,
    pub command: String,
    pub description: String,
    pub placeholders: Vec<String>,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        title: task.title.clone(),
        completed: task.completed,
        created_at: task.created_at,
    }
}

pub fn script_to_json(script: &Script) -> ScriptJson {
    ScriptJson {
        name: script.name.clone(),
        command: script.command.clone(),
        description: script.description.clone(),
        placeholders: template::placeholders(&script.command),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One line per task: `[x] title`
pub fn format_day_listing(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|t| format!("{} {}", t.checkbox(), t.title))
        .collect()
}

/// Name and command, with the description indented below when present
pub fn format_script_listing(scripts: &[Script]) -> Vec<String> {
    let name_width = scripts.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut lines = Vec::new();
    for script in scripts {
        lines.push(format!(
            "{:<width$}  {}",
            script.name,
            script.command,
            width = name_width
        ));
        if !script.description.is_empty() {
            lines.push(format!("{:<width$}  {}", "", script.description, width = name_width));
        }
    }
    lines
}
