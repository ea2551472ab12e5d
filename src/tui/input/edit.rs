use chrono::Utc;
use tracing::{debug, info};

use crate::model::Script;
use crate::ops::script_ops::{self, StepOutcome};
use crate::ops::task_ops::{self, TaskError};
use crate::tui::app::TaskEdit;
use crate::tui::text_input::TextInput;

use super::*;

// Each handler takes the mode out of `app` so it can own the scratch state,
// and puts it back only when the prompt stays open.

/// Task title prompt for new and edited tasks
pub(super) fn handle_task_edit(app: &mut App, key: KeyEvent) {
    let Mode::EditingTask { target, mut input } = std::mem::replace(&mut app.mode, Mode::Viewing)
    else {
        return;
    };
    match key.code {
        KeyCode::Esc => debug!("task edit cancelled"),
        KeyCode::Enter => {
            let result = match &target {
                TaskEdit::New => task_ops::create_task(&mut app.tasks, input.value(), Utc::now()),
                TaskEdit::Existing(task_key) => {
                    task_ops::edit_title(&mut app.tasks, task_key, input.value())
                }
            };
            match result {
                Ok(task_key) => {
                    info!(title = %task_key.title, date = %app.selected_date, "saved task");
                    app.persist_tasks();
                    app.select_task(&task_key);
                }
                Err(TaskError::EmptyTitle) => app.mode = Mode::EditingTask { target, input },
                Err(e) => app.error(e.to_string()),
            }
            app.clamp_positions();
        }
        _ => {
            input.handle_key(&key);
            app.mode = Mode::EditingTask { target, input };
        }
    }
}

/// Three-step script editor: name, command, description
pub(super) fn handle_script_edit(app: &mut App, key: KeyEvent) {
    let Mode::EditingScript {
        mut draft,
        mut input,
    } = std::mem::replace(&mut app.mode, Mode::Viewing)
    else {
        return;
    };
    match key.code {
        KeyCode::Esc => debug!("script edit cancelled"),
        KeyCode::Enter => match draft.accept(input.value()) {
            StepOutcome::Rejected => app.mode = Mode::EditingScript { draft, input },
            StepOutcome::Advanced { step, prefill } => {
                let input = TextInput::new(step.placeholder()).with_value(prefill);
                app.mode = Mode::EditingScript { draft, input };
            }
            StepOutcome::Complete(script) => commit_script(app, script, draft.is_editing()),
        },
        _ => {
            input.handle_key(&key);
            app.mode = Mode::EditingScript { draft, input };
        }
    }
}

fn commit_script(app: &mut App, script: Script, editing: bool) {
    // Position is derived from the cursor now, never remembered from the
    // moment editing began.
    let position = editing.then(|| app.script_pos.index(app.page_size()));
    let name = script.name.clone();
    match script_ops::commit_script(&mut app.scripts, script, position) {
        Ok(idx) => {
            info!(name = %name, idx, "saved script");
            app.persist_scripts();
            app.select_script(idx);
        }
        Err(e) => app.error(e.to_string()),
    }
}

/// Placeholder prompts for a pending script run
pub(super) fn handle_argument(app: &mut App, key: KeyEvent) {
    let Mode::CollectingArgument { mut run, mut input } =
        std::mem::replace(&mut app.mode, Mode::Viewing)
    else {
        return;
    };
    match key.code {
        KeyCode::Esc => debug!(script = %run.script().name, "argument entry cancelled"),
        KeyCode::Enter => {
            let value = input.take();
            match run.answer(&value) {
                Some(command) => app.launch(&command),
                None => app.mode = Mode::CollectingArgument { run, input },
            }
        }
        _ => {
            input.handle_key(&key);
            app.mode = Mode::CollectingArgument { run, input };
        }
    }
}
