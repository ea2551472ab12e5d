use tracing::{debug, info};

use crate::model::Task;
use crate::ops::script_ops::{self, ScriptDraft, ScriptRun};
use crate::ops::task_ops;
use crate::tui::app::{DATE_INPUT_LIMIT, TaskEdit};
use crate::tui::text_input::TextInput;

use super::*;

/// Viewing mode on the Tasks tab
pub(super) fn handle_task_view(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.set_mode(Mode::ShowingHelp),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Left | KeyCode::Char('h') => {
            if let Some(date) = app.selected_date.pred_opt() {
                app.load_day(date);
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if let Some(date) = app.selected_date.succ_opt() {
                app.load_day(date);
            }
        }
        KeyCode::Char('t') => app.load_day(app.today),
        KeyCode::Char('n') => app.set_mode(Mode::EditingTask {
            target: TaskEdit::New,
            input: TextInput::new("What needs to be done?"),
        }),
        KeyCode::Char('e') => {
            let Some((task_key, title)) = app.selected_task().map(|t| (t.key(), t.title.clone()))
            else {
                return;
            };
            app.set_mode(Mode::EditingTask {
                target: TaskEdit::Existing(task_key),
                input: TextInput::new("Task title").with_value(title),
            });
        }
        KeyCode::Char(' ') => toggle_selected_task(app),
        KeyCode::Char('d') => delete_selected_task(app),
        KeyCode::Char('/') => {
            app.task_pos.reset();
            app.set_mode(Mode::SearchingTasks);
        }
        KeyCode::Char('g') => app.set_mode(Mode::GoingToDate {
            input: TextInput::new("YYYY-MM-DD").with_limit(DATE_INPUT_LIMIT),
        }),
        KeyCode::Esc if app.query().is_some() => {
            app.search.clear();
            app.task_pos.reset();
        }
        _ => {}
    }
}

fn toggle_selected_task(app: &mut App) {
    let Some(task_key) = app.selected_task().map(Task::key) else {
        return;
    };
    match task_ops::toggle_task(&mut app.tasks, &task_key) {
        Ok(completed) => {
            debug!(title = %task_key.title, completed, "toggled task");
            app.persist_tasks();
        }
        Err(e) => app.error(e.to_string()),
    }
    app.clamp_positions();
}

fn delete_selected_task(app: &mut App) {
    let Some(task_key) = app.selected_task().map(Task::key) else {
        return;
    };
    match task_ops::delete_task(&mut app.tasks, &task_key) {
        Ok(removed) => {
            info!(title = %removed.title, date = %app.selected_date, "deleted task");
            app.persist_tasks();
        }
        Err(e) => app.error(e.to_string()),
    }
    app.clamp_positions();
}

/// Viewing mode on the Scripts tab
pub(super) fn handle_script_view(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.set_mode(Mode::ShowingHelp),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Char('n') => app.begin_script_edit(ScriptDraft::create()),
        KeyCode::Char('e') => {
            if let Some(draft) = app.selected_script().map(ScriptDraft::edit) {
                app.begin_script_edit(draft);
            }
        }
        KeyCode::Char('d') => delete_selected_script(app),
        KeyCode::Enter => run_selected_script(app),
        _ => {}
    }
}

fn delete_selected_script(app: &mut App) {
    let Some(idx) = app.selected_script_index() else {
        return;
    };
    match script_ops::delete_script(&mut app.scripts, idx) {
        Ok(removed) => {
            info!(name = %removed.name, "deleted script");
            app.persist_scripts();
        }
        Err(e) => app.error(e.to_string()),
    }
    app.clamp_positions();
}

/// Launch the selected script, or start asking for its placeholder values
fn run_selected_script(app: &mut App) {
    let Some(script) = app.selected_script().cloned() else {
        return;
    };
    let command = script.command.clone();
    match ScriptRun::start(script) {
        None => app.launch(&command),
        Some(run) => {
            debug!(placeholders = run.remaining(), "collecting arguments");
            app.set_mode(Mode::CollectingArgument {
                run,
                input: TextInput::new("value"),
            });
        }
    }
}
